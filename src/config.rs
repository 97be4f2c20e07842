use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{JnError, Result};
use crate::search::{ExpansionOrder, SnippetStyle};

/// FTS5 refuses snippet windows wider than this.
const MAX_SNIPPET_TOKENS: u32 = 64;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("JN_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            // An explicitly named file has to exist.
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(JnError::MissingConfig(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
            }
        } else if let Some(global) = Self::load_global()? {
            config.merge_patch(global);
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/jnotes/config.toml` (or the platform equivalent).
    pub fn global_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| JnError::MissingConfig("config directory not found".to_string()))?
            .join("jnotes/config.toml"))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("jnotes/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| JnError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| JnError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.database {
            self.database.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.notes {
            self.notes.merge(patch);
        }
        if let Some(patch) = patch.editor {
            self.editor.merge(patch);
        }
        if let Some(patch) = patch.sync {
            self.sync.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(&|key| std::env::var(key).ok())
    }

    fn apply_overrides_from(&mut self, env: &dyn Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = env_string(env, "JN_DB") {
            self.database.path = Some(PathBuf::from(value));
        }
        if let Some(value) = env_u64(env, "JN_DATABASE_BUSY_TIMEOUT_MS")? {
            self.database.busy_timeout_ms = value;
        }

        if let Some(value) = env_string(env, "JN_SYNONYMS") {
            self.search.synonyms_path = Some(PathBuf::from(value));
        }
        if let Some(value) = env_u32(env, "JN_SEARCH_LIMIT")? {
            self.search.limit = value as usize;
        }
        if let Some(value) = env_string(env, "JN_SEARCH_EXPANSION_ORDER") {
            self.search.expansion_order = value
                .parse()
                .map_err(|err| JnError::Config(format!("invalid JN_SEARCH_EXPANSION_ORDER: {err}")))?;
        }
        if let Some(value) = env_bool(env, "JN_SEARCH_CASE_INSENSITIVE_SYNONYMS") {
            self.search.case_insensitive_synonyms = value;
        }
        if let Some(value) = env_u32(env, "JN_SEARCH_SNIPPET_TOKENS")? {
            self.search.snippet_tokens = value;
        }

        if let Some(value) = env_string(env, "JN_NOTES_DEFAULT_NOTEBOOK") {
            self.notes.default_notebook = value;
        }
        if let Some(value) = env_string(env, "JN_NOTES_NEW_AND_EDIT_NOTEBOOK") {
            self.notes.new_and_edit_notebook = value;
        }

        if let Some(value) = env_string(env, "JN_EDITOR") {
            self.editor.command = value;
        }
        if let Some(value) = env_string(env, "JN_EDITOR_TEMP_DIR") {
            self.editor.temp_dir = PathBuf::from(value);
        }
        if let Some(value) = env_u64(env, "JN_EDITOR_POLL_INTERVAL_MS")? {
            self.editor.poll_interval_ms = value;
        }

        if let Some(value) = env_bool(env, "JN_SYNC_REGISTER_DELETIONS") {
            self.sync.register_deletions = value;
        }

        Ok(())
    }

    /// Database path: configured value, else the Joplin desktop default.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(expand_home(path));
        }
        Ok(dirs::config_dir()
            .ok_or_else(|| JnError::MissingConfig("config directory not found".to_string()))?
            .join("joplin-desktop/database.sqlite"))
    }

    /// Synonym resource path: configured value, else `synonyms.txt` next to the global config.
    pub fn synonyms_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.search.synonyms_path {
            return Ok(expand_home(path));
        }
        Ok(Self::global_path()?.with_file_name("synonyms.txt"))
    }

    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.database.busy_timeout_ms)
    }

    /// `None` when deleted notes should not be queued for sync.
    #[must_use]
    pub const fn deletion_sync_target(&self) -> Option<i64> {
        if self.sync.register_deletions {
            Some(self.sync.target)
        } else {
            None
        }
    }

    #[must_use]
    pub fn snippet_style(&self) -> SnippetStyle {
        SnippetStyle {
            start: self.search.highlight_start.clone(),
            end: self.search.highlight_end.clone(),
            ellipsis: self.search.ellipsis.clone(),
            tokens: self.search.snippet_tokens.clamp(1, MAX_SNIPPET_TOKENS),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout_ms: 5_000,
        }
    }
}

impl DatabaseConfig {
    fn merge(&mut self, patch: DatabasePatch) {
        if let Some(value) = patch.path {
            self.path = Some(value);
        }
        if let Some(value) = patch.busy_timeout_ms {
            self.busy_timeout_ms = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub synonyms_path: Option<PathBuf>,
    /// Maximum hits; 0 is unlimited.
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub expansion_order: ExpansionOrder,
    #[serde(default)]
    pub case_insensitive_synonyms: bool,
    #[serde(default)]
    pub snippet_tokens: u32,
    #[serde(default)]
    pub highlight_start: String,
    #[serde(default)]
    pub highlight_end: String,
    #[serde(default)]
    pub ellipsis: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let snippet = SnippetStyle::default();
        Self {
            synonyms_path: None,
            limit: 0,
            expansion_order: ExpansionOrder::Declared,
            case_insensitive_synonyms: false,
            snippet_tokens: snippet.tokens,
            highlight_start: snippet.start,
            highlight_end: snippet.end,
            ellipsis: snippet.ellipsis,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.synonyms_path {
            self.synonyms_path = Some(value);
        }
        if let Some(value) = patch.limit {
            self.limit = value;
        }
        if let Some(value) = patch.expansion_order {
            self.expansion_order = value;
        }
        if let Some(value) = patch.case_insensitive_synonyms {
            self.case_insensitive_synonyms = value;
        }
        if let Some(value) = patch.snippet_tokens {
            self.snippet_tokens = value;
        }
        if let Some(value) = patch.highlight_start {
            self.highlight_start = value;
        }
        if let Some(value) = patch.highlight_end {
            self.highlight_end = value;
        }
        if let Some(value) = patch.ellipsis {
            self.ellipsis = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    #[serde(default)]
    pub default_notebook: String,
    /// Notebook used by `new --edit` when none is given.
    #[serde(default)]
    pub new_and_edit_notebook: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            default_notebook: "personal".to_string(),
            new_and_edit_notebook: "search".to_string(),
        }
    }
}

impl NotesConfig {
    fn merge(&mut self, patch: NotesPatch) {
        if let Some(value) = patch.default_notebook {
            self.default_notebook = value;
        }
        if let Some(value) = patch.new_and_edit_notebook {
            self.new_and_edit_notebook = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Command template; `{path}` and `{title}` are substituted.
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub temp_dir: PathBuf,
    #[serde(default)]
    pub poll_interval_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let editor = std::env::var("VISUAL")
            .or_else(|_| std::env::var("EDITOR"))
            .unwrap_or_else(|_| "vi".to_string());
        Self {
            command: format!("{editor} {{path}}"),
            temp_dir: std::env::temp_dir().join("jnotes"),
            poll_interval_ms: 500,
        }
    }
}

impl EditorConfig {
    fn merge(&mut self, patch: EditorPatch) {
        if let Some(value) = patch.command {
            self.command = value;
        }
        if let Some(value) = patch.temp_dir {
            self.temp_dir = expand_home(&value);
        }
        if let Some(value) = patch.poll_interval_ms {
            self.poll_interval_ms = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Record deletions in `deleted_items` so Joplin's sync propagates them.
    #[serde(default)]
    pub register_deletions: bool,
    /// Joplin sync target id.
    #[serde(default)]
    pub target: i64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            register_deletions: true,
            target: 7,
        }
    }
}

impl SyncConfig {
    fn merge(&mut self, patch: SyncPatch) {
        if let Some(value) = patch.register_deletions {
            self.register_deletions = value;
        }
        if let Some(value) = patch.target {
            self.target = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub database: Option<DatabasePatch>,
    pub search: Option<SearchPatch>,
    pub notes: Option<NotesPatch>,
    pub editor: Option<EditorPatch>,
    pub sync: Option<SyncPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DatabasePatch {
    pub path: Option<PathBuf>,
    pub busy_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub synonyms_path: Option<PathBuf>,
    pub limit: Option<usize>,
    pub expansion_order: Option<ExpansionOrder>,
    pub case_insensitive_synonyms: Option<bool>,
    pub snippet_tokens: Option<u32>,
    pub highlight_start: Option<String>,
    pub highlight_end: Option<String>,
    pub ellipsis: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NotesPatch {
    pub default_notebook: Option<String>,
    pub new_and_edit_notebook: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EditorPatch {
    pub command: Option<String>,
    pub temp_dir: Option<PathBuf>,
    pub poll_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SyncPatch {
    pub register_deletions: Option<bool>,
    pub target: Option<i64>,
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn env_string(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    env(key)
}

fn env_bool(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    env(key).map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u32(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<u32>> {
    match env(key) {
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|err| JnError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

fn env_u64(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    match env(key) {
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|err| JnError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}

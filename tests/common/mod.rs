//! Common test utilities shared across integration and e2e tests.
//!
//! `JoplinFixture` owns a temp directory holding a Joplin-shaped database,
//! a synonyms file and a config file pointing at both, so the `jn` binary
//! can run against it with `JN_CONFIG` alone.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use jnotes::core::{Folder, Note, new_note_id, now_millis};
use jnotes::storage::Database;
use serde_json::Value;
use tempfile::TempDir;

pub const SYNONYMS: &str = "'py' 'python'\n'js' 'javascript' 'ecmascript'\n";

pub struct JoplinFixture {
    pub temp_dir: TempDir,
    pub db_path: PathBuf,
    pub config_path: PathBuf,
    pub synonyms_path: PathBuf,
    pub edit_dir: PathBuf,
    editor_command: String,
}

impl JoplinFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        let db_path = root.join("database.sqlite");
        Database::create(&db_path).expect("create database");

        let synonyms_path = root.join("synonyms.txt");
        std::fs::write(&synonyms_path, SYNONYMS).expect("write synonyms");

        let fixture = Self {
            db_path,
            config_path: root.join("config.toml"),
            synonyms_path,
            edit_dir: root.join("edit"),
            editor_command: "true {path}".to_string(),
            temp_dir,
        };
        fixture.write_config();
        fixture
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn db(&self) -> Database {
        Database::create(&self.db_path).expect("open database")
    }

    pub fn add_notebook(&self, title: &str) -> String {
        let folder = Folder {
            id: new_note_id(),
            parent_id: String::new(),
            title: title.to_string(),
        };
        self.db()
            .insert_folder(&folder, now_millis())
            .expect("insert notebook");
        folder.id
    }

    /// Insert a note directly, without touching the search index.
    pub fn add_note(&self, notebook_id: &str, title: &str, body: &str) -> Note {
        let note = Note::new(title, body, notebook_id);
        self.db().insert_note(&note, "joplin").expect("insert note");
        note
    }

    pub fn mark_conflict(&self, note_id: &str) {
        self.db()
            .conn()
            .execute("UPDATE notes SET is_conflict = 1 WHERE id = ?1", [note_id])
            .expect("flag conflict");
    }

    /// Use a shell script as the editor; it receives the note file as `$1`.
    pub fn set_editor_script(&mut self, script: &str) {
        let script_path = self.root().join("editor.sh");
        std::fs::write(&script_path, script).expect("write editor script");
        self.editor_command = format!("sh '{}' {{path}}", script_path.display());
        self.write_config();
    }

    pub fn write_config(&self) {
        let config = format!(
            r#"[database]
path = '{db}'
busy_timeout_ms = 1000

[search]
synonyms_path = '{synonyms}'

[notes]
default_notebook = "personal"
new_and_edit_notebook = "search"

[editor]
command = "{editor}"
temp_dir = '{edit_dir}'
poll_interval_ms = 10
"#,
            db = self.db_path.display(),
            synonyms = self.synonyms_path.display(),
            editor = self.editor_command.replace('\\', "\\\\").replace('"', "\\\""),
            edit_dir = self.edit_dir.display(),
        );
        std::fs::write(&self.config_path, config).expect("write config");
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("jn").expect("jn binary");
        cmd.env("JN_CONFIG", &self.config_path)
            .env_remove("RUST_LOG")
            .env_remove("JN_DB")
            .env_remove("JN_ROBOT");
        cmd
    }

    pub fn run_jn(&self, args: &[&str]) -> CommandOutput {
        let output = self.command().args(args).output().expect("run jn");
        CommandOutput::from(output)
    }

    pub fn index_entry_count(&self, note_id: &str) -> i64 {
        self.db()
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM notes_jn_index WHERE uid = ?1",
                [note_id],
                |row| row.get(0),
            )
            .expect("count index entries")
    }
}

impl Default for JoplinFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout).unwrap_or_else(|err| {
            panic!(
                "stdout is not JSON ({err})\nstdout:\n{}\nstderr:\n{}",
                self.stdout, self.stderr
            )
        })
    }

    pub fn assert_success(&self, context: &str) {
        assert!(
            self.success(),
            "{context} failed with {:?}\nstdout:\n{}\nstderr:\n{}",
            self.code,
            self.stdout,
            self.stderr
        );
    }
}

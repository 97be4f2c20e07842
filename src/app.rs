use crate::config::Config;
use crate::core::NoteRepository;
use crate::editor::NoteEditor;
use crate::error::Result;
use crate::search::{QueryCompiler, SearchIndexer, SearchService, SynonymTable};
use crate::storage::Database;

pub struct AppContext {
    pub config: Config,
    pub db: Database,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = Config::load(cli.config.as_deref())?;
        if let Some(db) = &cli.db {
            config.database.path = Some(db.clone());
        }
        Self::new(config, cli.robot)
    }

    /// Open the configured database.
    pub fn new(config: Config, robot_mode: bool) -> Result<Self> {
        let db_path = config.database_path()?;
        tracing::debug!(db = %db_path.display(), "opening database");
        let db = Database::open(&db_path, config.busy_timeout())?;

        Ok(Self {
            config,
            db,
            robot_mode,
        })
    }

    /// Repository wired to keep the search index in step.
    #[must_use]
    pub fn repository<'a>(&'a self, indexer: &'a SearchIndexer) -> NoteRepository<'a> {
        let mut repo = NoteRepository::new(&self.db)
            .with_deletion_sync(self.config.deletion_sync_target());
        repo.subscribe(indexer);
        repo
    }

    pub fn load_synonyms(&self) -> Result<SynonymTable> {
        let path = self.config.synonyms_path()?;
        Ok(SynonymTable::load(&path)?
            .case_insensitive(self.config.search.case_insensitive_synonyms))
    }

    #[must_use]
    pub fn search_service<'t>(&self, synonyms: &'t SynonymTable) -> SearchService<'t> {
        let compiler =
            QueryCompiler::new(synonyms).with_order(self.config.search.expansion_order);
        SearchService::new(compiler).with_snippet(self.config.snippet_style())
    }

    #[must_use]
    pub fn editor(&self) -> NoteEditor {
        NoteEditor::from_config(&self.config.editor)
    }
}

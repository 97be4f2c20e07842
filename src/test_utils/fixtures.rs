use std::path::PathBuf;

use tempfile::TempDir;

use crate::core::{Folder, Note, NoteRepository, new_note_id, now_millis};
use crate::storage::Database;

/// Test fixture providing an isolated Joplin-shaped database on disk.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
    pub db: Database,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();
        let db = Database::create(data_path.join("database.sqlite"))
            .expect("Failed to create test database");

        println!("[FIXTURE] Created temp database in: {data_path:?}");

        Self {
            temp_dir,
            data_path,
            db,
        }
    }

    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.data_path.join("database.sqlite")
    }

    /// Add a notebook and return its id.
    #[must_use]
    pub fn create_notebook(&self, title: &str) -> String {
        let folder = Folder {
            id: new_note_id(),
            parent_id: String::new(),
            title: title.to_string(),
        };
        self.db
            .insert_folder(&folder, now_millis())
            .expect("Failed to insert notebook");
        folder.id
    }

    /// Add a note straight into the canonical table, bypassing the index.
    #[must_use]
    pub fn create_note(&self, notebook: &str, title: &str, body: &str) -> Note {
        let folder = self
            .db
            .find_folder_by_title(notebook)
            .expect("Failed to look up notebook")
            .expect("Notebook missing from fixture");
        let note = Note::new(title, body, &folder.id);
        self.db
            .insert_note(&note, crate::core::repository::SOURCE_APPLICATION)
            .expect("Failed to insert note");
        note
    }

    /// Write a file under the fixture directory.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    #[must_use]
    pub fn repository(&self) -> NoteRepository<'_> {
        NoteRepository::new(&self.db)
    }
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.data_path);
    }
}

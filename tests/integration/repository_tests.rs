use jnotes::core::document::{self, NoteDocument};
use jnotes::search::{IndexMaintainer, QueryCompiler, SearchIndexer, SearchService, SynonymTable};
use jnotes::test_utils::UnitTestFixture;

#[test]
fn test_create_edit_delete_keeps_index_in_step() {
    let fixture = UnitTestFixture::new();
    let _ = fixture.create_notebook("personal");
    IndexMaintainer::new(&fixture.db).rebuild_all().unwrap();

    let synonyms = SynonymTable::parse("'py' 'python'\n").unwrap();
    let service = SearchService::new(QueryCompiler::new(&synonyms));
    let indexer = SearchIndexer::new();
    let mut repo = fixture.repository();
    repo.subscribe(&indexer);

    let mut note = repo.create("Scripting", "personal", "py one-liners").unwrap();
    let hits = service.search(&fixture.db, "python", 0).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, note.id);

    let text = "Scripting\n#personal\nmdate=x\ncdate=x\n\nshell one-liners\n";
    let parsed = document::parse(text).unwrap();
    repo.apply_document(&mut note, &parsed).unwrap();
    repo.save(&mut note).unwrap();
    assert!(service.search(&fixture.db, "python", 0).unwrap().is_empty());
    assert_eq!(service.search(&fixture.db, "shell", 0).unwrap().len(), 1);

    repo.delete(&note).unwrap();
    assert!(service.search(&fixture.db, "shell", 0).unwrap().is_empty());
    assert_eq!(indexer.failures(), 0);
}

#[test]
fn test_note_file_round_trip_through_repository() {
    let fixture = UnitTestFixture::new();
    let _ = fixture.create_notebook("work");
    let _ = fixture.create_notebook("home");
    let mut note = fixture.create_note("work", "Plan", "step one");
    let repo = fixture.repository();

    let rendered = document::render(&note, "work");
    let moved = rendered.replace("#work", "#home");
    let parsed = document::parse(&moved).unwrap();
    repo.apply_document(&mut note, &parsed).unwrap();
    repo.save(&mut note).unwrap();

    let stored = repo.get(&note.id).unwrap();
    assert_eq!(repo.notebook(&stored.parent_id).unwrap().title, "home");
    assert_eq!(stored.body, "step one");

    assert_eq!(document::parse("").unwrap(), NoteDocument::Empty);
}

#[test]
fn test_index_failure_does_not_block_write() {
    let fixture = UnitTestFixture::new();
    let _ = fixture.create_notebook("personal");
    // No index table: every index write fails.
    let indexer = SearchIndexer::new();
    let mut repo = fixture.repository();
    repo.subscribe(&indexer);

    let note = repo.create("Orphan", "personal", "body").unwrap();
    assert_eq!(indexer.failures(), 1);
    assert_eq!(repo.get(&note.id).unwrap().title, "Orphan");
}

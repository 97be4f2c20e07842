use jnotes::search::{INDEX_TABLE, IndexMaintainer};
use jnotes::test_utils::UnitTestFixture;
use rusqlite::Connection;

#[test]
fn test_db_state_after_rebuild() {
    let fixture = UnitTestFixture::new();
    let _ = fixture.create_notebook("personal");
    let note = fixture.create_note("personal", "Rust tips", "borrow checker notes");
    let _ = fixture.create_note("personal", "Groceries", "");

    let indexed = IndexMaintainer::new(&fixture.db).rebuild_all().unwrap();
    assert_eq!(indexed, 2);

    // A second connection sees the committed index.
    let conn = Connection::open(fixture.db_path()).expect("open db");
    let count: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {INDEX_TABLE}"), [], |row| {
            row.get(0)
        })
        .expect("count index rows");
    assert_eq!(count, 2);

    let (title, body): (String, String) = conn
        .query_row(
            &format!("SELECT title, body FROM {INDEX_TABLE} WHERE uid = ?1"),
            [&note.id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .expect("query index row");
    assert_eq!(title, "Rust tips");
    assert_eq!(body, "borrow checker notes");
}

#[test]
fn test_rebuild_replaces_stale_entries() {
    let fixture = UnitTestFixture::new();
    let _ = fixture.create_notebook("personal");
    let note = fixture.create_note("personal", "Keep", "body");
    let maintainer = IndexMaintainer::new(&fixture.db);
    maintainer.rebuild_all().unwrap();

    fixture
        .db
        .conn()
        .execute(
            &format!("INSERT INTO {INDEX_TABLE} (uid, title, body) VALUES ('ghost', 'x', 'y')"),
            [],
        )
        .unwrap();
    let report = maintainer.verify().unwrap();
    assert_eq!(report.orphaned, vec!["ghost".to_string()]);

    maintainer.rebuild_all().unwrap();
    let report = maintainer.verify().unwrap();
    assert!(report.is_consistent());
    assert_eq!(maintainer.entry_count(&note.id).unwrap(), 1);
}

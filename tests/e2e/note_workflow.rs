//! E2E Scenario: creating, showing and deleting notes
//!
//! - new notes are searchable right away
//! - duplicate titles and unknown notebooks are rejected
//! - show prints the editor file format, several ids in order
//! - delete removes the note, its index entry, and queues the deletion for sync
//! - an index failure never blocks the note write

use super::common::JoplinFixture;

#[test]
fn test_new_note_is_searchable() {
    let fixture = JoplinFixture::new();
    fixture.add_notebook("personal");
    fixture.run_jn(&["index", "rebuild"]).assert_success("rebuild");

    let output = fixture.run_jn(&[
        "--robot", "new", "Shopping", "list", "--body", "buy zebracorn food",
    ]);
    output.assert_success("new");
    let json = output.json();
    assert_eq!(json["title"], "Shopping list");
    assert_eq!(json["notebook"], "personal");
    let id = json["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 32);

    let search = fixture.run_jn(&["--robot", "search", "zebracorn"]);
    search.assert_success("search");
    assert_eq!(search.json()["hits"][0]["id"], id.as_str());

    let stored = fixture.db().get_note(&id).unwrap().unwrap();
    assert_eq!(stored.body, "buy zebracorn food");
    assert_eq!(stored.created_time, stored.updated_time);
}

#[test]
fn test_new_rejects_duplicate_title() {
    let fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("personal");
    fixture.add_note(&notebook, "Taken", "");

    let output = fixture.run_jn(&["--robot", "new", "Taken"]);
    assert_eq!(output.code, Some(1));
    assert_eq!(output.json()["code"], "duplicate_title");
}

#[test]
fn test_new_in_unknown_notebook() {
    let fixture = JoplinFixture::new();
    let output = fixture.run_jn(&["--robot", "new", "Lost", "--notebook", "nowhere"]);
    assert_eq!(output.code, Some(2));
    assert_eq!(output.json()["code"], "notebook_not_found");
}

#[test]
fn test_new_without_index_still_writes_note() {
    let fixture = JoplinFixture::new();
    fixture.add_notebook("personal");

    let output = fixture.run_jn(&["--robot", "new", "Unindexed"]);
    output.assert_success("new without index");
    assert!(output.stderr.contains("jn index rebuild"));

    let id = output.json()["id"].as_str().unwrap().to_string();
    assert!(fixture.db().get_note(&id).unwrap().is_some());
}

#[test]
fn test_show_formats() {
    let fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("work");
    let a = fixture.add_note(&notebook, "First", "alpha body");
    let b = fixture.add_note(&notebook, "Second", "beta body");

    let output = fixture.run_jn(&["show", &a.id]);
    output.assert_success("show");
    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(lines[0], "First");
    assert_eq!(lines[1], "#work");
    assert!(lines[2].starts_with("mdate="));
    assert!(lines[3].starts_with("cdate="));
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "alpha body");

    let output = fixture.run_jn(&["--robot", "show", &b.id, "missing-id", &a.id]);
    output.assert_success("show several");
    let json = output.json();
    assert_eq!(json["count"], 2);
    assert_eq!(json["notes"][0]["note"]["id"], b.id.as_str());
    assert_eq!(json["notes"][1]["note"]["id"], a.id.as_str());
    assert_eq!(json["notes"][0]["notebook"], "work");

    let by_title = fixture.run_jn(&["show", "--title", "Second"]);
    by_title.assert_success("show by title");
    assert!(by_title.stdout.contains("beta body"));
}

#[test]
fn test_show_missing_note_exits_2() {
    let fixture = JoplinFixture::new();
    let output = fixture.run_jn(&["show", "0123456789abcdef0123456789abcdef"]);
    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("note not found"));
}

#[test]
fn test_delete_cascades_and_registers() {
    let fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("personal");
    let note = fixture.add_note(&notebook, "Doomed", "zebracorn");
    fixture.run_jn(&["index", "rebuild"]).assert_success("rebuild");
    assert_eq!(fixture.index_entry_count(&note.id), 1);

    fixture
        .run_jn(&["delete", &note.id])
        .assert_success("delete");

    let db = fixture.db();
    assert!(db.get_note(&note.id).unwrap().is_none());
    assert_eq!(fixture.index_entry_count(&note.id), 0);
    let (item_type, sync_target): (i64, i64) = db
        .conn()
        .query_row(
            "SELECT item_type, sync_target FROM deleted_items WHERE item_id = ?1",
            [&note.id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!((item_type, sync_target), (1, 7));

    let again = fixture.run_jn(&["delete", &note.id]);
    assert_eq!(again.code, Some(2));
}

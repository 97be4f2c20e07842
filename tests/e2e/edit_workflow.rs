//! E2E Scenario: editor round-trips
//!
//! The editor is a shell script that rewrites (or empties) the note file.

use super::common::JoplinFixture;

const REWRITE: &str = "printf 'Renamed\\n#personal\\nmdate=x\\ncdate=x\\n\\nfresh kumquat body\\n' > \"$1\"\n";

#[test]
fn test_edit_saves_and_reindexes() {
    let mut fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("personal");
    let note = fixture.add_note(&notebook, "Original", "stale body");
    fixture.run_jn(&["index", "rebuild"]).assert_success("rebuild");
    fixture.set_editor_script(REWRITE);

    let output = fixture.run_jn(&["--robot", "edit", &note.id]);
    output.assert_success("edit");
    assert_eq!(output.json()["outcome"], "saved");

    let stored = fixture.db().get_note(&note.id).unwrap().unwrap();
    assert_eq!(stored.title, "Renamed");
    assert_eq!(stored.body, "fresh kumquat body");
    assert!(stored.updated_time >= note.updated_time);

    let search = fixture.run_jn(&["--robot", "search", "kumquat"]);
    assert_eq!(search.json()["hits"][0]["id"], note.id.as_str());
    assert!(!fixture.edit_dir.join(&note.id).exists());
}

#[test]
fn test_edit_by_title_unchanged() {
    let fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("personal");
    let note = fixture.add_note(&notebook, "Stable", "same body");

    let output = fixture.run_jn(&["--robot", "edit", "--title", "Stable"]);
    output.assert_success("edit by title");
    assert_eq!(output.json()["outcome"], "unchanged");

    let stored = fixture.db().get_note(&note.id).unwrap().unwrap();
    assert_eq!(stored.updated_time, note.updated_time);
}

#[test]
fn test_emptied_note_is_deleted() {
    let mut fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("personal");
    let note = fixture.add_note(&notebook, "Scratch", "temporary");
    fixture.set_editor_script(": > \"$1\"\n");

    let output = fixture.run_jn(&["--robot", "edit", &note.id]);
    output.assert_success("edit to empty");
    assert_eq!(output.json()["outcome"], "deleted");
    assert!(fixture.db().get_note(&note.id).unwrap().is_none());
}

#[test]
fn test_failed_editor_locks_note() {
    let mut fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("personal");
    let note = fixture.add_note(&notebook, "Fragile", "body");
    fixture.set_editor_script("exit 1\n");

    let output = fixture.run_jn(&["--robot", "edit", &note.id]);
    assert_eq!(output.code, Some(1));
    assert_eq!(output.json()["code"], "editor");

    let again = fixture.run_jn(&["--robot", "edit", &note.id]);
    assert_eq!(again.json()["code"], "already_under_edit");
}

#[test]
fn test_new_and_edit_uses_edit_notebook() {
    let mut fixture = JoplinFixture::new();
    fixture.add_notebook("personal");
    fixture.add_notebook("search");
    fixture.set_editor_script(
        "printf 'Fresh\\n#search\\nmdate=x\\ncdate=x\\n\\nwritten in editor\\n' > \"$1\"\n",
    );

    let output = fixture.run_jn(&["--robot", "new", "Fresh", "--edit"]);
    output.assert_success("new --edit");
    let json = output.json();
    assert_eq!(json["notebook"], "search");
    assert_eq!(json["edit"], "saved");

    let id = json["id"].as_str().unwrap();
    let stored = fixture.db().get_note(id).unwrap().unwrap();
    assert_eq!(stored.body, "written in editor");
}

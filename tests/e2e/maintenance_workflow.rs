//! E2E Scenario: housekeeping commands
//!
//! - empty lists and deletes notes without a body
//! - conflicts list and rename
//! - notebook lookup
//! - lucky extracts the solution stub

use super::common::JoplinFixture;

#[test]
fn test_empty_notes() {
    let fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("personal");
    let blank_b = fixture.add_note(&notebook, "b-blank", "");
    let blank_a = fixture.add_note(&notebook, "a-blank", "");
    let full = fixture.add_note(&notebook, "full", "content");

    let output = fixture.run_jn(&["--robot", "empty"]);
    output.assert_success("empty");
    let json = output.json();
    assert_eq!(json["count"], 2);
    assert_eq!(json["notes"][0]["id"], blank_a.id.as_str());
    assert_eq!(json["notes"][1]["id"], blank_b.id.as_str());

    fixture
        .run_jn(&["empty", "--delete"])
        .assert_success("empty --delete");
    let db = fixture.db();
    assert!(db.get_note(&blank_a.id).unwrap().is_none());
    assert!(db.get_note(&blank_b.id).unwrap().is_none());
    assert!(db.get_note(&full.id).unwrap().is_some());
}

#[test]
fn test_conflicts_list_and_rename() {
    let fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("personal");
    let plain = fixture.add_note(&notebook, "Clash", "mine");
    let tagged = fixture.add_note(&notebook, "Clash (CONFLICT)", "theirs");
    let _normal = fixture.add_note(&notebook, "Calm", "fine");
    fixture.mark_conflict(&plain.id);
    fixture.mark_conflict(&tagged.id);

    let list = fixture.run_jn(&["--robot", "conflicts", "list"]);
    list.assert_success("conflicts list");
    assert_eq!(list.json()["count"], 2);

    let rename = fixture.run_jn(&["--robot", "conflicts", "rename"]);
    rename.assert_success("conflicts rename");
    let json = rename.json();
    assert_eq!(json["renamed"].as_array().unwrap().len(), 1);
    assert_eq!(json["renamed"][0]["title"], "Clash (CONFLICT)");

    let db = fixture.db();
    assert_eq!(db.get_note(&plain.id).unwrap().unwrap().title, "Clash (CONFLICT)");
    assert_eq!(db.get_note(&tagged.id).unwrap().unwrap().title, "Clash (CONFLICT)");
}

#[test]
fn test_notebook_lookup() {
    let fixture = JoplinFixture::new();
    let id = fixture.add_notebook("Reading list");

    let output = fixture.run_jn(&["notebook", "Reading", "list"]);
    output.assert_success("notebook");
    let lines: Vec<&str> = output.stdout.lines().collect();
    assert_eq!(lines, vec![id.as_str(), "Reading list"]);

    let missing = fixture.run_jn(&["notebook", "nope"]);
    assert_eq!(missing.code, Some(2));
}

#[test]
fn test_lucky_prints_stub() {
    let fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("personal");
    let note = fixture.add_note(
        &notebook,
        "untar",
        "How to extract\n\n# Solution\nUse:\n```bash\ntar xzf archive.tar.gz\n```\n",
    );

    let output = fixture.run_jn(&["lucky", &note.id]);
    output.assert_success("lucky");
    assert_eq!(output.stdout, "tar xzf archive.tar.gz\n");

    let plain = fixture.add_note(&notebook, "no solution", "just prose");
    let robot = fixture.run_jn(&["--robot", "lucky", &plain.id]);
    robot.assert_success("lucky without stub");
    assert!(robot.json()["stub"].is_null());
}

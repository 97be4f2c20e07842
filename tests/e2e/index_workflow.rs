//! E2E Scenario: index maintenance
//!
//! - rebuild is repeatable and reports the indexed count
//! - check reports a missing table, drift, and a consistent index

use super::common::JoplinFixture;

#[test]
fn test_rebuild_is_repeatable() {
    let fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("personal");
    let note = fixture.add_note(&notebook, "A", "alpha");

    for _ in 0..2 {
        let output = fixture.run_jn(&["--robot", "index", "rebuild"]);
        output.assert_success("rebuild");
        assert_eq!(output.json()["indexed"], 1);
    }
    assert_eq!(fixture.index_entry_count(&note.id), 1);
    assert_eq!(fixture.db().note_count().unwrap(), 1);
}

#[test]
fn test_check_reports_state() {
    let fixture = JoplinFixture::new();
    let notebook = fixture.add_notebook("personal");
    fixture.add_note(&notebook, "A", "alpha");

    let missing = fixture.run_jn(&["--robot", "index", "check"]);
    missing.assert_success("check without table");
    let json = missing.json();
    assert_eq!(json["consistent"], false);
    assert_eq!(json["report"]["exists"], false);

    fixture.run_jn(&["index", "rebuild"]).assert_success("rebuild");
    let clean = fixture.run_jn(&["--robot", "index", "check"]);
    assert_eq!(clean.json()["consistent"], true);

    // A note written behind jn's back (e.g. by the sync engine) is drift.
    let late = fixture.add_note(&notebook, "B", "beta");
    let drift = fixture.run_jn(&["--robot", "index", "check"]);
    let json = drift.json();
    assert_eq!(json["consistent"], false);
    assert_eq!(json["report"]["missing"][0], late.id.as_str());

    let human = fixture.run_jn(&["index", "check"]);
    human.assert_success("human check");
    assert!(human.stdout.contains("jn index rebuild"));
}

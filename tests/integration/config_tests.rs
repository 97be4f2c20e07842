use std::path::{Path, PathBuf};

use jnotes::config::Config;
use jnotes::search::ExpansionOrder;
use jnotes::test_utils::{TestCase, run_table_tests};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/configs")
        .join(name)
}

#[test]
fn test_config_fixtures() {
    let cases = vec![
        TestCase {
            name: "minimal file keeps defaults",
            input: "minimal.toml",
            expected: (5000, 0, ExpansionOrder::Declared, "personal".to_string(), Some(7)),
        },
        TestCase {
            name: "full file overrides every section",
            input: "full.toml",
            expected: (250, 20, ExpansionOrder::TypedFirst, "inbox".to_string(), None),
        },
    ];

    run_table_tests(cases, |name| {
        let config = Config::load(Some(&fixture(name))).expect("load fixture");
        let sync_target = config.deletion_sync_target();
        (
            config.database.busy_timeout_ms,
            config.search.limit,
            config.search.expansion_order,
            config.notes.default_notebook,
            sync_target,
        )
    })
    .unwrap();
}

#[test]
fn test_full_config_paths_and_snippets() {
    let config = Config::load(Some(&fixture("full.toml"))).unwrap();
    assert_eq!(
        config.database_path().unwrap(),
        PathBuf::from("/srv/joplin/database.sqlite")
    );
    assert_eq!(
        config.synonyms_path().unwrap(),
        PathBuf::from("/srv/joplin/synonyms.txt")
    );
    assert_eq!(config.editor.command, "nvim {path}");
    assert_eq!(config.notes.new_and_edit_notebook, "scratch");

    let style = config.snippet_style();
    assert_eq!(style.start, "<b>");
    assert_eq!(style.end, "</b>");
    assert_eq!(style.tokens, 8);
}

#[test]
fn test_unknown_expansion_order_is_rejected() {
    let err = Config::load(Some(&fixture("bad_order.toml"))).unwrap_err();
    assert_eq!(err.code(), "config");
    assert!(err.to_string().contains("bad_order.toml"));
}

#[test]
fn test_missing_explicit_config() {
    let err = Config::load(Some(&fixture("absent.toml"))).unwrap_err();
    assert_eq!(err.code(), "config");
}

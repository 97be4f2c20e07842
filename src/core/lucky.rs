//! "I'm feeling lucky": pull the first code stub out of a note's Solution section.

use std::sync::LazyLock;

use regex::Regex;

static FENCED_SOLUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)#?\s*Solution.*?```.*?\n(.*?)```").expect("valid fenced-solution regex")
});

static INLINE_SOLUTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)#?\s*Solution.*?`(.*?)`").expect("valid inline-solution regex")
});

/// Find the first code stub following a `Solution` heading.
///
/// A fenced block wins over inline backticks. Surrounding newlines are
/// stripped so the stub can be pasted into a shell safely.
#[must_use]
pub fn extract_stub(body: &str) -> Option<String> {
    [&*FENCED_SOLUTION, &*INLINE_SOLUTION]
        .into_iter()
        .filter_map(|re| re.captures(body).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str())
        .find(|stub| !stub.is_empty())
        .map(|stub| stub.trim_matches('\n').to_string())
}

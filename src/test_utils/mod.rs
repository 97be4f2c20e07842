//! Shared test utilities for jn.

pub mod fixtures;
pub mod logging;

pub use fixtures::UnitTestFixture;

/// One row of a table-driven test.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

/// Run every row through `test_fn` and report all mismatching rows at once.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E,
{
    let total = cases.len();
    let failures: Vec<String> = cases
        .into_iter()
        .filter_map(|case| {
            let shown = format!("{:?}", case.input);
            let actual = test_fn(case.input);
            if actual == case.expected {
                println!("[TEST] ok: {}", case.name);
                None
            } else {
                Some(format!(
                    "{}: input {shown}, expected {:?}, got {actual:?}",
                    case.name, case.expected
                ))
            }
        })
        .collect();

    if failures.is_empty() {
        return Ok(());
    }
    Err(format!(
        "{} of {total} cases failed:\n  {}",
        failures.len(),
        failures.join("\n  ")
    ))
}

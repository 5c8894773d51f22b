//! Shared test utilities for skilldex.

pub mod fixtures;
pub mod logging;

/// Table-driven test case structure.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
    pub should_panic: bool,
}

/// Run table-driven tests, printing each case as it runs.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F)
where
    I: std::fmt::Debug + Clone,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E,
{
    for case in cases {
        let start = std::time::Instant::now();
        println!("[TEST] Running: {}", case.name);
        println!("[TEST] Input: {:?}", case.input);

        let input = case.input.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| test_fn(input)));
        let elapsed = start.elapsed();

        if case.should_panic {
            assert!(result.is_err(), "case '{}' expected panic", case.name);
            println!("[TEST] PASSED (panicked as expected): {} ({elapsed:?})\n", case.name);
            continue;
        }

        let Ok(actual) = result else {
            panic!("case '{}' panicked unexpectedly", case.name);
        };

        println!("[TEST] Expected: {:?}", case.expected);
        println!("[TEST] Actual: {actual:?}");

        assert_eq!(actual, case.expected, "case '{}' failed", case.name);
        println!("[TEST] PASSED: {} ({elapsed:?})\n", case.name);
    }
}

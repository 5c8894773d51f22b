use std::time::Instant;

/// Prints a framed trace of a test's inputs and outcome.
pub struct TestLogger {
    test_name: String,
    start_time: Instant,
}

impl TestLogger {
    pub fn new(test_name: &str) -> Self {
        let separator = "=".repeat(60);
        println!("\n{separator}");
        println!("[TEST START] {test_name}");
        println!("{separator}");
        Self {
            test_name: test_name.to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn log_input<T: std::fmt::Debug>(&self, name: &str, value: &T) {
        println!("[INPUT] {name}: {value:?}");
    }

    pub fn log_step(&self, step: &str) {
        println!("[STEP +{:?}] {step}", self.start_time.elapsed());
    }

    pub fn log_actual<T: std::fmt::Debug>(&self, value: &T) {
        println!("[ACTUAL] {value:?}");
    }

    pub fn pass(&self) {
        println!("[RESULT] {} PASSED in {:?}", self.test_name, self.start_time.elapsed());
        println!("{}\n", "=".repeat(60));
    }
}

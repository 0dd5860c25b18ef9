//! pixelpaint-test - Regression test harness
//!
//! Collects comparison failures across one `tests/*_reg.rs` file instead of
//! aborting on the first mismatch, then reports them all in `cleanup()`.
//!
//! # Usage
//!
//! ```
//! use pixelpaint_test::RegParams;
//!
//! let mut rp = RegParams::new("example");
//! rp.compare_values(4.0, 2.0 + 2.0, 0.0);
//! assert!(rp.cleanup());
//! ```

use pixelpaint_core::PixelBuffer;

/// Regression test state: test name, comparison index, recorded failures.
pub struct RegParams {
    test_name: String,
    index: usize,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create a harness for the named test.
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Current comparison index (incremented before each comparison).
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two byte slices for exact equality.
    pub fn compare_bytes(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.index += 1;
        if expected != actual {
            self.fail(format!(
                "Failure in {}_reg: byte comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            ));
            false
        } else {
            true
        }
    }

    /// Compare two pixel buffers for identical size and contents.
    pub fn compare_buf(&mut self, expected: &PixelBuffer, actual: &PixelBuffer) -> bool {
        self.index += 1;
        if expected.width() != actual.width() || expected.height() != actual.height() {
            self.fail(format!(
                "Failure in {}_reg: buffer comparison for index {} - dimension mismatch",
                self.test_name, self.index
            ));
            return false;
        }
        for y in 0..expected.height() as i32 {
            for x in 0..expected.width() as i32 {
                if expected.get(x, y) != actual.get(x, y) {
                    self.fail(format!(
                        "Failure in {}_reg: buffer comparison for index {} - pixel mismatch at ({}, {})",
                        self.test_name, self.index, x, y
                    ));
                    return false;
                }
            }
        }
        true
    }

    /// Assert a boolean condition with a label.
    pub fn assert_true(&mut self, cond: bool, label: &str) -> bool {
        self.index += 1;
        if !cond {
            self.fail(format!(
                "Failure in {}_reg: condition '{}' false for index {}",
                self.test_name, label, self.index
            ));
        }
        cond
    }

    /// Report results. Returns true when every comparison passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();
        self.success
    }

    /// Check if all comparisons have passed so far.
    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("harness");
        assert!(rp.compare_values(1.0, 1.0, 0.0));
        assert!(rp.compare_values(1.0, 1.4, 0.5));
        assert!(!rp.compare_values(1.0, 2.0, 0.5));
        assert!(!rp.is_success());
    }

    #[test]
    fn test_compare_buf_mismatch() {
        let a = PixelBuffer::new(2, 2).unwrap();
        let mut b = PixelBuffer::new(2, 2).unwrap();
        b.set(1, 1, 3);
        let mut rp = RegParams::new("harness");
        assert!(!rp.compare_buf(&a, &b));
    }
}

//! Conformance report types: results, severity levels, and report aggregation.

use std::fmt;

/// Severity level of a conformance check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The check passed.
    Pass,
    /// The check found something worth attention that does not break
    /// conformance.
    Warning,
    /// The check failed.
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Pass => "PASS",
            Severity::Warning => "WARN",
            Severity::Failure => "FAIL",
        })
    }
}

/// A single conformance check result.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Short identifier of the validator, e.g. `engine/closure`.
    pub validator: String,
    /// What was checked and how it came out.
    pub message: String,
    /// Severity of the result.
    pub severity: Severity,
    /// Offending terms, lines or configurations, if any.
    pub details: Vec<String>,
}

impl TestResult {
    /// Creates a passing result.
    pub fn pass(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Pass, Vec::new())
    }

    /// Creates a failure result.
    pub fn fail(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Failure, Vec::new())
    }

    /// Creates a failure result listing the offending items.
    pub fn fail_with_details(
        validator: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self::new(validator, message, Severity::Failure, details)
    }

    /// Creates a warning result.
    pub fn warn(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Warning, Vec::new())
    }

    /// Passes when `violations` is empty, otherwise fails listing them.
    pub fn from_violations(
        validator: impl Into<String>,
        passed: impl Into<String>,
        failed: impl Into<String>,
        violations: Vec<String>,
    ) -> Self {
        if violations.is_empty() {
            Self::pass(validator, passed)
        } else {
            Self::fail_with_details(validator, failed, violations)
        }
    }

    fn new(
        validator: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        details: Vec<String>,
    ) -> Self {
        Self {
            validator: validator.into(),
            message: message.into(),
            severity,
            details,
        }
    }

    /// Returns true if this result represents a failure.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.severity, self.validator, self.message
        )?;
        for detail in &self.details {
            write!(f, "\n    {detail}")?;
        }
        Ok(())
    }
}

/// Aggregated conformance report from all validators.
#[derive(Debug, Default)]
pub struct ConformanceReport {
    /// All individual results, in the order the validators ran.
    pub results: Vec<TestResult>,
}

impl ConformanceReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result to this report.
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Extends this report with results from another report.
    pub fn extend(&mut self, other: ConformanceReport) {
        self.results.extend(other.results);
    }

    /// Number of results with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.results
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }

    /// Returns the count of failed checks.
    pub fn failure_count(&self) -> usize {
        self.count(Severity::Failure)
    }

    /// Returns true if all checks passed (no failures).
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }

    /// One-line tally, e.g. `25 passed, 1 warning, 0 failed`.
    pub fn summary(&self) -> String {
        let warnings = self.count(Severity::Warning);
        format!(
            "{} passed, {} warning{}, {} failed",
            self.count(Severity::Pass),
            warnings,
            if warnings == 1 { "" } else { "s" },
            self.failure_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally() {
        let mut report = ConformanceReport::new();
        report.push(TestResult::pass("a", "ok"));
        report.push(TestResult::warn("b", "hm"));
        assert!(report.all_passed());
        assert_eq!(report.summary(), "1 passed, 1 warning, 0 failed");

        report.push(TestResult::from_violations("c", "ok", "bad", vec!["x".to_owned()]));
        assert!(!report.all_passed());
        assert_eq!(report.failure_count(), 1);
    }

    #[test]
    fn display_lists_details() {
        let r = TestResult::fail_with_details("engine/closure", "2 terms", vec!["s 00".to_owned()]);
        assert_eq!(r.to_string(), "[FAIL] engine/closure: 2 terms\n    s 00");
    }
}

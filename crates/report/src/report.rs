//! Ordered aggregate of check results for one run.

use crate::check::CheckResult;
use serde::{Deserialize, Serialize};
use shipcheck_common::Timestamp;

/// Pass/fail counts of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

/// Accumulates results in execution order.
///
/// Counts are only ever changed by [`Report::push`], so
/// `passed_count() + failed_count() == total()` holds at all times.
#[derive(Debug, Clone)]
pub struct Report {
    results: Vec<CheckResult>,
    passed: usize,
    failed: usize,
    started_at: Timestamp,
    finished_at: Option<Timestamp>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            passed: 0,
            failed: 0,
            started_at: Timestamp::now(),
            finished_at: None,
        }
    }

    /// Append one outcome.
    pub fn record(&mut self, label: impl Into<String>, passed: bool, detail: impl Into<String>) {
        self.push(CheckResult::new(label, passed, detail));
    }

    pub fn push(&mut self, result: CheckResult) {
        if result.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    pub fn extend(&mut self, results: impl IntoIterator<Item = CheckResult>) {
        for result in results {
            self.push(result);
        }
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn passed_count(&self) -> usize {
        self.passed
    }

    pub fn failed_count(&self) -> usize {
        self.failed
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            passed: self.passed,
            failed: self.failed,
            total: self.total(),
        }
    }

    /// True when nothing failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Process exit status for this report: 0 when every check passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<Timestamp> {
        self.finished_at
    }

    /// Stamp the end of the run.
    pub fn finish(&mut self) {
        self.finished_at = Some(Timestamp::now());
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

//! Single verification outcome.

use serde::{Deserialize, Serialize};

/// One pass/fail verdict.
///
/// `detail` is empty when there is nothing to add. Failed checks carry the
/// cause whenever one is known; passing checks may carry the observed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    label: String,
    passed: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    detail: String,
}

impl CheckResult {
    pub fn new(label: impl Into<String>, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            passed,
            detail: detail.into(),
        }
    }

    pub fn pass(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(label, true, detail)
    }

    pub fn fail(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(label, false, detail)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn has_detail(&self) -> bool {
        !self.detail.is_empty()
    }
}

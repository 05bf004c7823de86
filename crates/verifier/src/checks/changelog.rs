//! Changelog entry for the release.

use super::Check;
use crate::parsers::changelog_has_entry;
use async_trait::async_trait;
use shipcheck_common::{ReleaseVersion, Result};
use shipcheck_report::CheckResult;
use std::path::PathBuf;

pub const LABEL: &str = "CHANGELOG.md entry found";

pub struct ChangelogCheck {
    path: PathBuf,
}

impl ChangelogCheck {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Check for ChangelogCheck {
    fn name(&self) -> &'static str {
        "changelog"
    }

    fn labels(&self) -> Vec<String> {
        vec![LABEL.to_string()]
    }

    async fn run(&self, version: &ReleaseVersion) -> Result<Vec<CheckResult>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                return Ok(vec![CheckResult::fail(
                    LABEL,
                    format!("{}: {}", self.path.display(), e),
                )])
            }
        };

        let result = match changelog_has_entry(&content, version.as_str()) {
            Ok(true) => CheckResult::pass(LABEL, ""),
            Ok(false) => CheckResult::fail(LABEL, format!("no \"## [{}]\" heading", version)),
            Err(e) => CheckResult::fail(LABEL, e.to_string()),
        };
        Ok(vec![result])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run_with(content: Option<&str>, version: &str) -> CheckResult {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        if let Some(content) = content {
            std::fs::write(&path, content).unwrap();
        }
        let mut results = ChangelogCheck::new(&path)
            .run(&ReleaseVersion::new(version).unwrap())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        results.remove(0)
    }

    #[tokio::test]
    async fn test_entry_found() {
        let result = run_with(Some("# Changelog\n\n## [1.2.0]\n- fixes\n"), "1.2.0").await;
        assert_eq!(result, CheckResult::pass(LABEL, ""));
    }

    #[tokio::test]
    async fn test_other_version_only() {
        let result = run_with(Some("## [1.2.1]\n"), "1.2.0").await;
        assert!(!result.passed());
        assert_eq!(result.detail(), "no \"## [1.2.0]\" heading");
    }

    #[tokio::test]
    async fn test_metacharacters_match_literally() {
        assert!(run_with(Some("## [1.2+0]\n"), "1.2+0").await.passed());
        assert!(!run_with(Some("## [1.220]\n"), "1.2+0").await.passed());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = run_with(None, "1.2.0").await;
        assert!(!result.passed());
        assert!(result.detail().contains("CHANGELOG.md"));
    }
}

//! Homebrew cask version.

use super::Check;
use crate::parsers::cask_version;
use async_trait::async_trait;
use shipcheck_common::{ReleaseVersion, Result};
use shipcheck_report::CheckResult;
use std::io::ErrorKind;
use std::path::PathBuf;

pub const LABEL: &str = "Homebrew cask version";

pub struct CaskCheck {
    path: PathBuf,
}

impl CaskCheck {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Check for CaskCheck {
    fn name(&self) -> &'static str {
        "homebrew cask"
    }

    fn labels(&self) -> Vec<String> {
        vec![LABEL.to_string()]
    }

    async fn run(&self, version: &ReleaseVersion) -> Result<Vec<CheckResult>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(vec![CheckResult::fail(
                    LABEL,
                    format!("file not found: {}", self.path.display()),
                )])
            }
            Err(e) => {
                return Ok(vec![CheckResult::fail(
                    LABEL,
                    format!("{}: {}", self.path.display(), e),
                )])
            }
        };

        let result = match cask_version(&content) {
            None => CheckResult::fail(
                LABEL,
                format!("no version declaration in {}", self.path.display()),
            ),
            Some(found) if found == version.as_str() => CheckResult::pass(LABEL, found),
            Some(found) => CheckResult::fail(LABEL, format!("{} (expected {})", found, version)),
        };
        Ok(vec![result])
    }
}

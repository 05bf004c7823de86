//! GitHub release and its uploaded asset.
//!
//! Always yields two results. When the release itself cannot be found the
//! asset result is still recorded, failed with "release not found".

use super::{describe_failure, execute, Check};
use crate::commands::ReleaseCommands;
use crate::executor::Executor;
use crate::parsers::parse_release_assets;
use async_trait::async_trait;
use shipcheck_common::{ReleaseVersion, Result};
use shipcheck_report::CheckResult;
use std::sync::Arc;
use tracing::debug;

pub const RELEASE_LABEL: &str = "GitHub release exists";
pub const RELEASE_NOT_FOUND: &str = "release not found";

pub struct ReleaseHostCheck {
    executor: Arc<dyn Executor>,
    commands: ReleaseCommands,
    repo: Option<String>,
    asset: String,
}

impl ReleaseHostCheck {
    pub fn new(executor: Arc<dyn Executor>, repo: Option<String>, asset: impl Into<String>) -> Self {
        Self {
            executor,
            commands: ReleaseCommands::new(),
            repo,
            asset: asset.into(),
        }
    }

    fn asset_label(&self) -> String {
        format!("Release asset {} uploaded", self.asset)
    }

    /// Whether the release exists, as a result for the first label.
    async fn release_exists(&self, repo: &str, tag: &str) -> CheckResult {
        let invocation = match self.commands.view_release(repo, tag) {
            Ok(invocation) => invocation,
            Err(e) => return CheckResult::fail(RELEASE_LABEL, e.to_string()),
        };

        match execute(self.executor.as_ref(), &invocation).await {
            Ok(output) if output.success() => CheckResult::pass(RELEASE_LABEL, tag),
            Ok(output) => {
                CheckResult::fail(RELEASE_LABEL, format!("{}: {}", tag, describe_failure(&output)))
            }
            Err(e) => CheckResult::fail(RELEASE_LABEL, e.to_string()),
        }
    }

    async fn asset_uploaded(&self, repo: &str, tag: &str) -> CheckResult {
        let label = self.asset_label();
        let invocation = match self.commands.list_release_assets(repo, tag) {
            Ok(invocation) => invocation,
            Err(e) => return CheckResult::fail(label, e.to_string()),
        };

        let output = match execute(self.executor.as_ref(), &invocation).await {
            Ok(output) if output.success() => output,
            Ok(output) => {
                return CheckResult::fail(label, format!("listing assets failed, {}", describe_failure(&output)))
            }
            Err(e) => return CheckResult::fail(label, e.to_string()),
        };

        let assets = match parse_release_assets(&output.stdout) {
            Ok(assets) => assets,
            Err(e) => return CheckResult::fail(label, format!("unreadable asset list: {}", e)),
        };
        debug!("Release {} assets: {:?}", tag, assets);

        if assets.iter().any(|name| name == &self.asset) {
            CheckResult::pass(label, "")
        } else if assets.is_empty() {
            CheckResult::fail(label, "no assets uploaded")
        } else {
            CheckResult::fail(label, format!("found only: {}", assets.join(", ")))
        }
    }
}

#[async_trait]
impl Check for ReleaseHostCheck {
    fn name(&self) -> &'static str {
        "release host"
    }

    fn labels(&self) -> Vec<String> {
        vec![RELEASE_LABEL.to_string(), self.asset_label()]
    }

    async fn run(&self, version: &ReleaseVersion) -> Result<Vec<CheckResult>> {
        let tag = version.tag();

        let Some(repo) = self.repo.as_deref() else {
            return Ok(vec![
                CheckResult::fail(RELEASE_LABEL, "no release repository configured"),
                CheckResult::fail(self.asset_label(), RELEASE_NOT_FOUND),
            ]);
        };

        let exists = self.release_exists(repo, &tag).await;
        let asset = if exists.passed() {
            self.asset_uploaded(repo, &tag).await
        } else {
            CheckResult::fail(self.asset_label(), RELEASE_NOT_FOUND)
        };

        Ok(vec![exists, asset])
    }
}

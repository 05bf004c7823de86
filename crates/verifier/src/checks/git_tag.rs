//! Local git tag for the release.

use super::{describe_failure, execute, Check};
use crate::commands::ReleaseCommands;
use crate::executor::Executor;
use crate::parsers::tag_listed;
use async_trait::async_trait;
use shipcheck_common::{ReleaseVersion, Result};
use shipcheck_report::CheckResult;
use std::sync::Arc;

pub const LABEL: &str = "Git tag exists";

pub struct GitTagCheck {
    executor: Arc<dyn Executor>,
    commands: ReleaseCommands,
}

impl GitTagCheck {
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            commands: ReleaseCommands::new(),
        }
    }
}

#[async_trait]
impl Check for GitTagCheck {
    fn name(&self) -> &'static str {
        "git tag"
    }

    fn labels(&self) -> Vec<String> {
        vec![LABEL.to_string()]
    }

    async fn run(&self, version: &ReleaseVersion) -> Result<Vec<CheckResult>> {
        let tag = version.tag();

        let invocation = match self.commands.list_tag(&tag) {
            Ok(invocation) => invocation,
            Err(e) => return Ok(vec![CheckResult::fail(LABEL, e.to_string())]),
        };

        let result = match execute(self.executor.as_ref(), &invocation).await {
            Ok(output) if !output.success() => {
                CheckResult::fail(LABEL, format!("git tag failed, {}", describe_failure(&output)))
            }
            Ok(output) if tag_listed(&output.stdout, &tag) => CheckResult::pass(LABEL, tag),
            Ok(_) => CheckResult::fail(LABEL, format!("{} not found", tag)),
            Err(e) => CheckResult::fail(LABEL, e.to_string()),
        };
        Ok(vec![result])
    }
}

//! Gatekeeper assessment of the built app bundle.

use super::{execute, Check};
use crate::commands::ReleaseCommands;
use crate::executor::Executor;
use crate::parsers::assessment_accepted;
use async_trait::async_trait;
use shipcheck_common::{ReleaseVersion, Result};
use shipcheck_report::CheckResult;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub const LABEL: &str = "App notarization valid";

pub struct NotarizationCheck {
    executor: Arc<dyn Executor>,
    commands: ReleaseCommands,
    bundle: PathBuf,
}

impl NotarizationCheck {
    pub fn new(executor: Arc<dyn Executor>, bundle: impl Into<PathBuf>) -> Self {
        Self {
            executor,
            commands: ReleaseCommands::new(),
            bundle: bundle.into(),
        }
    }
}

#[async_trait]
impl Check for NotarizationCheck {
    fn name(&self) -> &'static str {
        "notarization"
    }

    fn labels(&self) -> Vec<String> {
        vec![LABEL.to_string()]
    }

    async fn run(&self, _version: &ReleaseVersion) -> Result<Vec<CheckResult>> {
        if !self.bundle.is_dir() {
            debug!("App bundle {:?} not present, skipping assessment", self.bundle);
            return Ok(vec![CheckResult::fail(
                LABEL,
                format!("app not found: {}", self.bundle.display()),
            )]);
        }

        let invocation = self.commands.assess_bundle(&self.bundle);
        let result = match execute(self.executor.as_ref(), &invocation).await {
            Ok(output) => {
                // spctl reports its verdict on stderr.
                let combined = output.combined();
                if assessment_accepted(&combined) {
                    CheckResult::pass(LABEL, "accepted")
                } else if combined.trim().is_empty() {
                    CheckResult::fail(
                        LABEL,
                        format!("no assessment output ({})", super::describe_failure(&output)),
                    )
                } else {
                    CheckResult::fail(LABEL, combined.trim())
                }
            }
            Err(e) => CheckResult::fail(LABEL, e.to_string()),
        };
        Ok(vec![result])
    }
}

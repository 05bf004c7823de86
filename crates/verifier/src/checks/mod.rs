//! Release checks.
//!
//! Each check reads one source and turns it into one or more
//! [`CheckResult`]s. Source-level failures (missing files, failed commands,
//! network errors) become failed results; an `Err` from [`Check::run`] means
//! something unexpected went wrong inside the check itself.

pub mod appcast;
pub mod bundle;
pub mod cask;
pub mod changelog;
pub mod git_tag;
pub mod notarization;
pub mod release;

pub use appcast::AppcastCheck;
pub use bundle::BundleMetadataCheck;
pub use cask::CaskCheck;
pub use changelog::ChangelogCheck;
pub use git_tag::GitTagCheck;
pub use notarization::NotarizationCheck;
pub use release::ReleaseHostCheck;

use crate::commands::Invocation;
use crate::executor::{CommandOutput, Executor};
use async_trait::async_trait;
use shipcheck_common::{ReleaseVersion, Result};
use shipcheck_report::CheckResult;

/// One verification source.
#[async_trait]
pub trait Check: Send + Sync {
    /// Short name used in logs and fault reports.
    fn name(&self) -> &'static str;

    /// Labels of every result this check produces, in order.
    ///
    /// A check always emits exactly these labels, whatever the state of
    /// its source.
    fn labels(&self) -> Vec<String>;

    async fn run(&self, version: &ReleaseVersion) -> Result<Vec<CheckResult>>;
}

/// Run an allowlisted invocation through an executor.
pub(crate) async fn execute(
    executor: &dyn Executor,
    invocation: &Invocation,
) -> Result<CommandOutput> {
    executor.execute(invocation.program, &invocation.args).await
}

/// Describe a failed command for a result detail.
pub(crate) fn describe_failure(output: &CommandOutput) -> String {
    let stderr = output.stderr.trim();
    let status = match output.status {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    };
    if stderr.is_empty() {
        status
    } else {
        format!("{}: {}", status, stderr)
    }
}

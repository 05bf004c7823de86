//! Info.plist version and build number.

use super::Check;
use crate::parsers::read_bundle_versions;
use async_trait::async_trait;
use shipcheck_common::{ReleaseVersion, Result};
use shipcheck_report::CheckResult;
use std::path::PathBuf;
use tracing::debug;

pub const VERSION_LABEL: &str = "Info.plist version";
pub const BUILD_LABEL: &str = "Info.plist build";

/// Compares the bundle's display version to the release and requires a
/// non-empty build number.
pub struct BundleMetadataCheck {
    plist: PathBuf,
}

impl BundleMetadataCheck {
    pub fn new(plist: impl Into<PathBuf>) -> Self {
        Self {
            plist: plist.into(),
        }
    }
}

#[async_trait]
impl Check for BundleMetadataCheck {
    fn name(&self) -> &'static str {
        "bundle metadata"
    }

    fn labels(&self) -> Vec<String> {
        vec![VERSION_LABEL.to_string(), BUILD_LABEL.to_string()]
    }

    async fn run(&self, version: &ReleaseVersion) -> Result<Vec<CheckResult>> {
        debug!("Reading {:?}", self.plist);

        let versions = match read_bundle_versions(&self.plist) {
            Ok(versions) => versions,
            Err(e) => {
                let detail = format!("{}: {}", self.plist.display(), e);
                return Ok(vec![
                    CheckResult::fail(VERSION_LABEL, detail.clone()),
                    CheckResult::fail(BUILD_LABEL, detail),
                ]);
            }
        };

        let version_result = if versions.short_version.is_empty() {
            CheckResult::fail(VERSION_LABEL, "CFBundleShortVersionString missing")
        } else {
            CheckResult::new(
                VERSION_LABEL,
                versions.short_version == version.as_str(),
                versions.short_version.clone(),
            )
        };

        let build_result = if versions.build.is_empty() {
            CheckResult::fail(BUILD_LABEL, "CFBundleVersion missing")
        } else {
            CheckResult::pass(BUILD_LABEL, versions.build)
        };

        Ok(vec![version_result, build_result])
    }
}

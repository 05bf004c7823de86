//! Update feed (Sparkle appcast) mentions the release.
//!
//! The body is searched for the version as plain text rather than parsed,
//! since the feed carries the version in several serialized forms.

use super::Check;
use crate::fetch::FeedFetcher;
use async_trait::async_trait;
use shipcheck_common::{ReleaseVersion, Result};
use shipcheck_report::CheckResult;
use std::sync::Arc;

pub const LABEL: &str = "Appcast contains version";

pub struct AppcastCheck {
    fetcher: Arc<dyn FeedFetcher>,
    url: Option<String>,
}

impl AppcastCheck {
    pub fn new(fetcher: Arc<dyn FeedFetcher>, url: Option<String>) -> Self {
        Self { fetcher, url }
    }
}

#[async_trait]
impl Check for AppcastCheck {
    fn name(&self) -> &'static str {
        "appcast"
    }

    fn labels(&self) -> Vec<String> {
        vec![LABEL.to_string()]
    }

    async fn run(&self, version: &ReleaseVersion) -> Result<Vec<CheckResult>> {
        let Some(url) = self.url.as_deref() else {
            return Ok(vec![CheckResult::fail(LABEL, "no appcast URL configured")]);
        };

        let result = match self.fetcher.fetch(url).await {
            Ok(body) => CheckResult::new(LABEL, body.contains(version.as_str()), version.tag()),
            Err(e) => CheckResult::fail(LABEL, e.to_string()),
        };
        Ok(vec![result])
    }
}

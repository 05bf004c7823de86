//! Release verification orchestrator.

use crate::checks::{
    AppcastCheck, BundleMetadataCheck, CaskCheck, ChangelogCheck, Check, GitTagCheck,
    NotarizationCheck, ReleaseHostCheck,
};
use crate::config::ReleaseConfig;
use crate::executor::{Executor, LocalExecutor};
use crate::fetch::{FeedFetcher, HttpFeedFetcher};
use futures_util::FutureExt;
use shipcheck_common::{ReleaseVersion, Result};
use shipcheck_report::{CheckResult, Report};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Runs every check in a fixed order and collects a report.
pub struct Verifier {
    checks: Vec<Box<dyn Check>>,
}

impl Verifier {
    /// Create a verifier that runs the real release tooling.
    pub fn new(config: &ReleaseConfig) -> Result<Self> {
        let executor: Arc<dyn Executor> = Arc::new(LocalExecutor::new(
            config.project_root.clone(),
            config.command_timeout(),
        ));
        let fetcher: Arc<dyn FeedFetcher> = Arc::new(HttpFeedFetcher::new(
            config.feed_timeout(),
            &config.user_agent,
        )?);
        Ok(Self::with_sources(config, executor, fetcher))
    }

    /// Create a verifier over the given command and feed sources.
    pub fn with_sources(
        config: &ReleaseConfig,
        executor: Arc<dyn Executor>,
        fetcher: Arc<dyn FeedFetcher>,
    ) -> Self {
        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(BundleMetadataCheck::new(config.info_plist_path())),
            Box::new(ChangelogCheck::new(config.changelog_path())),
            Box::new(GitTagCheck::new(executor.clone())),
            Box::new(CaskCheck::new(config.cask_path())),
            Box::new(ReleaseHostCheck::new(
                executor.clone(),
                config.github_repo.clone(),
                config.release_asset_name(),
            )),
            Box::new(AppcastCheck::new(fetcher, config.appcast_url.clone())),
            Box::new(NotarizationCheck::new(executor, config.app_bundle_path())),
        ];
        Self::with_checks(checks)
    }

    pub fn with_checks(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    pub fn checks(&self) -> &[Box<dyn Check>] {
        &self.checks
    }

    /// Number of results every run produces.
    pub fn expected_total(&self) -> usize {
        self.checks.iter().map(|check| check.labels().len()).sum()
    }

    /// Run all checks sequentially.
    ///
    /// A check that returns an error or panics does not stop the run: each
    /// of its labels is recorded as failed and the next check starts.
    pub async fn run(&self, version: &ReleaseVersion) -> Report {
        info!("Validating release {}", version.tag());
        let mut report = Report::new();

        for check in &self.checks {
            debug!("Running {} check", check.name());

            let outcome = AssertUnwindSafe(check.run(version)).catch_unwind().await;
            let results = match outcome {
                Ok(Ok(results)) => results,
                Ok(Err(e)) => {
                    error!("{} check failed internally: {}", check.name(), e);
                    fault_results(check.as_ref(), &e.to_string())
                }
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    error!("{} check panicked: {}", check.name(), message);
                    fault_results(check.as_ref(), &message)
                }
            };

            for result in results {
                if result.passed() {
                    debug!("PASS {}", result.label());
                } else {
                    info!("FAIL {}: {}", result.label(), result.detail());
                }
                report.push(result);
            }
        }

        report.finish();
        let summary = report.summary();
        info!(
            "{}/{} checks passed for {}",
            summary.passed,
            summary.total,
            version.tag()
        );
        report
    }
}

fn fault_results(check: &dyn Check, message: &str) -> Vec<CheckResult> {
    check
        .labels()
        .into_iter()
        .map(|label| CheckResult::fail(label, format!("internal fault: {}", message)))
        .collect()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testing::{ScriptedExecutor, StaticFetcher};
    use async_trait::async_trait;
    use shipcheck_common::Error;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const EXPECTED_LABELS: [&str; 9] = [
        "Info.plist version",
        "Info.plist build",
        "CHANGELOG.md entry found",
        "Git tag exists",
        "Homebrew cask version",
        "GitHub release exists",
        "Release asset Bar.zip uploaded",
        "Appcast contains version",
        "App notarization valid",
    ];

    fn version() -> ReleaseVersion {
        ReleaseVersion::new("1.2.0").unwrap()
    }

    fn config(root: &Path) -> ReleaseConfig {
        ReleaseConfig {
            project_root: root.to_path_buf(),
            app_name: "Bar".to_string(),
            cask: Some(root.join("tap/Casks/bar.rb")),
            github_repo: Some("acme/bar".to_string()),
            appcast_url: Some("https://acme.github.io/bar/appcast.xml".to_string()),
            ..Default::default()
        }
    }

    fn write_release_fixture(root: &Path) {
        std::fs::create_dir_all(root.join("Distribution")).unwrap();
        std::fs::write(
            root.join("Distribution/Info.plist"),
            r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0"><dict>
<key>CFBundleShortVersionString</key><string>1.2.0</string>
<key>CFBundleVersion</key><string>120</string>
</dict></plist>"#,
        )
        .unwrap();
        std::fs::write(root.join("CHANGELOG.md"), "# Changelog\n\n## [1.2.0]\n- new\n").unwrap();
        std::fs::create_dir_all(root.join("tap/Casks")).unwrap();
        std::fs::write(root.join("tap/Casks/bar.rb"), "cask \"bar\" do\n  version \"1.2.0\"\nend\n")
            .unwrap();
        std::fs::create_dir_all(root.join("dist/Bar.app")).unwrap();
    }

    fn healthy_executor(root: &Path) -> ScriptedExecutor {
        let bundle = root.join("dist").join("Bar.app");
        ScriptedExecutor::new()
            .reply("git tag -l v1.2.0", 0, "v1.2.0\n", "")
            .reply("gh release view v1.2.0 --repo acme/bar", 0, "title: v1.2.0\n", "")
            .reply(
                "gh release view v1.2.0 --repo acme/bar --json assets",
                0,
                r#"{"assets":[{"name":"Bar.zip"}]}"#,
                "",
            )
            .reply(
                &format!("spctl --assess --verbose=2 {}", bundle.display()),
                0,
                "",
                "accepted\nsource=Notarized Developer ID\n",
            )
    }

    fn labels(report: &Report) -> Vec<String> {
        report.results().iter().map(|r| r.label().to_string()).collect()
    }

    #[tokio::test]
    async fn test_healthy_release_passes() {
        let dir = tempfile::tempdir().unwrap();
        write_release_fixture(dir.path());

        let verifier = Verifier::with_sources(
            &config(dir.path()),
            Arc::new(healthy_executor(dir.path())),
            Arc::new(StaticFetcher::body(r#"<enclosure sparkle:shortVersionString="1.2.0"/>"#)),
        );
        let report = verifier.run(&version()).await;

        assert_eq!(labels(&report), EXPECTED_LABELS);
        assert_eq!(report.failed_count(), 0, "{:?}", report.results());
        assert_eq!(report.exit_code(), 0);
        assert!(report.finished_at().is_some());
    }

    #[tokio::test]
    async fn test_nothing_reachable_still_reports_every_check() {
        let dir = tempfile::tempdir().unwrap();
        let verifier = Verifier::with_sources(
            &config(dir.path()),
            Arc::new(ScriptedExecutor::new()),
            Arc::new(StaticFetcher::error("connection refused")),
        );

        let report = verifier.run(&version()).await;
        assert_eq!(labels(&report), EXPECTED_LABELS);
        assert_eq!(report.total(), verifier.expected_total());
        assert_eq!(report.failed_count(), 9);
        assert_eq!(report.passed_count() + report.failed_count(), report.total());
        assert_eq!(report.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_feed_does_not_stop_later_checks() {
        let dir = tempfile::tempdir().unwrap();
        write_release_fixture(dir.path());
        let executor = Arc::new(healthy_executor(dir.path()));

        let verifier = Verifier::with_sources(
            &config(dir.path()),
            executor.clone(),
            Arc::new(StaticFetcher::error("request timed out")),
        );
        let report = verifier.run(&version()).await;

        assert_eq!(report.failed_count(), 1);
        assert!(!report.results()[7].passed());
        assert!(report.results()[8].passed());
        assert!(executor
            .calls()
            .last()
            .unwrap()
            .starts_with("spctl --assess"));
    }

    #[tokio::test]
    async fn test_idempotent_runs() {
        let dir = tempfile::tempdir().unwrap();
        write_release_fixture(dir.path());
        let verifier = Verifier::with_sources(
            &config(dir.path()),
            Arc::new(healthy_executor(dir.path())),
            Arc::new(StaticFetcher::body("1.1.0")),
        );

        let first = verifier.run(&version()).await;
        let second = verifier.run(&version()).await;
        assert_eq!(first.results(), second.results());
    }

    struct Faulty {
        panic: bool,
    }

    #[async_trait]
    impl Check for Faulty {
        fn name(&self) -> &'static str {
            "faulty"
        }

        fn labels(&self) -> Vec<String> {
            vec!["faulty one".to_string(), "faulty two".to_string()]
        }

        async fn run(&self, _version: &ReleaseVersion) -> Result<Vec<CheckResult>> {
            if self.panic {
                panic!("index out of bounds");
            }
            Err(Error::Other("parser state corrupted".to_string()))
        }
    }

    struct Counting {
        runs: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Check for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn labels(&self) -> Vec<String> {
            vec!["counted".to_string()]
        }

        async fn run(&self, _version: &ReleaseVersion) -> Result<Vec<CheckResult>> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            Ok(vec![CheckResult::pass("counted", "")])
        }
    }

    #[tokio::test]
    async fn test_faults_are_isolated() {
        let runs = Arc::new(AtomicUsize::new(0));
        let verifier = Verifier::with_checks(vec![
            Box::new(Faulty { panic: true }),
            Box::new(Faulty { panic: false }),
            Box::new(Counting { runs: runs.clone() }),
        ]);

        let report = verifier.run(&version()).await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert_eq!(report.total(), 5);
        assert_eq!(report.failed_count(), 4);
        assert_eq!(
            report.results()[0],
            CheckResult::fail("faulty one", "internal fault: index out of bounds")
        );
        assert_eq!(
            report.results()[3],
            CheckResult::fail("faulty two", "internal fault: parser state corrupted")
        );
        assert!(report.results()[4].passed());
    }
}

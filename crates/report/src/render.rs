//! Report rendering.

use crate::report::Report;
use shipcheck_common::{Error, ReleaseVersion, Result};
use std::fmt::Write;
use std::str::FromStr;

/// Output format for the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::Config(format!("unknown output format: {}", s))),
        }
    }
}

/// Render a report in the requested format.
pub fn render(format: OutputFormat, version: &ReleaseVersion, report: &Report) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(version, report)),
        OutputFormat::Json => render_json(version, report),
    }
}

/// Console report: header, one line per check, summary line.
pub fn render_text(version: &ReleaseVersion, report: &Report) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out);
    let _ = writeln!(out, "  Release Validation: {}", version.tag());
    let _ = writeln!(out, "  {:=<30}", "");

    for result in report.results() {
        let status = if result.passed() { "PASS" } else { "FAIL" };
        if result.has_detail() {
            let _ = writeln!(out, "  [{}] {}: {}", status, result.label(), result.detail());
        } else {
            let _ = writeln!(out, "  [{}] {}", status, result.label());
        }
    }

    let summary = report.summary();
    let _ = writeln!(out);
    let _ = write!(out, "  {}/{} checks passed.", summary.passed, summary.total);
    if summary.failed == 0 {
        let _ = writeln!(out, " Release is complete.");
    } else {
        let _ = writeln!(out, " {} check(s) failed, review above.", summary.failed);
    }

    out
}

/// Machine-readable report.
pub fn render_json(version: &ReleaseVersion, report: &Report) -> Result<String> {
    let value = serde_json::json!({
        "version": version,
        "tag": version.tag(),
        "started_at": report.started_at(),
        "finished_at": report.finished_at(),
        "summary": report.summary(),
        "results": report.results(),
    });

    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckResult;
    use pretty_assertions::assert_eq;

    fn version() -> ReleaseVersion {
        ReleaseVersion::new("1.2.0").unwrap()
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("html").is_err());
    }

    #[test]
    fn test_text_all_passed() {
        let mut report = Report::new();
        report.push(CheckResult::pass("Info.plist version", "1.2.0"));
        report.push(CheckResult::pass("CHANGELOG.md entry found", ""));

        let expected = "\n  Release Validation: v1.2.0\n  ==============================\n  [PASS] Info.plist version: 1.2.0\n  [PASS] CHANGELOG.md entry found\n\n  2/2 checks passed. Release is complete.\n";
        assert_eq!(render_text(&version(), &report), expected);
    }

    #[test]
    fn test_text_with_failures() {
        let mut report = Report::new();
        report.push(CheckResult::pass("Git tag exists", "v1.2.0"));
        report.push(CheckResult::fail("GitHub release exists", "v1.2.0"));
        report.push(CheckResult::fail("Release asset App.zip uploaded", "release not found"));

        let text = render_text(&version(), &report);
        assert!(text.contains("  [FAIL] Release asset App.zip uploaded: release not found\n"));
        assert!(text.ends_with("  1/3 checks passed. 2 check(s) failed, review above.\n"));
    }

    #[test]
    fn test_json_shape() {
        let mut report = Report::new();
        report.push(CheckResult::pass("Git tag exists", "v1.2.0"));
        report.push(CheckResult::fail("App notarization valid", "rejected"));
        report.finish();

        let json: serde_json::Value =
            serde_json::from_str(&render_json(&version(), &report).unwrap()).unwrap();
        assert_eq!(json["version"], "1.2.0");
        assert_eq!(json["tag"], "v1.2.0");
        assert_eq!(json["summary"]["passed"], 1);
        assert_eq!(json["summary"]["failed"], 1);
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["results"][1]["label"], "App notarization valid");
        assert_eq!(json["results"][1]["passed"], false);
        assert!(json["finished_at"].is_string());
    }
}

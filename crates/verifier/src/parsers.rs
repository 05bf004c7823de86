//! Parsers for release sources.

use regex::Regex;
use serde::Deserialize;
use shipcheck_common::{Error, Result};
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

/// Quoted version declaration in a Homebrew cask.
static CASK_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"version\s+"([^"]+)""#).unwrap());

const SHORT_VERSION_KEY: &str = "CFBundleShortVersionString";
const BUILD_VERSION_KEY: &str = "CFBundleVersion";

/// Version fields of an application bundle's Info.plist.
///
/// A field that is absent or not a string is read as empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BundleVersions {
    pub short_version: String,
    pub build: String,
}

/// Read the display version and build number from a property list
/// (XML or binary).
pub fn read_bundle_versions(path: &Path) -> Result<BundleVersions> {
    let bytes = std::fs::read(path)?;
    parse_bundle_versions(&bytes)
}

pub fn parse_bundle_versions(bytes: &[u8]) -> Result<BundleVersions> {
    let value = plist::Value::from_reader(Cursor::new(bytes))?;
    let dict = value
        .as_dictionary()
        .ok_or_else(|| Error::Other("property list root is not a dictionary".to_string()))?;

    let field = |key: &str| {
        dict.get(key)
            .and_then(plist::Value::as_string)
            .unwrap_or_default()
            .to_string()
    };

    Ok(BundleVersions {
        short_version: field(SHORT_VERSION_KEY),
        build: field(BUILD_VERSION_KEY),
    })
}

/// Whether the changelog has a `## [<version>]` heading.
///
/// The version is matched literally; regex metacharacters in it are escaped.
pub fn changelog_has_entry(content: &str, version: &str) -> Result<bool> {
    let pattern = Regex::new(&format!(r"## \[{}\]", regex::escape(version)))
        .map_err(|e| Error::Other(format!("invalid changelog pattern: {}", e)))?;
    Ok(pattern.is_match(content))
}

/// Whether `tag` appears as a whole line of `git tag -l` output.
pub fn tag_listed(output: &str, tag: &str) -> bool {
    output.lines().any(|line| line.trim() == tag)
}

/// Extract the quoted version from a cask, if declared.
pub fn cask_version(content: &str) -> Option<String> {
    CASK_VERSION_PATTERN
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[derive(Debug, Deserialize)]
struct AssetList {
    #[serde(default)]
    assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    name: String,
}

/// Asset names from `gh release view --json assets` output.
pub fn parse_release_assets(output: &str) -> Result<Vec<String>> {
    let list: AssetList = serde_json::from_str(output)?;
    Ok(list.assets.into_iter().map(|asset| asset.name).collect())
}

/// Whether a Gatekeeper assessment accepted the bundle.
pub fn assessment_accepted(output: &str) -> bool {
    output.to_lowercase().contains("accepted")
}

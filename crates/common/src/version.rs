//! Release version identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The version string under validation, e.g. `1.2.0`.
///
/// The value is passed through untouched: it is not checked for semver
/// shape, and each check interprets it on its own terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Wrap a version string. Only empty or blank input is rejected.
    pub fn new(version: impl Into<String>) -> crate::Result<Self> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(crate::Error::InvalidVersion(
                "version must not be empty".to_string(),
            ));
        }
        Ok(ReleaseVersion(version))
    }

    /// The raw version string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tag name for this release (`v` + version).
    pub fn tag(&self) -> String {
        format!("v{}", self.0)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReleaseVersion {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReleaseVersion::new(s)
    }
}

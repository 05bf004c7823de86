//! Release verification configuration.
//!
//! Every field has a default, so an empty (or absent) `shipcheck.yaml`
//! is a valid configuration. Relative paths are resolved against the
//! project root; a leading `~/` expands to `$HOME`.

use serde::{Deserialize, Serialize};
use shipcheck_common::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// File looked up in the project root when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "shipcheck.yaml";

const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;
const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Directory the relative paths below are resolved against.
    pub project_root: PathBuf,
    /// Product name used to derive bundle, cask and asset names.
    pub app_name: String,
    pub info_plist: PathBuf,
    pub changelog: PathBuf,
    /// Defaults to `dist/<app_name>.app`.
    pub app_bundle: Option<PathBuf>,
    /// Defaults to `~/Desktop/homebrew-tap/Casks/<app_name lowercased>.rb`.
    pub cask: Option<PathBuf>,
    /// `owner/name` slug of the hosting repository.
    pub github_repo: Option<String>,
    pub appcast_url: Option<String>,
    /// Defaults to `<app_name>.zip`.
    pub release_asset: Option<String>,
    pub feed_timeout_secs: u64,
    pub command_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            app_name: "App".to_string(),
            info_plist: PathBuf::from("Distribution/Info.plist"),
            changelog: PathBuf::from("CHANGELOG.md"),
            app_bundle: None,
            cask: None,
            github_repo: None,
            appcast_url: None,
            release_asset: None,
            feed_timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            user_agent: format!("shipcheck/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ReleaseConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text. An empty document yields defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ReleaseConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a project.
    ///
    /// An explicit file must exist. Otherwise `shipcheck.yaml` in the project
    /// root is used when present, falling back to defaults. The given root
    /// always wins over a `project_root` from the file.
    pub fn load(explicit: Option<&Path>, project_root: Option<&Path>) -> Result<Self> {
        let root = project_root
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut config = match explicit {
            Some(path) => {
                debug!("Loading configuration from {:?}", path);
                Self::from_file(path)?
            }
            None => {
                let candidate = root.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    debug!("Loading configuration from {:?}", candidate);
                    Self::from_file(&candidate)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        if project_root.is_some() || explicit.is_none() {
            config.project_root = root;
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(Error::Config("app_name must not be empty".to_string()));
        }
        if self.feed_timeout_secs == 0 || self.command_timeout_secs == 0 {
            return Err(Error::Config("timeouts must be greater than zero".to_string()));
        }
        Ok(())
    }

    pub fn info_plist_path(&self) -> PathBuf {
        self.resolve(&self.info_plist)
    }

    pub fn changelog_path(&self) -> PathBuf {
        self.resolve(&self.changelog)
    }

    pub fn app_bundle_path(&self) -> PathBuf {
        match &self.app_bundle {
            Some(path) => self.resolve(path),
            None => self
                .project_root
                .join("dist")
                .join(format!("{}.app", self.app_name)),
        }
    }

    pub fn cask_path(&self) -> PathBuf {
        match &self.cask {
            Some(path) => self.resolve(path),
            None => self.resolve(Path::new(&format!(
                "~/Desktop/homebrew-tap/Casks/{}.rb",
                self.app_name.to_lowercase()
            ))),
        }
    }

    pub fn release_asset_name(&self) -> String {
        self.release_asset
            .clone()
            .unwrap_or_else(|| format!("{}.zip", self.app_name))
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        let expanded = expand_home(path);
        if expanded.is_absolute() {
            expanded
        } else {
            self.project_root.join(expanded)
        }
    }
}

/// Expand a leading `~/` to the user's home directory.
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

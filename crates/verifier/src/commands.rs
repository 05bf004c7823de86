//! Allowlisted commands for verification.
//!
//! Every external program the verifier may run is built here. Arguments that
//! come from the operator (tag names, repository slugs) are validated before
//! they are placed on a command line.

use shipcheck_common::{Error, Result};
use std::path::Path;

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<String>,
}

impl Invocation {
    fn new(program: &'static str, args: impl IntoIterator<Item = String>) -> Self {
        Self {
            program,
            args: args.into_iter().collect(),
        }
    }
}

/// Builds the release tooling invocations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseCommands;

impl ReleaseCommands {
    pub fn new() -> Self {
        Self
    }

    /// `git tag -l <tag>`
    pub fn list_tag(&self, tag: &str) -> Result<Invocation> {
        ensure_safe_ref(tag)?;
        Ok(Invocation::new(
            "git",
            ["tag".to_string(), "-l".to_string(), tag.to_string()],
        ))
    }

    /// `gh release view <tag> --repo <repo>`
    pub fn view_release(&self, repo: &str, tag: &str) -> Result<Invocation> {
        ensure_safe_ref(tag)?;
        ensure_safe_repo(repo)?;
        Ok(Invocation::new(
            "gh",
            [
                "release".to_string(),
                "view".to_string(),
                tag.to_string(),
                "--repo".to_string(),
                repo.to_string(),
            ],
        ))
    }

    /// `gh release view <tag> --repo <repo> --json assets`
    pub fn list_release_assets(&self, repo: &str, tag: &str) -> Result<Invocation> {
        let mut invocation = self.view_release(repo, tag)?;
        invocation.args.push("--json".to_string());
        invocation.args.push("assets".to_string());
        Ok(invocation)
    }

    /// `spctl --assess --verbose=2 <bundle>`
    pub fn assess_bundle(&self, bundle: &Path) -> Invocation {
        Invocation::new(
            "spctl",
            [
                "--assess".to_string(),
                "--verbose=2".to_string(),
                bundle.display().to_string(),
            ],
        )
    }
}

fn ensure_safe_ref(tag: &str) -> Result<()> {
    if is_safe_ref_name(tag) {
        Ok(())
    } else {
        Err(Error::UnsafeArgument(format!("tag name {:?}", tag)))
    }
}

fn ensure_safe_repo(repo: &str) -> Result<()> {
    if is_safe_repo_slug(repo) {
        Ok(())
    } else {
        Err(Error::UnsafeArgument(format!("repository {:?}", repo)))
    }
}

/// Validate that a tag name is a plain ref (no option injection, no globs).
pub fn is_safe_ref_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() < 256
        && !name.starts_with('-')
        && !name.contains("..")
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | '+' | '/'))
}

/// Validate an `owner/name` repository slug.
pub fn is_safe_repo_slug(repo: &str) -> bool {
    let mut parts = repo.split('/');
    let (Some(owner), Some(name), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    [owner, name].iter().all(|part| {
        !part.is_empty()
            && !part.starts_with('-')
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    })
}

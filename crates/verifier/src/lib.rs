//! Shipcheck verifier - post-release consistency checks.
//!
//! Reads every source a release touches (bundle metadata, changelog, git
//! tags, Homebrew cask, GitHub release, update feed, Gatekeeper) and
//! reports whether they agree on the released version.

pub mod checks;
pub mod commands;
pub mod config;
pub mod executor;
pub mod fetch;
pub mod parsers;
pub mod verifier;

pub use checks::Check;
pub use config::ReleaseConfig;
pub use executor::{CommandOutput, Executor, LocalExecutor};
pub use fetch::{FeedFetcher, HttpFeedFetcher};
pub use verifier::Verifier;

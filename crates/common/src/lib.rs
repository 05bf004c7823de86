//! Common utilities and types shared across shipcheck crates.

pub mod error;
pub mod timestamp;
pub mod version;

pub use error::{Error, Result};
pub use timestamp::Timestamp;
pub use version::ReleaseVersion;

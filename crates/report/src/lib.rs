//! Report model for shipcheck.
//!
//! This crate defines the outcome of a single verification (`CheckResult`),
//! the ordered aggregate of a run (`Report`), and the console/JSON renderings.

pub mod check;
pub mod render;
pub mod report;

pub use check::CheckResult;
pub use render::{render, render_json, render_text, OutputFormat};
pub use report::{Report, Summary};

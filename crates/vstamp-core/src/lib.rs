//! # vstamp-core
//!
//! Core types for stamping a `created` timestamp into note frontmatter.
//!
//! - [`Stamper`] — merges the timestamp into a note's leading YAML block
//! - [`CreationMoment`] / [`TimeSource`] — the timestamp and where it came from
//! - [`StampConfig`] — field name, file suffix, and timestamp format
//! - [`ErrorSummary`] — per-file failures collected across a walk
//! - Error hierarchy ([`StampError`], [`FrontmatterError`])

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod moment;
pub mod summary;

pub use config::StampConfig;
pub use error::{FrontmatterError, Result, StampError};
pub use frontmatter::{stamp_created, Stamper};
pub use moment::{CreationMoment, TimeSource};
pub use summary::{ErrorRecord, ErrorSummary};

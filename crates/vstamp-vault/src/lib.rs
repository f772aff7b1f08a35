//! # vstamp-vault
//!
//! File system side of vstamp: walks a vault directory, asks the
//! filesystem when each note was created, and rewrites notes in place
//! with the stamped frontmatter.

pub mod metadata;
pub mod walker;

pub use metadata::{FsMetadataProvider, MetadataProvider};
pub use walker::{WalkEvent, WalkStats, Walker};

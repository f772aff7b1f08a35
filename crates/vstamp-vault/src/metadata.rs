//! Creation-time lookup for notes on disk.

use std::fs;
use std::io;
use std::path::Path;

use tracing::trace;
use vstamp_core::moment::{CreationMoment, TimeSource};

/// Source of a note's creation moment.
pub trait MetadataProvider {
    /// Best-available creation moment for the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if no timestamp can be obtained.
    fn creation_moment(&self, path: &Path) -> io::Result<CreationMoment>;
}

/// Reads timestamps from filesystem metadata.
///
/// Uses the birth time where the platform and filesystem record one and
/// falls back to the last-modification time otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsMetadataProvider;

impl MetadataProvider for FsMetadataProvider {
    fn creation_moment(&self, path: &Path) -> io::Result<CreationMoment> {
        let meta = fs::metadata(path)?;
        match meta.created() {
            Ok(time) => Ok(CreationMoment::from_system_time(time, TimeSource::BirthTime)),
            Err(e) => {
                trace!(path = %path.display(), error = %e, "birth time unavailable");
                let time = meta.modified()?;
                Ok(CreationMoment::from_system_time(
                    time,
                    TimeSource::ModifiedFallback,
                ))
            }
        }
    }
}

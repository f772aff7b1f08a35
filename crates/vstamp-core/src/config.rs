//! Stamping configuration.
//!
//! vstamp reads no configuration files or environment variables; these
//! values are fixed by [`StampConfig::default`] and only vary in tests.

/// Frontmatter key written by default.
pub const DEFAULT_FIELD: &str = "created";

/// File-name suffix that marks a note as eligible.
pub const DEFAULT_EXTENSION: &str = ".md";

/// Fixed-width `YYYY-MM-DD HH:MM:SS` rendering of a creation moment.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What to stamp and which files to stamp it into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampConfig {
    /// Case-sensitive file-name suffix of eligible notes.
    pub extension: String,
    /// Frontmatter key that receives the timestamp.
    pub field: String,
    /// `chrono` strftime pattern used to render the timestamp.
    pub timestamp_format: String,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            field: DEFAULT_FIELD.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl StampConfig {
    /// Whether a file with this name should be stamped.
    #[must_use]
    pub fn is_eligible(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.extension)
    }
}

//! Per-file failure collection for a vault walk.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// One failed note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub path: PathBuf,
    pub description: String,
}

/// Failures gathered during one walk.
///
/// Identical descriptions share a counter; every failing path is still
/// kept individually, in the order it was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSummary {
    counts: BTreeMap<String, usize>,
    records: Vec<ErrorRecord>,
}

impl ErrorSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `path`, keyed by the error's display text.
    pub fn record(&mut self, path: &Path, error: &dyn std::error::Error) {
        let description = error.to_string();
        *self.counts.entry(description.clone()).or_default() += 1;
        self.records.push(ErrorRecord {
            path: path.to_path_buf(),
            description,
        });
    }

    /// Number of failing files.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many files failed with exactly this description.
    #[must_use]
    pub fn count_for(&self, description: &str) -> usize {
        self.counts.get(description).copied().unwrap_or(0)
    }

    /// Distinct descriptions with their counts, sorted by description.
    pub fn counts(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(d, n)| (d.as_str(), *n))
    }

    #[must_use]
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// Render the end-of-walk report.
    #[must_use]
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "\nAll files processed successfully!");
        }

        writeln!(f, "\n=== Error Summary ===")?;
        writeln!(f, "Total files processed with errors: {}", self.total())?;

        writeln!(f, "\nError types:")?;
        for (description, count) in self.counts() {
            writeln!(f, "- {description}: {count} files")?;
        }

        writeln!(f, "\nFailed files:")?;
        for record in &self.records {
            writeln!(f, "- {}", record.path.display())?;
            writeln!(f, "  Error: {}", record.description)?;
        }
        Ok(())
    }
}

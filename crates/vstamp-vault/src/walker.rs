//! Recursive vault walk that stamps every eligible note in place.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};
use vstamp_core::config::StampConfig;
use vstamp_core::error::{Result, StampError};
use vstamp_core::frontmatter::Stamper;
use vstamp_core::moment::TimeSource;
use vstamp_core::summary::ErrorSummary;
use walkdir::WalkDir;

use crate::metadata::MetadataProvider;

/// Outcome of one eligible note, emitted as the walk progresses.
#[derive(Debug)]
pub enum WalkEvent<'a> {
    /// The note was stamped and written back.
    Processed(&'a Path),
    /// The note failed; it has already been recorded in the summary.
    Failed(&'a Path, &'a StampError),
}

/// Counters for a completed walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Eligible notes reached.
    pub visited: usize,
    pub processed: usize,
    pub failed: usize,
}

/// Walks a vault and stamps each eligible note.
pub struct Walker<'a> {
    config: &'a StampConfig,
    provider: &'a dyn MetadataProvider,
}

impl<'a> Walker<'a> {
    #[must_use]
    pub fn new(config: &'a StampConfig, provider: &'a dyn MetadataProvider) -> Self {
        Self { config, provider }
    }

    /// Stamp every eligible note under `root`, depth first.
    ///
    /// Per-note failures go to `summary` and `on_event` and never stop the
    /// walk. Failures recorded before an abort stay in `summary`.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::Traversal`] if the directory walk itself fails,
    /// e.g. the root is missing or a directory cannot be listed.
    pub fn walk<F>(
        &self,
        root: &Path,
        summary: &mut ErrorSummary,
        mut on_event: F,
    ) -> Result<WalkStats>
    where
        F: FnMut(WalkEvent<'_>),
    {
        info!(root = %root.display(), "walking vault");
        let mut stats = WalkStats::default();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| StampError::Traversal(e.to_string()))?;
            if !entry.file_type().is_file()
                || !self.config.is_eligible(&entry.file_name().to_string_lossy())
            {
                continue;
            }

            stats.visited += 1;
            let path = entry.path();
            match self.stamp_file(path) {
                Ok(source) => {
                    stats.processed += 1;
                    debug!(path = %path.display(), ?source, "stamped note");
                    on_event(WalkEvent::Processed(path));
                }
                Err(err) => {
                    stats.failed += 1;
                    warn!(path = %path.display(), error = %err, "failed to stamp note");
                    summary.record(path, &err);
                    on_event(WalkEvent::Failed(path, &err));
                }
            }
        }

        info!(
            visited = stats.visited,
            processed = stats.processed,
            failed = stats.failed,
            "walk complete"
        );
        Ok(stats)
    }

    /// Read, stamp, and rewrite a single note.
    ///
    /// The note is handled as bytes, so a body in any encoding is kept.
    /// Nothing is written unless stamping succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::Read`], [`StampError::MetadataLookup`],
    /// [`StampError::Frontmatter`], or [`StampError::Write`] for the step
    /// that failed.
    pub fn stamp_file(&self, path: &Path) -> Result<TimeSource> {
        let content = fs::read(path).map_err(StampError::Read)?;
        let moment = self
            .provider
            .creation_moment(path)
            .map_err(StampError::MetadataLookup)?;
        let stamped = Stamper::new(self.config).stamp(&content, &moment)?;
        fs::write(path, stamped).map_err(StampError::Write)?;
        Ok(moment.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use serde_yaml::{Mapping, Value};
    use vstamp_core::frontmatter::{decode_block, split_frontmatter};
    use vstamp_core::moment::CreationMoment;

    struct FixedProvider;

    impl MetadataProvider for FixedProvider {
        fn creation_moment(&self, _path: &Path) -> io::Result<CreationMoment> {
            let at = NaiveDate::from_ymd_opt(2023, 11, 5)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap();
            Ok(CreationMoment::new(at, TimeSource::BirthTime))
        }
    }

    struct FailingProvider;

    impl MetadataProvider for FailingProvider {
        fn creation_moment(&self, _path: &Path) -> io::Result<CreationMoment> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "no timestamps"))
        }
    }

    fn frontmatter_of(path: &Path) -> (Mapping, Vec<u8>) {
        let content = fs::read(path).unwrap();
        let (yaml, body) = split_frontmatter(&content).unwrap().expect("stamped");
        (decode_block(yaml).unwrap(), body.to_vec())
    }

    fn created(map: &Mapping) -> Option<&str> {
        map.get("created").and_then(Value::as_str)
    }

    fn run(
        root: &Path,
        provider: &dyn MetadataProvider,
    ) -> (Result<WalkStats>, ErrorSummary, Vec<String>) {
        let config = StampConfig::default();
        let walker = Walker::new(&config, provider);
        let mut summary = ErrorSummary::new();
        let mut lines = Vec::new();
        let result = walker.walk(root, &mut summary, |event| match event {
            WalkEvent::Processed(p) => lines.push(format!("ok {}", p.display())),
            WalkEvent::Failed(p, e) => lines.push(format!("err {}: {e}", p.display())),
        });
        (result, summary, lines)
    }

    #[test]
    fn stamps_mixed_vault() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let plain = root.join("a-plain.md");
        let tagged = root.join("b-tagged.md");
        let broken = root.join("c-broken.md");
        fs::write(&plain, "# Plain\n").unwrap();
        fs::write(&tagged, "---\ntags: [a, b]\n---\n# Tagged\n").unwrap();
        fs::write(&broken, "---\ntags: [a]\n# never closed\n").unwrap();

        let (result, summary, lines) = run(root, &FixedProvider);
        let stats = result.unwrap();

        assert_eq!(
            stats,
            WalkStats {
                visited: 3,
                processed: 2,
                failed: 1
            }
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.iter().filter(|l| l.starts_with("ok ")).count(), 2);

        let (map, body) = frontmatter_of(&plain);
        assert_eq!(created(&map), Some("2023-11-05 14:30:00"));
        assert_eq!(body, b"\n# Plain\n");

        let (map, body) = frontmatter_of(&tagged);
        assert_eq!(created(&map), Some("2023-11-05 14:30:00"));
        assert_eq!(
            map.get("tags"),
            Some(&serde_yaml::from_str::<Value>("[a, b]").unwrap())
        );
        assert_eq!(body, b"# Tagged\n");

        assert_eq!(
            fs::read_to_string(&broken).unwrap(),
            "---\ntags: [a]\n# never closed\n"
        );
        assert_eq!(summary.total(), 1);
        assert_eq!(summary.records()[0].path, broken);
        assert_eq!(
            summary.count_for("invalid frontmatter format: missing closing '---'"),
            1
        );
    }

    #[test]
    fn descends_into_subdirectories_and_skips_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let nested = root.join("projects").join("2024");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(root.join("folder.md")).unwrap();
        fs::write(nested.join("deep.md"), "deep").unwrap();
        fs::write(root.join("notes.txt"), "plain text").unwrap();
        fs::write(root.join("UPPER.MD"), "shouting").unwrap();

        let (result, summary, lines) = run(root, &FixedProvider);
        assert_eq!(result.unwrap().processed, 1);
        assert!(summary.is_empty());

        let expected: PathBuf = nested.join("deep.md");
        assert_eq!(lines, [format!("ok {}", expected.display())]);
        assert_eq!(fs::read_to_string(root.join("notes.txt")).unwrap(), "plain text");
        assert_eq!(fs::read_to_string(root.join("UPPER.MD")).unwrap(), "shouting");
    }

    #[test]
    fn metadata_failures_are_recorded_and_walk_continues() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["one.md", "two.md"] {
            fs::write(dir.path().join(name), "text").unwrap();
        }

        let (result, summary, _) = run(dir.path(), &FailingProvider);
        let stats = result.unwrap();
        assert_eq!(stats.failed, 2);
        assert_eq!(summary.total(), 2);
        assert_eq!(summary.count_for("metadata lookup error: no timestamps"), 2);
        assert_eq!(fs::read_to_string(dir.path().join("one.md")).unwrap(), "text");
    }

    #[test]
    fn latin1_body_is_stamped_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let note = dir.path().join("caf.md");
        fs::write(&note, b"---\ntags: [a]\n---\nCaf\xe9\n").unwrap();

        let (result, summary, _) = run(dir.path(), &FixedProvider);
        assert_eq!(result.unwrap().processed, 1);
        assert!(summary.is_empty());

        let (map, body) = frontmatter_of(&note);
        assert_eq!(created(&map), Some("2023-11-05 14:30:00"));
        assert_eq!(body, b"Caf\xe9\n");
    }

    #[test]
    fn binary_note_without_block_gets_one_prepended() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("binary.md");
        fs::write(&binary, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let (result, summary, _) = run(dir.path(), &FixedProvider);
        assert_eq!(result.unwrap().processed, 1);
        assert!(summary.is_empty());

        let (_, body) = frontmatter_of(&binary);
        assert_eq!(body, [b'\n', 0xff, 0xfe, 0x00, 0x80]);
    }

    #[test]
    fn non_utf8_block_is_an_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let note = dir.path().join("bad.md");
        let original = b"---\ntitle: Caf\xe9\n---\nbody\n";
        fs::write(&note, original).unwrap();

        let (result, summary, _) = run(dir.path(), &FixedProvider);
        assert_eq!(result.unwrap().failed, 1);
        assert!(summary.records()[0]
            .description
            .starts_with("invalid YAML in frontmatter: block is not valid UTF-8"));
        assert_eq!(fs::read(&note).unwrap(), original);
    }

    #[test]
    fn empty_vault_has_no_errors() {
        let dir = tempfile::tempdir().unwrap();
        let (result, summary, lines) = run(dir.path(), &FixedProvider);
        assert_eq!(result.unwrap(), WalkStats::default());
        assert!(summary.is_empty());
        assert!(lines.is_empty());
    }

    #[test]
    fn missing_root_aborts_with_traversal_error() {
        let dir = tempfile::tempdir().unwrap();
        let (result, summary, _) = run(&dir.path().join("nope"), &FixedProvider);
        assert!(matches!(result, Err(StampError::Traversal(_))));
        assert!(summary.is_empty());
    }
}

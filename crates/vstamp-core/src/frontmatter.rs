//! YAML frontmatter splitting and stamping.
//!
//! Handles the `---` delimited YAML frontmatter at the top of a note.
//! Format:
//! ```markdown
//! ---
//! tags: [reading, rust]
//! created: 2024-03-07 09:05:03
//! ---
//!
//! ## Body content here
//! ```
//!
//! Only the block changes; the body after the closing `---` line is
//! carried over byte for byte.

use serde_yaml::{Mapping, Value};

use crate::config::StampConfig;
use crate::error::FrontmatterError;
use crate::moment::CreationMoment;

const OPEN: &[u8] = b"---\n";
const CLOSE: &[u8] = b"\n---\n";

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Split a note into its frontmatter block and the body after it.
///
/// Returns `Ok(None)` when the note does not open with a `---` line, in
/// which case the whole note is body. The body is returned as raw bytes;
/// only the block has to be UTF-8. A closing `---` directly after the
/// opener does not count, so `---\n---\n` is unterminated.
///
/// # Errors
///
/// Returns [`FrontmatterError::MalformedBlock`] if the opening marker has
/// no closing `---` line after it, and [`FrontmatterError::InvalidEncoding`]
/// if the block is not valid UTF-8.
pub fn split_frontmatter(content: &[u8]) -> Result<Option<(&str, &[u8])>, FrontmatterError> {
    let Some(after_open) = content.strip_prefix(OPEN) else {
        return Ok(None);
    };

    let close_pos = find(after_open, CLOSE).ok_or(FrontmatterError::MalformedBlock)?;
    let yaml = std::str::from_utf8(&after_open[..close_pos]).map_err(|e| {
        FrontmatterError::InvalidEncoding(format!("block is not valid UTF-8: {e}"))
    })?;
    let body = &after_open[close_pos + CLOSE.len()..];

    Ok(Some((yaml, body)))
}

/// Decode a frontmatter block into a key/value mapping.
///
/// An empty or `null` block is an empty mapping.
///
/// # Errors
///
/// Returns [`FrontmatterError::InvalidEncoding`] if the YAML is invalid or
/// its top level is not a mapping.
pub fn decode_block(yaml: &str) -> Result<Mapping, FrontmatterError> {
    let yaml = yaml.trim();
    if yaml.is_empty() {
        return Ok(Mapping::new());
    }

    let value: Value = serde_yaml::from_str(yaml)
        .map_err(|e| FrontmatterError::InvalidEncoding(e.to_string()))?;

    let found = match value {
        Value::Mapping(map) => return Ok(map),
        Value::Null => return Ok(Mapping::new()),
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Tagged(_) => "a tagged value",
    };
    Err(FrontmatterError::InvalidEncoding(format!(
        "expected a mapping, found {found}"
    )))
}

/// Encode a mapping back to YAML, without surrounding blank lines.
///
/// # Errors
///
/// Returns [`FrontmatterError::InvalidEncoding`] if the mapping cannot be
/// serialized.
pub fn encode_block(map: &Mapping) -> Result<String, FrontmatterError> {
    let yaml = serde_yaml::to_string(map)
        .map_err(|e| FrontmatterError::InvalidEncoding(format!("cannot encode mapping: {e}")))?;
    Ok(yaml.trim().to_string())
}

/// Merges a creation timestamp into a note's frontmatter.
pub struct Stamper<'a> {
    config: &'a StampConfig,
}

impl<'a> Stamper<'a> {
    #[must_use]
    pub fn new(config: &'a StampConfig) -> Self {
        Self { config }
    }

    /// Produce the stamped contents of a note.
    ///
    /// With an existing block, the configured field is set (overwriting any
    /// prior value) and every other key is kept. Without one, a new block
    /// holding only the field is prepended, separated from the original
    /// contents by a blank line. The body is copied as-is, whatever its
    /// encoding.
    ///
    /// # Errors
    ///
    /// Returns [`FrontmatterError::MalformedBlock`] for an unterminated block
    /// and [`FrontmatterError::InvalidEncoding`] when the block cannot be
    /// decoded or re-encoded.
    pub fn stamp(&self, content: &[u8], moment: &CreationMoment) -> Result<Vec<u8>, FrontmatterError> {
        let stamp = moment.format(&self.config.timestamp_format)?;
        let key = Value::String(self.config.field.clone());

        let (mut map, body, separator) = match split_frontmatter(content)? {
            Some((yaml, body)) => (decode_block(yaml)?, body, &b""[..]),
            None => (Mapping::new(), content, &b"\n"[..]),
        };
        map.insert(key, Value::String(stamp));
        let encoded = encode_block(&map)?;

        let mut output = Vec::with_capacity(encoded.len() + body.len() + 10);
        output.extend_from_slice(OPEN);
        output.extend_from_slice(encoded.as_bytes());
        output.extend_from_slice(CLOSE);
        output.extend_from_slice(separator);
        output.extend_from_slice(body);
        Ok(output)
    }
}

/// Stamp `created` into a note using the default configuration.
///
/// # Errors
///
/// See [`Stamper::stamp`].
pub fn stamp_created(content: &[u8], moment: &CreationMoment) -> Result<Vec<u8>, FrontmatterError> {
    Stamper::new(&StampConfig::default()).stamp(content, moment)
}

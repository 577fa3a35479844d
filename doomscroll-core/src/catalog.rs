//! Catalog loading — the external source of memory records.
//!
//! The catalog is a JSON array in the camelCase wire shape of
//! [`MemoryRecord`]. It is read once at startup and fails open: a missing,
//! unreadable, or malformed source degrades to the built-in single-record
//! set without retrying and without surfacing an error to the reader.

use std::path::Path;

use tracing::{info, warn};

use crate::error::CatalogError;
use crate::types::{MemoryId, MemoryRecord};

/// The built-in catalog used when the external source is unavailable.
#[must_use]
pub fn fallback_catalog() -> Vec<MemoryRecord> {
    vec![MemoryRecord {
        id: MemoryId(1),
        kind: "tweet".to_string(),
        content: "The internet is dying and we're all just scrolling through its death throes..."
            .to_string(),
        author: "digital_mourner".to_string(),
        year: 2024,
        corruption_level: 0.0,
        saved: false,
    }]
}

/// Parse a catalog from its JSON wire format.
///
/// # Errors
/// Returns [`CatalogError::Parse`] on malformed JSON and
/// [`CatalogError::Empty`] when the array parses but holds no records.
pub fn parse_catalog(json: &str) -> Result<Vec<MemoryRecord>, CatalogError> {
    let records: Vec<MemoryRecord> = serde_json::from_str(json)?;
    if records.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(records)
}

/// Load the catalog from a JSON file, failing open to
/// [`fallback_catalog`] if the source is missing or malformed.
#[must_use]
pub fn load_catalog(path: &Path) -> Vec<MemoryRecord> {
    match try_load(path) {
        Ok(records) => {
            info!(count = records.len(), "loaded memory catalog");
            records
        }
        Err(err) => {
            warn!(%err, path = %path.display(), "catalog load failed, using fallback");
            fallback_catalog()
        }
    }
}

fn try_load(path: &Path) -> Result<Vec<MemoryRecord>, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn parses_the_wire_format() {
        let json = r#"[
            {"id": 1, "type": "tweet", "content": "first", "author": "a", "year": 2009,
             "corruptionLevel": 0, "saved": false},
            {"id": 2, "type": "forum_post", "content": "second", "author": "b", "year": 2003}
        ]"#;
        let records = parse_catalog(json).expect("parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].kind, "forum_post");
        assert_eq!(records[1].corruption_level, 0.0);
    }

    #[test]
    fn empty_array_is_rejected() {
        assert!(matches!(parse_catalog("[]"), Err(CatalogError::Empty)));
    }

    #[test]
    fn missing_file_falls_back() {
        let records = load_catalog(Path::new("/definitely/not/here.json"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].author, "digital_mourner");
    }

    #[test]
    fn malformed_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, "{{ not json").expect("write");
        let records = load_catalog(file.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, MemoryId(1));
    }

    #[test]
    fn valid_file_round_trips() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"[{{"id": 7, "type": "tweet", "content": "x", "author": "y", "year": 2015}}]"#
        )
        .expect("write");
        let records = load_catalog(file.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, MemoryId(7));
    }
}

//! Parser for offline catalog snapshot files.
//!
//! A snapshot is a single JSON document:
//!
//! ```json
//! {
//!   "genres": [{ "id": 28, "name": "Action" }],
//!   "movies": [{ "id": 949, "title": "Heat", "genres": ["Action"], ... }]
//! }
//! ```
//!
//! Movie entries use the same field names as [`MovieRecord`]; every field
//! except `id` and `title` may be omitted.

use crate::error::{DataLoadError, Result};
use crate::types::{GenreInfo, MovieRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Raw snapshot document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub genres: Vec<GenreInfo>,
    #[serde(default)]
    pub movies: Vec<MovieRecord>,
}

/// Read and parse a snapshot file.
pub fn parse_snapshot_file(path: &Path) -> Result<CatalogSnapshot> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    parse_snapshot_str(&content).map_err(|e| match e {
        DataLoadError::ParseError { reason, .. } => DataLoadError::ParseError {
            file: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

/// Parse a snapshot from an in-memory JSON string.
pub fn parse_snapshot_str(content: &str) -> Result<CatalogSnapshot> {
    serde_json::from_str(content).map_err(|e| DataLoadError::ParseError {
        file: "<memory>".to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_minimal_snapshot() {
        let snapshot = parse_snapshot_str(
            r#"{
                "genres": [{"id": 28, "name": "Action"}],
                "movies": [{"id": 949, "title": "Heat", "genres": ["Action", "Crime"]}]
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.genres.len(), 1);
        assert_eq!(snapshot.movies.len(), 1);
        assert_eq!(snapshot.movies[0].genres, vec!["Action", "Crime"]);
        assert!(snapshot.movies[0].release_date.is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_snapshot_str("{ not json");
        assert!(matches!(result, Err(DataLoadError::ParseError { .. })));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_snapshot_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_parse_file_reports_path_on_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2").unwrap();

        match parse_snapshot_file(file.path()) {
            Err(DataLoadError::ParseError { file: name, .. }) => {
                assert_eq!(name, file.path().display().to_string());
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}

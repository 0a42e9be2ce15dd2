use crate::fingerprint::hash::EMPTY_SHA256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Fingerprint entry for one file in a model repository.
///
/// `sha256` is the raw content hash; `ordered_sha256` is the canonical
/// hash for formats with an order-insensitive representation. `artifacts`
/// lists embedded code references (`module.symbol`) found by the
/// deserialization scanner. Unreadable files keep the empty-input hash
/// sentinel, a zero size, and an `error` note; they never abort a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub filename: String,
    pub size: u64,
    pub sha256: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileRecord {
    pub fn new(filename: &str, size: u64, sha256: String) -> Self {
        Self {
            filename: filename.to_string(),
            size,
            sha256,
            ordered_sha256: None,
            artifacts: Vec::new(),
            error: None,
        }
    }

    /// Record for a file that could not be read at all.
    pub fn unreadable(filename: &str, details: &str) -> Self {
        Self {
            filename: filename.to_string(),
            size: 0,
            sha256: EMPTY_SHA256.to_string(),
            ordered_sha256: None,
            artifacts: Vec::new(),
            error: Some(details.to_string()),
        }
    }
}

/// The software bill of materials for one versioned model: the identifier
/// plus a fingerprint record per repository file. Replaced wholesale on
/// re-scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSbom {
    pub purl: String,
    pub created: DateTime<Utc>,
    pub files: Vec<FileRecord>,
}

impl ComponentSbom {
    pub fn new(purl: &str, files: Vec<FileRecord>) -> Self {
        Self {
            purl: purl.to_string(),
            created: Utc::now(),
            files,
        }
    }

    /// Deduplicated raw content hashes; the similarity engine's hash set.
    pub fn content_hashes(&self) -> HashSet<&str> {
        self.files.iter().map(|f| f.sha256.as_str()).collect()
    }
}

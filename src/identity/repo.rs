use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog record for a model repository, keyed by its base (unversioned)
/// identifier. Carries hub metadata and the version index used to pick the
/// latest revision for unversioned queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoRecord {
    pub base_purl: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<String>,
    /// version string -> publication timestamp
    #[serde(default)]
    pub versions: BTreeMap<String, DateTime<Utc>>,
}

impl RepoRecord {
    pub fn new(base_purl: &str, name: &str) -> Self {
        Self {
            base_purl: base_purl.to_string(),
            name: name.to_string(),
            owner: None,
            task: None,
            libraries: Vec::new(),
            repo_type: None,
            versions: BTreeMap::new(),
        }
    }

    pub fn with_version(mut self, version: &str, published: DateTime<Utc>) -> Self {
        self.versions.insert(version.to_string(), published);
        self
    }

    /// The most recently published version. Equal timestamps resolve to the
    /// lexicographically greatest version string, so the answer is stable
    /// across rebuilds of the record.
    pub fn latest_version(&self) -> Option<&str> {
        self.versions
            .iter()
            .max_by_key(|(version, published)| (*published, version.as_str()))
            .map(|(version, _)| version.as_str())
    }
}

use crate::identity::Purl;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A corpus file materialized on the local filesystem.
///
/// Remote corpora stage each file into its own temporary directory; the
/// guard keeps that directory alive for exactly as long as the caller
/// holds the handle, so fingerprinting one file at a time never
/// accumulates a whole repository on disk.
#[derive(Debug)]
pub struct CorpusFile {
    relative_name: String,
    path: PathBuf,
    _staging: Option<TempDir>,
}

impl CorpusFile {
    /// A file that already lives at a stable local path.
    pub fn local(relative_name: &str, path: PathBuf) -> Self {
        Self {
            relative_name: relative_name.to_string(),
            path,
            _staging: None,
        }
    }

    /// A downloaded file whose backing directory is dropped with the handle.
    pub fn staged(relative_name: &str, path: PathBuf, staging: TempDir) -> Self {
        Self {
            relative_name: relative_name.to_string(),
            path,
            _staging: Some(staging),
        }
    }

    /// Name relative to the corpus root, with no leading separators.
    pub fn relative_name(&self) -> &str {
        &self.relative_name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// FileCorpus port for enumerating and materializing a model's files
///
/// Implementations cover local directories and remote hubs. Listing and
/// fetching are separate so the scan loop can bound disk usage to one
/// file at a time.
///
/// # Async Support
/// Remote corpora perform network I/O; implementations must be
/// `Send + Sync`.
#[async_trait]
pub trait FileCorpus: Send + Sync {
    /// Relative names of every file in the corpus for this identifier
    ///
    /// # Errors
    /// Returns an error if the corpus cannot be enumerated at all (bad
    /// path, repository gone, network down). Per-file problems belong to
    /// `fetch_file`.
    async fn list_files(&self, purl: &Purl) -> Result<Vec<String>>;

    /// Materializes one file for fingerprinting
    ///
    /// # Errors
    /// Returns an error if this file cannot be read or downloaded; the
    /// caller records it against the file and continues the scan.
    async fn fetch_file(&self, purl: &Purl, relative_name: &str) -> Result<CorpusFile>;
}

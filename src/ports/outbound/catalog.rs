use crate::analysis::ModelInfo;
use crate::fingerprint::ComponentSbom;
use crate::identity::RepoRecord;
use crate::shared::Result;
use async_trait::async_trait;

/// Upper bound on identifiers tracked per content hash in the reverse
/// index. Ubiquitous files (empty configs, shared tokenizers) would
/// otherwise accumulate unbounded candidate lists; past the cap a hash
/// stops contributing new similarity candidates.
pub const MAX_TRACKED_PURLS: usize = 100;

/// RepoCatalog port for repository metadata keyed by base identifier
///
/// Each record carries hub metadata and the version index consulted when
/// an unversioned query needs the latest revision.
///
/// # Async Support
/// Catalog backends range from in-process maps to remote stores, so all
/// methods are async. Implementations must be `Send + Sync`.
#[async_trait]
pub trait RepoCatalog: Send + Sync {
    /// Fetches the record stored under a base (unversioned) identifier
    ///
    /// # Returns
    /// The record, or None when the identifier is not cataloged
    async fn get_repo(&self, base_purl: &str) -> Result<Option<RepoRecord>>;

    /// Stores a record under its base identifier, replacing any previous one
    async fn put_repo(&self, record: &RepoRecord) -> Result<()>;

    /// Point existence check; backends may override with something cheaper
    /// than a full fetch
    async fn repo_exists(&self, base_purl: &str) -> Result<bool> {
        Ok(self.get_repo(base_purl).await?.is_some())
    }
}

/// SbomCatalog port for per-version SBOM documents and the
/// content-hash reverse index
#[async_trait]
pub trait SbomCatalog: Send + Sync {
    /// Fetches the SBOM stored under a versioned identifier
    async fn get_sbom(&self, purl: &str) -> Result<Option<ComponentSbom>>;

    /// Stores an SBOM under its identifier, replacing any previous one in
    /// a single last-writer-wins step, and keeps the hash reverse index in
    /// sync with the document's current file hashes
    async fn put_sbom(&self, sbom: &ComponentSbom) -> Result<()>;

    /// Point existence check
    async fn sbom_exists(&self, purl: &str) -> Result<bool> {
        Ok(self.get_sbom(purl).await?.is_some())
    }

    /// Identifiers whose SBOMs contain a file with this content hash,
    /// capped at [`MAX_TRACKED_PURLS`] entries per hash
    ///
    /// # Arguments
    /// * `sha256` - lowercase hex content hash
    async fn purls_for_hash(&self, sha256: &str) -> Result<Vec<String>>;
}

/// ModelInfoCatalog port for per-version analysis summaries
///
/// These records are the population behind percentile ranking, so the
/// port also exposes key enumeration for distribution rebuilds.
#[async_trait]
pub trait ModelInfoCatalog: Send + Sync {
    /// Fetches the analysis summary stored under a versioned identifier
    async fn get_model_info(&self, purl: &str) -> Result<Option<ModelInfo>>;

    /// Stores an analysis summary under its identifier
    async fn put_model_info(&self, info: &ModelInfo) -> Result<()>;

    /// Point existence check; resolution uses this to confirm a versioned
    /// identifier has downstream analysis data
    async fn model_info_exists(&self, purl: &str) -> Result<bool> {
        Ok(self.get_model_info(purl).await?.is_some())
    }

    /// Every identifier with a stored summary
    async fn model_info_keys(&self) -> Result<Vec<String>>;
}

use crate::identity::{classify, Purl, QueryForm, ECOSYSTEM_PRIORITY};
use crate::ports::outbound::{ModelInfoCatalog, RepoCatalog, SbomCatalog};
use crate::shared::Result;

/// What a free-text query resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A versioned model identifier with analysis data behind it.
    Model(Purl),
    /// A known content hash; the caller looks up files directly.
    File(String),
}

/// ResolveQueryUseCase - Turns free-text queries into catalog identifiers
///
/// Accepts any of the supported query forms (package URL, hub URL, bare
/// repository name, content hash) and resolves it against the catalog.
/// Resolution is total: unresolvable input comes back as `Ok(None)`,
/// never as an error, so callers decide how "not found" is presented.
///
/// # Type Parameters
/// * `RC` - RepoCatalog implementation
/// * `SC` - SbomCatalog implementation
/// * `MC` - ModelInfoCatalog implementation
pub struct ResolveQueryUseCase<RC, SC, MC> {
    repo_catalog: RC,
    sbom_catalog: SC,
    model_info_catalog: MC,
}

impl<RC, SC, MC> ResolveQueryUseCase<RC, SC, MC>
where
    RC: RepoCatalog,
    SC: SbomCatalog,
    MC: ModelInfoCatalog,
{
    /// Creates a new ResolveQueryUseCase with injected catalogs
    pub fn new(repo_catalog: RC, sbom_catalog: SC, model_info_catalog: MC) -> Self {
        Self {
            repo_catalog,
            sbom_catalog,
            model_info_catalog,
        }
    }

    /// Executes query resolution
    ///
    /// # Arguments
    /// * `query` - Free-text lookup, any supported form
    ///
    /// # Returns
    /// The resolved identifier, or None when nothing in the catalog matches
    pub async fn execute(&self, query: &str) -> Result<Option<Resolved>> {
        match classify(query) {
            QueryForm::Purl(purl) | QueryForm::HubUrl(purl) => self.resolve_purl(purl).await,
            QueryForm::RepoName(name) => self.resolve_repo_name(&name).await,
            QueryForm::ContentHash(hash) => self.resolve_hash(hash).await,
            QueryForm::Unknown => Ok(None),
        }
    }

    /// Resolves an identifier that is already a package URL
    ///
    /// A versioned identifier is accepted as-is once the catalog confirms
    /// analysis data for it. An unversioned identifier is completed with
    /// the latest version from the repository's version index first.
    async fn resolve_purl(&self, purl: Purl) -> Result<Option<Resolved>> {
        let versioned = match purl.version() {
            Some(_) => purl,
            None => match self.latest_version_of(&purl).await? {
                Some(versioned) => versioned,
                None => return Ok(None),
            },
        };

        if self
            .model_info_catalog
            .model_info_exists(&versioned.to_string())
            .await?
        {
            Ok(Some(Resolved::Model(versioned)))
        } else {
            Ok(None)
        }
    }

    /// Tries a bare repository name against each ecosystem in priority order
    async fn resolve_repo_name(&self, name: &str) -> Result<Option<Resolved>> {
        for ecosystem in ECOSYSTEM_PRIORITY {
            let candidate = match name.split_once('/') {
                Some((namespace, repo)) => Purl::new(ecosystem, Some(namespace), repo),
                None => Purl::new(ecosystem, None, name),
            };
            let Ok(candidate) = candidate else { continue };

            if self
                .repo_catalog
                .repo_exists(&candidate.to_string())
                .await?
            {
                return self.resolve_purl(candidate).await;
            }
        }
        Ok(None)
    }

    /// A content hash resolves directly through the reverse index
    async fn resolve_hash(&self, hash: String) -> Result<Option<Resolved>> {
        if self.sbom_catalog.purls_for_hash(&hash).await?.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Resolved::File(hash)))
        }
    }

    /// Completes an unversioned identifier from the version index
    async fn latest_version_of(&self, base: &Purl) -> Result<Option<Purl>> {
        let Some(record) = self.repo_catalog.get_repo(&base.to_string()).await? else {
            return Ok(None);
        };
        Ok(record
            .latest_version()
            .map(|version| base.with_version(version)))
    }
}

use crate::identity::Purl;

/// ScanRequest - Internal request DTO for the SBOM build use case
///
/// This DTO represents the internal request structure used within the
/// application layer; the CLI resolves its arguments into one of these.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Versioned identifier of the model to fingerprint
    pub purl: Purl,
    /// When true, re-scan even if the catalog already holds an SBOM
    pub rebuild: bool,
}

impl ScanRequest {
    pub fn new(purl: Purl, rebuild: bool) -> Self {
        Self { purl, rebuild }
    }
}

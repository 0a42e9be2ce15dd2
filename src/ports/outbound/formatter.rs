use crate::fingerprint::ComponentSbom;
use crate::shared::Result;

/// SbomFormatter port for rendering an SBOM document
///
/// This port abstracts the output representation (JSON document,
/// Markdown report, etc.) of a finished SBOM.
pub trait SbomFormatter {
    /// Renders the SBOM
    ///
    /// # Arguments
    /// * `sbom` - The assembled SBOM with its per-file fingerprint records
    ///
    /// # Returns
    /// Formatted content as a string
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, sbom: &ComponentSbom) -> Result<String>;
}

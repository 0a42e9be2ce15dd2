use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the destination (stdout, file, etc.) where the
/// formatted SBOM document ends up.
pub trait OutputPresenter {
    /// Presents the formatted document to the output destination
    ///
    /// # Arguments
    /// * `content` - The formatted content to present
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - File permissions prevent writing
    /// - Disk space is insufficient
    fn present(&self, content: &str) -> Result<()>;
}

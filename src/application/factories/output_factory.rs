use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::{OutputPresenter, SbomFormatter};
use std::path::PathBuf;

/// Where rendered output should go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Factory for creating SBOM formatters and output presenters
///
/// This factory encapsulates the creation logic for the rendering adapters,
/// following the Factory Pattern. It belongs in the application layer as it
/// orchestrates the selection of infrastructure adapters based on
/// application needs.
pub struct OutputFactory;

impl OutputFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Arguments
    /// * `format` - The output format to create a formatter for
    ///
    /// # Returns
    /// A boxed SbomFormatter trait object appropriate for the specified format
    ///
    /// # Examples
    /// ```
    /// use aibom::application::dto::OutputFormat;
    /// use aibom::application::factories::OutputFactory;
    ///
    /// let formatter = OutputFactory::formatter(OutputFormat::Json);
    /// ```
    pub fn formatter(format: OutputFormat) -> Box<dyn SbomFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new()),
        }
    }

    /// Creates a presenter instance for the specified target
    ///
    /// # Arguments
    /// * `target` - Where the rendered document should be written
    ///
    /// # Returns
    /// A boxed OutputPresenter trait object appropriate for the target
    ///
    /// # Examples
    /// ```
    /// use aibom::application::factories::{OutputFactory, OutputTarget};
    ///
    /// let presenter = OutputFactory::presenter(OutputTarget::Stdout);
    /// ```
    pub fn presenter(target: OutputTarget) -> Box<dyn OutputPresenter> {
        match target {
            OutputTarget::Stdout => Box::new(StdoutPresenter::new()),
            OutputTarget::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

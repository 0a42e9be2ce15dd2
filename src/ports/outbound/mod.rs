/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (catalog stores, file corpora,
/// the deserialization scanner, console, file system).
pub mod catalog;
pub mod corpus;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod scanner;

pub use catalog::{ModelInfoCatalog, RepoCatalog, SbomCatalog, MAX_TRACKED_PURLS};
pub use corpus::{CorpusFile, FileCorpus};
pub use formatter::SbomFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use scanner::{ArtifactScanner, SymbolRef};

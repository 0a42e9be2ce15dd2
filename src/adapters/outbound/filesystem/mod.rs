/// Filesystem adapters: the JSON-document catalog, the local-directory
/// corpus, and output writers.
mod catalog;
mod corpus;
mod file_writer;

pub use catalog::JsonFileCatalog;
pub use corpus::LocalDirCorpus;
pub use file_writer::{FileSystemWriter, StdoutPresenter};

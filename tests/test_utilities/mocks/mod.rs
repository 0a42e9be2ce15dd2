/// Mock implementations for testing
mod mock_corpus;
mod mock_progress_reporter;
mod mock_scanner;

pub use mock_corpus::MockCorpus;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_scanner::MockScanner;

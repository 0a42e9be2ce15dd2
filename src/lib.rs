//! aibom - SBOM generation and risk analytics for machine-learning models
//!
//! This library catalogs ML model artifacts: it fingerprints repository
//! files into SBOM documents, resolves free-form model queries to package
//! URLs, finds models that share file content, and ranks models against
//! the cataloged population, following hexagonal architecture principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`identity`, `fingerprint`, `analysis`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use aibom::prelude::*;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let catalog = InMemoryCatalog::new();
//! let corpus = LocalDirCorpus::new(PathBuf::from("./my-model"))?;
//! let registry = HandlerRegistry::with_default_handlers(Arc::new(DisabledScanner::new()));
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = BuildSbomUseCase::new(catalog, corpus, registry, progress_reporter);
//!
//! // Execute
//! let purl = Purl::parse("pkg:generic/my-model")?;
//! let sbom = use_case.execute(ScanRequest::new(purl, false)).await?;
//!
//! // Format output
//! let formatter = JsonFormatter::new();
//! let output = formatter.format(&sbom)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod analysis;
pub mod application;
pub mod fingerprint;
pub mod identity;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, JsonFileCatalog, LocalDirCorpus, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::memory::InMemoryCatalog;
    pub use crate::adapters::outbound::network::HuggingFaceHubCorpus;
    pub use crate::adapters::outbound::process::{CommandScanner, DisabledScanner};
    pub use crate::analysis::{ModelInfo, RiskCategory, RiskCounters, TestStatus};
    pub use crate::application::dto::{OutputFormat, ScanRequest};
    pub use crate::application::factories::{OutputFactory, OutputTarget};
    pub use crate::application::read_models::{SimilarModelView, SimilarModelsPage};
    pub use crate::application::use_cases::{
        BuildSbomUseCase, FindSimilarUseCase, RankPercentileUseCase, ResolveQueryUseCase, Resolved,
    };
    pub use crate::fingerprint::{ComponentSbom, FileRecord, HandlerRegistry};
    pub use crate::identity::{Purl, RepoRecord};
    pub use crate::ports::outbound::{
        ArtifactScanner, CorpusFile, FileCorpus, ModelInfoCatalog, OutputPresenter,
        ProgressReporter, RepoCatalog, SbomCatalog, SbomFormatter, SymbolRef,
    };
    pub use crate::shared::Result;
}

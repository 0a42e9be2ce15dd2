/// Use cases module containing application business logic orchestration
mod build_sbom;
mod find_similar;
mod rank_model;
mod resolve_query;

pub use build_sbom::BuildSbomUseCase;
pub use find_similar::FindSimilarUseCase;
pub use rank_model::{RankPercentileUseCase, DEFAULT_CDF_TTL};
pub use resolve_query::{Resolved, ResolveQueryUseCase};

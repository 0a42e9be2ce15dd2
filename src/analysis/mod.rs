/// Analysis domain: risk counters and status, content-overlap similarity,
/// and population percentile ranking.
pub mod counters;
pub mod percentile;
pub mod similarity;

pub use counters::{ModelInfo, RiskCategory, RiskCounters, TestStatus};
pub use percentile::{PercentileModel, DEFAULT_NUM_BINS};
pub use similarity::{paginate, rank_by_overlap, SimilarityResult};

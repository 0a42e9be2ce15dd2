use crate::analysis::{ModelInfo, PercentileModel, RiskCategory, RiskCounters};
use crate::ports::outbound::ModelInfoCatalog;
use crate::shared::Result;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// How long a built distribution stays good. Population churn is slow, so
/// five hours of staleness is acceptable against rebuild cost.
pub const DEFAULT_CDF_TTL: Duration = Duration::from_secs(5 * 60 * 60);

/// RankPercentileUseCase - Places a model's pass ratio within the population
///
/// The population distribution (one per risk category) is expensive to
/// rebuild, so snapshots are cached with a TTL. Rebuilds are single-flight
/// per category: one task refreshes while concurrent callers are served the
/// previous snapshot instead of queuing behind the rebuild.
///
/// # Type Parameters
/// * `MC` - ModelInfoCatalog implementation
pub struct RankPercentileUseCase<MC> {
    model_info_catalog: MC,
    num_bins: usize,
    ttl: Duration,
    snapshots: DashMap<&'static str, (PercentileModel, Instant)>,
    rebuild_locks: [Mutex<()>; 4],
}

impl<MC> RankPercentileUseCase<MC>
where
    MC: ModelInfoCatalog,
{
    /// Creates a new RankPercentileUseCase with injected catalog
    ///
    /// # Arguments
    /// * `model_info_catalog` - Population source for the distributions
    /// * `num_bins` - Histogram resolution for the CDF
    /// * `ttl` - How long a built distribution is served before a rebuild
    pub fn new(model_info_catalog: MC, num_bins: usize, ttl: Duration) -> Self {
        Self {
            model_info_catalog,
            num_bins,
            ttl,
            snapshots: DashMap::new(),
            rebuild_locks: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    /// Percentile rank of the given counters within the category population
    ///
    /// # Returns
    /// A value in `[0, 100]`; untested counters rank at 0 without
    /// consulting the distribution
    pub async fn rank(&self, category: RiskCategory, counters: &RiskCounters) -> Result<f64> {
        let Some(ratio) = counters.pass_ratio() else {
            return Ok(0.0);
        };
        Ok(self.model(category).await?.percentile(ratio))
    }

    /// Percentile rank for a cataloged model
    ///
    /// # Returns
    /// None when the identifier has no analysis summary
    pub async fn rank_model(&self, purl: &str, category: RiskCategory) -> Result<Option<f64>> {
        let Some(info) = self.model_info_catalog.get_model_info(purl).await? else {
            return Ok(None);
        };
        let rank = self.rank(category, info.counters(category)).await?;
        Ok(Some(rank))
    }

    /// Returns the category's distribution, rebuilding it when expired
    async fn model(&self, category: RiskCategory) -> Result<PercentileModel> {
        if let Some(model) = self.fresh_snapshot(category) {
            return Ok(model);
        }

        let lock = &self.rebuild_locks[Self::lock_index(category)];
        let _guard = match lock.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                // a rebuild is already running; serve the previous snapshot
                // rather than stacking readers behind it
                if let Some(entry) = self.snapshots.get(category.as_str()) {
                    return Ok(entry.value().0.clone());
                }
                // nothing built yet, wait for the first build
                lock.lock().await
            }
        };

        // the rebuild we queued behind may have refreshed it already
        if let Some(model) = self.fresh_snapshot(category) {
            return Ok(model);
        }

        let model = self.rebuild(category).await?;
        self.snapshots
            .insert(category.as_str(), (model.clone(), Instant::now()));
        Ok(model)
    }

    fn fresh_snapshot(&self, category: RiskCategory) -> Option<PercentileModel> {
        let entry = self.snapshots.get(category.as_str())?;
        let (model, built) = entry.value();
        (built.elapsed() < self.ttl).then(|| model.clone())
    }

    /// Walks the whole catalog and rebuilds the category's CDF
    ///
    /// Summaries are fetched with a concurrency limit so a file-backed
    /// catalog is not hammered with thousands of simultaneous reads.
    async fn rebuild(&self, category: RiskCategory) -> Result<PercentileModel> {
        use futures::stream::{self, StreamExt};

        const MAX_CONCURRENT_READS: usize = 16;

        let keys = self.model_info_catalog.model_info_keys().await?;
        let summaries: Vec<Result<Option<ModelInfo>>> = stream::iter(keys)
            .map(|key| async move { self.model_info_catalog.get_model_info(&key).await })
            .buffer_unordered(MAX_CONCURRENT_READS)
            .collect()
            .await;

        let mut ratios = Vec::with_capacity(summaries.len());
        for summary in summaries {
            if let Some(info) = summary? {
                if let Some(ratio) = info.counters(category).pass_ratio() {
                    ratios.push(ratio);
                }
            }
        }
        Ok(PercentileModel::build(&ratios, self.num_bins))
    }

    fn lock_index(category: RiskCategory) -> usize {
        match category {
            RiskCategory::Security => 0,
            RiskCategory::Ethics => 1,
            RiskCategory::Performance => 2,
            RiskCategory::Overall => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::memory::InMemoryCatalog;
    use crate::analysis::DEFAULT_NUM_BINS;

    /// 100 models with security pass ratios spread uniformly over [0, 1].
    async fn seed_uniform_population(catalog: &InMemoryCatalog) {
        for i in 0..100u32 {
            let purl = format!("pkg:huggingface/pop/model-{i:03}@v1");
            let mut info = ModelInfo::new(&purl, "pkg:huggingface/pop/model", "model");
            info.security = RiskCounters::new(99, i, 99 - i, 0, 0);
            catalog.put_model_info(&info).await.unwrap();
        }
    }

    fn ranker(catalog: &InMemoryCatalog, ttl: Duration) -> RankPercentileUseCase<InMemoryCatalog> {
        RankPercentileUseCase::new(catalog.clone(), DEFAULT_NUM_BINS, ttl)
    }

    #[tokio::test]
    async fn test_median_model_ranks_near_fifty() {
        let catalog = InMemoryCatalog::default();
        seed_uniform_population(&catalog).await;
        let ranker = ranker(&catalog, DEFAULT_CDF_TTL);

        let median = RiskCounters::new(99, 50, 49, 0, 0);
        let rank = ranker.rank(RiskCategory::Security, &median).await.unwrap();

        assert!((rank - 50.0).abs() < 3.0, "median ranked at {rank}");
    }

    #[tokio::test]
    async fn test_untested_counters_rank_zero() {
        let catalog = InMemoryCatalog::default();
        seed_uniform_population(&catalog).await;
        let ranker = ranker(&catalog, DEFAULT_CDF_TTL);

        let rank = ranker
            .rank(RiskCategory::Security, &RiskCounters::default())
            .await
            .unwrap();

        assert_eq!(rank, 0.0);
    }

    #[tokio::test]
    async fn test_empty_population_ranks_zero() {
        let catalog = InMemoryCatalog::default();
        let ranker = ranker(&catalog, DEFAULT_CDF_TTL);

        let counters = RiskCounters::new(10, 10, 0, 0, 0);
        let rank = ranker.rank(RiskCategory::Security, &counters).await.unwrap();

        assert_eq!(rank, 0.0);
    }

    #[tokio::test]
    async fn test_degenerate_population_ranks_zero() {
        let catalog = InMemoryCatalog::default();
        for i in 0..10u32 {
            let purl = format!("pkg:huggingface/pop/same-{i}@v1");
            let mut info = ModelInfo::new(&purl, "pkg:huggingface/pop/same", "same");
            info.security = RiskCounters::new(10, 8, 2, 0, 0);
            catalog.put_model_info(&info).await.unwrap();
        }
        let ranker = ranker(&catalog, DEFAULT_CDF_TTL);

        let counters = RiskCounters::new(10, 8, 2, 0, 0);
        let rank = ranker.rank(RiskCategory::Security, &counters).await.unwrap();

        assert_eq!(rank, 0.0);
    }

    #[tokio::test]
    async fn test_rank_model_by_purl() {
        let catalog = InMemoryCatalog::default();
        seed_uniform_population(&catalog).await;
        let ranker = ranker(&catalog, DEFAULT_CDF_TTL);

        let rank = ranker
            .rank_model("pkg:huggingface/pop/model-099@v1", RiskCategory::Security)
            .await
            .unwrap()
            .unwrap();

        // the best model in the population sits at the top
        assert_eq!(rank, 100.0);
    }

    #[tokio::test]
    async fn test_rank_model_unknown_purl() {
        let catalog = InMemoryCatalog::default();
        let ranker = ranker(&catalog, DEFAULT_CDF_TTL);

        let rank = ranker
            .rank_model("pkg:huggingface/none/nope@v1", RiskCategory::Overall)
            .await
            .unwrap();

        assert_eq!(rank, None);
    }

    #[tokio::test]
    async fn test_snapshot_survives_population_change_within_ttl() {
        let catalog = InMemoryCatalog::default();
        seed_uniform_population(&catalog).await;
        let ranker = ranker(&catalog, DEFAULT_CDF_TTL);
        let counters = RiskCounters::new(99, 75, 24, 0, 0);

        let before = ranker.rank(RiskCategory::Security, &counters).await.unwrap();

        // skew the population hard; the cached snapshot should not notice
        for i in 0..100u32 {
            let purl = format!("pkg:huggingface/pop/skew-{i:03}@v1");
            let mut info = ModelInfo::new(&purl, "pkg:huggingface/pop/skew", "skew");
            info.security = RiskCounters::new(100, 100, 0, 0, 0);
            catalog.put_model_info(&info).await.unwrap();
        }
        let after = ranker.rank(RiskCategory::Security, &counters).await.unwrap();

        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_expired_snapshot_is_rebuilt() {
        let catalog = InMemoryCatalog::default();
        seed_uniform_population(&catalog).await;
        // zero TTL: every call rebuilds
        let ranker = ranker(&catalog, Duration::ZERO);
        let counters = RiskCounters::new(99, 75, 24, 0, 0);

        let before = ranker.rank(RiskCategory::Security, &counters).await.unwrap();

        for i in 0..300u32 {
            let purl = format!("pkg:huggingface/pop/skew-{i:03}@v1");
            let mut info = ModelInfo::new(&purl, "pkg:huggingface/pop/skew", "skew");
            info.security = RiskCounters::new(100, 100, 0, 0, 0);
            catalog.put_model_info(&info).await.unwrap();
        }
        let after = ranker.rank(RiskCategory::Security, &counters).await.unwrap();

        // three quarters of the new population outscores these counters
        assert!(after < before, "rank did not drop: {before} -> {after}");
    }

    #[tokio::test]
    async fn test_categories_cache_independently() {
        let catalog = InMemoryCatalog::default();
        for i in 0..20u32 {
            let purl = format!("pkg:huggingface/pop/model-{i:02}@v1");
            let mut info = ModelInfo::new(&purl, "pkg:huggingface/pop/model", "model");
            info.security = RiskCounters::new(20, i, 20 - i, 0, 0);
            // ethics left untested across the population
            catalog.put_model_info(&info).await.unwrap();
        }
        let ranker = ranker(&catalog, DEFAULT_CDF_TTL);
        let counters = RiskCounters::new(20, 15, 5, 0, 0);

        let security = ranker.rank(RiskCategory::Security, &counters).await.unwrap();
        let ethics = ranker.rank(RiskCategory::Ethics, &counters).await.unwrap();

        assert!(security > 0.0);
        // no ethics population at all -> empty model -> floor
        assert_eq!(ethics, 0.0);
    }
}

use crate::analysis::{paginate, rank_by_overlap, RiskCategory, SimilarityResult};
use crate::application::read_models::{CategoryAssessment, SimilarModelView, SimilarModelsPage};
use crate::application::use_cases::rank_model::RankPercentileUseCase;
use crate::identity::Purl;
use crate::ports::outbound::{ModelInfoCatalog, SbomCatalog};
use crate::shared::{AibomError, Result};
use std::collections::HashMap;

/// FindSimilarUseCase - Lists cataloged models that share file content
///
/// Candidates come from the catalog's hash reverse index and are ranked by
/// directed containment: the fraction of the target's distinct content
/// hashes each candidate also carries. Analysis summaries are attached to
/// the served page only, so deep result lists stay cheap.
///
/// # Type Parameters
/// * `SC` - SbomCatalog implementation
/// * `MC` - ModelInfoCatalog implementation
pub struct FindSimilarUseCase<SC, MC> {
    sbom_catalog: SC,
    model_info_catalog: MC,
    ranker: RankPercentileUseCase<MC>,
}

impl<SC, MC> FindSimilarUseCase<SC, MC>
where
    SC: SbomCatalog,
    MC: ModelInfoCatalog,
{
    /// Creates a new FindSimilarUseCase with injected dependencies
    ///
    /// # Arguments
    /// * `sbom_catalog` - Source of the target's SBOM and the hash index
    /// * `model_info_catalog` - Analysis summaries for page enrichment
    /// * `ranker` - Percentile ranking shared with the rank command
    pub fn new(
        sbom_catalog: SC,
        model_info_catalog: MC,
        ranker: RankPercentileUseCase<MC>,
    ) -> Self {
        Self {
            sbom_catalog,
            model_info_catalog,
            ranker,
        }
    }

    /// Executes the similarity query for one cataloged model
    ///
    /// # Arguments
    /// * `target` - Versioned identifier whose SBOM anchors the comparison
    /// * `page` - 1-based page to serve (0 reads as 1)
    /// * `items_per_page` - Page size
    ///
    /// # Returns
    /// The served page plus the total match count, or an error when the
    /// target has never been scanned
    pub async fn execute(
        &self,
        target: &Purl,
        page: usize,
        items_per_page: usize,
    ) -> Result<SimilarModelsPage> {
        let target_purl = target.to_string();

        // Step 1: The target must already be cataloged
        let Some(sbom) = self.sbom_catalog.get_sbom(&target_purl).await? else {
            return Err(AibomError::NotFound { query: target_purl }.into());
        };

        // Step 2: Count shared hashes per candidate from the reverse index
        let hashes = sbom.content_hashes();
        let target_hash_count = hashes.len();
        let mut shared_counts: HashMap<String, usize> = HashMap::new();
        for hash in hashes {
            for purl in self.sbom_catalog.purls_for_hash(hash).await? {
                if purl != target_purl {
                    *shared_counts.entry(purl).or_insert(0) += 1;
                }
            }
        }

        // Step 3: Rank by containment and slice out the requested page
        let ranked = rank_by_overlap(target_hash_count, shared_counts);
        let total_matches = ranked.len();
        let page = page.max(1);
        let served = paginate(ranked, page, items_per_page);

        // Step 4: Attach analysis summaries to the served entries
        let mut entries = Vec::with_capacity(served.len());
        for result in served {
            entries.push(self.enrich(result).await?);
        }

        Ok(SimilarModelsPage {
            total_matches,
            page,
            entries,
        })
    }

    /// Builds the page entry for one ranked candidate
    ///
    /// Candidates without an analysis summary keep their overlap numbers
    /// and carry no assessments.
    async fn enrich(&self, result: SimilarityResult) -> Result<SimilarModelView> {
        let mut name = None;
        let mut assessments = Vec::new();
        if let Some(info) = self.model_info_catalog.get_model_info(&result.purl).await? {
            name = Some(info.name.clone());
            for category in RiskCategory::ALL {
                let counters = info.counters(category);
                assessments.push(CategoryAssessment {
                    category,
                    status: counters.status(),
                    rank: self.ranker.rank(category, counters).await?,
                });
            }
        }
        Ok(SimilarModelView {
            purl: result.purl,
            name,
            shared_hash_count: result.shared_hash_count,
            overlap_ratio: result.overlap_ratio,
            assessments,
        })
    }
}

use crate::analysis::{RiskCategory, TestStatus};

/// One category's verdict for a related model: the collapsed test status
/// and the model's percentile rank within the cataloged population.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAssessment {
    pub category: RiskCategory,
    pub status: TestStatus,
    pub rank: f64,
}

/// SimilarModelView - Read model for one entry in the related-models list
///
/// Pairs the raw containment result with the catalog's analysis summary
/// so the presentation layer never reaches back into the domain. Models
/// without analysis data keep an empty assessment list.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarModelView {
    pub purl: String,
    pub name: Option<String>,
    pub shared_hash_count: usize,
    pub overlap_ratio: f64,
    pub assessments: Vec<CategoryAssessment>,
}

impl SimilarModelView {
    /// The verdict for one category, when the model has analysis data.
    pub fn assessment(&self, category: RiskCategory) -> Option<&CategoryAssessment> {
        self.assessments.iter().find(|a| a.category == category)
    }
}

/// One page of the ranked related-models list, with the overall match
/// count so the presenter can label the page position.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarModelsPage {
    pub total_matches: usize,
    /// Effective 1-based page served (requests for page 0 read as 1).
    pub page: usize,
    pub entries: Vec<SimilarModelView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_lookup() {
        let view = SimilarModelView {
            purl: "pkg:huggingface/org/model@v1".to_string(),
            name: Some("model".to_string()),
            shared_hash_count: 3,
            overlap_ratio: 0.75,
            assessments: vec![CategoryAssessment {
                category: RiskCategory::Security,
                status: TestStatus::Pass,
                rank: 62.5,
            }],
        };

        let security = view.assessment(RiskCategory::Security).unwrap();
        assert_eq!(security.status, TestStatus::Pass);
        assert!(view.assessment(RiskCategory::Ethics).is_none());
    }
}

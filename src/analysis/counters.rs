use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fraction of warnings above which a category is flagged.
const WARNING_RATIO: f64 = 0.25;
/// Fraction of failures above which a category is flagged.
const FAIL_RATIO: f64 = 0.40;

/// Risk assessment categories tracked per model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Security,
    Ethics,
    Performance,
    Overall,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Security,
        RiskCategory::Ethics,
        RiskCategory::Performance,
        RiskCategory::Overall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Security => "security",
            RiskCategory::Ethics => "ethics",
            RiskCategory::Performance => "performance",
            RiskCategory::Overall => "overall",
        }
    }
}

impl FromStr for RiskCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "security" => Ok(RiskCategory::Security),
            "ethics" => Ok(RiskCategory::Ethics),
            "performance" => Ok(RiskCategory::Performance),
            "overall" => Ok(RiskCategory::Overall),
            _ => anyhow::bail!(
                "Invalid category: {}. Valid categories are: security, ethics, performance, overall",
                s
            ),
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated result of a test suite's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    NotTested,
    Pass,
    Warning,
    Severe,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TestStatus::NotTested => "not_tested",
            TestStatus::Pass => "pass",
            TestStatus::Warning => "warning",
            TestStatus::Severe => "severe",
        };
        write!(f, "{}", label)
    }
}

/// Test outcome tallies for one model in one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCounters {
    pub total: u32,
    pub pass: u32,
    pub fail: u32,
    pub warning: u32,
    pub severe: u32,
}

impl RiskCounters {
    pub fn new(total: u32, pass: u32, fail: u32, warning: u32, severe: u32) -> Self {
        Self {
            total,
            pass,
            fail,
            warning,
            severe,
        }
    }

    /// `pass / total`, or None when the model has no tests in this
    /// category and cannot be placed on a distribution.
    pub fn pass_ratio(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(f64::from(self.pass) / f64::from(self.total))
        }
    }

    /// Collapses the tallies into a single verdict. Any severe finding
    /// dominates; elevated warning or failure rates flag the category.
    pub fn status(&self) -> TestStatus {
        if self.total == 0 {
            return TestStatus::NotTested;
        }
        if self.severe > 0 {
            return TestStatus::Severe;
        }
        let total = f64::from(self.total);
        if f64::from(self.warning) / total > WARNING_RATIO {
            return TestStatus::Warning;
        }
        if f64::from(self.fail) / total > FAIL_RATIO {
            return TestStatus::Warning;
        }
        TestStatus::Pass
    }
}

/// Per-model analysis summary stored in the catalog under the versioned
/// identifier: one counter block per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub purl: String,
    pub base_purl: String,
    pub name: String,
    #[serde(default)]
    pub security: RiskCounters,
    #[serde(default)]
    pub ethics: RiskCounters,
    #[serde(default)]
    pub performance: RiskCounters,
    #[serde(default)]
    pub overall: RiskCounters,
}

impl ModelInfo {
    pub fn new(purl: &str, base_purl: &str, name: &str) -> Self {
        Self {
            purl: purl.to_string(),
            base_purl: base_purl.to_string(),
            name: name.to_string(),
            security: RiskCounters::default(),
            ethics: RiskCounters::default(),
            performance: RiskCounters::default(),
            overall: RiskCounters::default(),
        }
    }

    pub fn counters(&self, category: RiskCategory) -> &RiskCounters {
        match category {
            RiskCategory::Security => &self.security,
            RiskCategory::Ethics => &self.ethics,
            RiskCategory::Performance => &self.performance,
            RiskCategory::Overall => &self.overall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "security".parse::<RiskCategory>().unwrap(),
            RiskCategory::Security
        );
        assert_eq!(
            "OVERALL".parse::<RiskCategory>().unwrap(),
            RiskCategory::Overall
        );
        assert!("safety".parse::<RiskCategory>().is_err());
    }

    #[test]
    fn test_category_round_trip() {
        for category in RiskCategory::ALL {
            assert_eq!(
                category.as_str().parse::<RiskCategory>().unwrap(),
                category
            );
        }
    }

    #[test]
    fn test_status_not_tested() {
        let counters = RiskCounters::default();
        assert_eq!(counters.status(), TestStatus::NotTested);
    }

    #[test]
    fn test_status_severe_dominates() {
        let counters = RiskCounters::new(10, 9, 0, 0, 1);
        assert_eq!(counters.status(), TestStatus::Severe);
    }

    #[test]
    fn test_status_warning_ratio() {
        // 3/10 warnings is above the 25% threshold
        let counters = RiskCounters::new(10, 7, 0, 3, 0);
        assert_eq!(counters.status(), TestStatus::Warning);
        // 2/10 is below it
        let counters = RiskCounters::new(10, 8, 0, 2, 0);
        assert_eq!(counters.status(), TestStatus::Pass);
    }

    #[test]
    fn test_status_fail_ratio() {
        // 5/10 failures is above the 40% threshold
        let counters = RiskCounters::new(10, 5, 5, 0, 0);
        assert_eq!(counters.status(), TestStatus::Warning);
        // exactly 40% is not above it
        let counters = RiskCounters::new(10, 6, 4, 0, 0);
        assert_eq!(counters.status(), TestStatus::Pass);
    }

    #[test]
    fn test_pass_ratio() {
        assert_eq!(RiskCounters::new(4, 3, 1, 0, 0).pass_ratio(), Some(0.75));
        assert_eq!(RiskCounters::default().pass_ratio(), None);
    }

    #[test]
    fn test_model_info_counters_lookup() {
        let mut info = ModelInfo::new(
            "pkg:huggingface/org/model@v1",
            "pkg:huggingface/org/model",
            "model",
        );
        info.ethics = RiskCounters::new(5, 5, 0, 0, 0);
        assert_eq!(info.counters(RiskCategory::Ethics).total, 5);
        assert_eq!(info.counters(RiskCategory::Security).total, 0);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TestStatus::NotTested).unwrap(),
            "\"not_tested\""
        );
        assert_eq!(serde_json::to_string(&TestStatus::Pass).unwrap(), "\"pass\"");
    }
}

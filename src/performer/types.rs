//! @ai:module:intent Performance report types
//! @ai:module:layer domain
//! @ai:module:public_api Score, ReportEntry, PerformanceReport, PerformanceSummary, MetricType
//! @ai:module:stateless true

use crate::output::SuccessMetric;
use crate::types::BehaviorType;
use serde::{Deserialize, Serialize};

pub const TOTAL_KEY: &str = "Total";

pub fn name_key(name: &str) -> String {
    format!("Name - {}", name)
}

pub fn capability_key(capability: &str) -> String {
    format!("Capability - {}", capability)
}

pub fn behavior_type_key(test_type: BehaviorType) -> String {
    format!("Behavior type - {}", test_type.as_str())
}

/// @ai:intent Aggregation type tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    #[default]
    Weighted,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Weighted => "weighted",
        }
    }
}

/// @ai:intent Accuracy of one group of outputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub accuracy: f64,
    pub successes: usize,
    pub total: usize,
}

impl Score {
    /// @ai:intent Build a score, an empty group has accuracy 0.0
    /// @ai:effects pure
    pub fn new(successes: usize, total: usize) -> Self {
        let accuracy = if total == 0 {
            0.0
        } else {
            successes as f64 / total as f64
        };

        Self {
            accuracy,
            successes,
            total,
        }
    }

    /// Support string, `"successes/total"`.
    pub fn support(&self) -> String {
        format!("{}/{}", self.successes, self.total)
    }

    /// @ai:intent `(accuracy, support)` pair as exposed in the report mapping
    pub fn as_pair(&self) -> (f64, String) {
        (self.accuracy, self.support())
    }
}

/// @ai:intent One keyed row of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub key: String,
    pub score: Score,
}

/// @ai:intent Flat report keyed by prefixed group names
///
/// Entries are ordered: total, per name, per behavior type, per capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub entries: Vec<ReportEntry>,
}

impl PerformanceReport {
    pub fn get(&self, key: &str) -> Option<&Score> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.score)
    }

    pub fn total(&self) -> Option<&Score> {
        self.get(TOTAL_KEY)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReportEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// @ai:intent Rows of `[key, accuracy, support]` for tabular display
    /// @ai:effects pure
    pub fn rows(&self) -> Vec<[String; 3]> {
        self.entries
            .iter()
            .map(|entry| {
                [
                    entry.key.clone(),
                    format!("{:.4}", entry.score.accuracy),
                    entry.score.support(),
                ]
            })
            .collect()
    }
}

/// @ai:intent Report together with the settings that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub timestamp: String,
    pub metric_type: MetricType,
    pub success_metric: SuccessMetric,
    pub report: PerformanceReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_support() {
        let score = Score::new(2, 3);
        assert!((score.accuracy - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(score.support(), "2/3");
    }

    #[test]
    fn test_empty_group_guard() {
        let score = Score::new(0, 0);
        assert_eq!(score.as_pair(), (0.0, "0/0".to_string()));
    }

    #[test]
    fn test_keys() {
        assert_eq!(name_key("A"), "Name - A");
        assert_eq!(capability_key("Negation"), "Capability - Negation");
        assert_eq!(
            behavior_type_key(BehaviorType::MinimumFunctionality),
            "Behavior type - minimum functionality"
        );
    }
}

//! @ai:module:intent JSON report generation and reload
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, JsonReporterTrait
//! @ai:module:stateless true

use crate::performer::PerformanceSummary;
use anyhow::{Context, Result};
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Write a summary as pretty JSON
    fn generate(&self, summary: &PerformanceSummary, output_path: &Path) -> Result<()>;

    /// @ai:intent Read back a summary written by `generate`
    fn load(&self, path: &Path) -> Result<PerformanceSummary>;
}

/// @ai:intent Generates JSON reports from performance summaries
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:effects fs:write
    fn generate(&self, summary: &PerformanceSummary, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(summary)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write report: {}", output_path.display()))?;
        Ok(())
    }

    /// @ai:effects fs:read
    fn load(&self, path: &Path) -> Result<PerformanceSummary> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report: {}", path.display()))?;
        let summary = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report: {}", path.display()))?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::SuccessMetric;
    use crate::performer::{MetricType, ReportBuilder};
    use crate::types::BehaviorType;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn summary() -> PerformanceSummary {
        let mut builder = ReportBuilder::new();
        builder.record("Negation", "A", BehaviorType::Invariance, true);
        builder.record("Negation", "A", BehaviorType::Invariance, false);

        PerformanceSummary {
            timestamp: "2026-01-19T00:00:00Z".to_string(),
            metric_type: MetricType::Weighted,
            success_metric: SuccessMetric::Success,
            report: builder.finish(),
        }
    }

    #[test]
    fn test_generate_json_report() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("results.json");

        reporter.generate(&summary(), &output).unwrap();
        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"Capability - Negation\""));
        assert!(content.contains("\"weighted\""));

        assert_eq!(reporter.load(&output).unwrap(), summary());
    }

    #[test]
    fn test_load_missing_report_fails() {
        let temp = TempDir::new().unwrap();
        let err = JsonReporter::new()
            .load(&temp.path().join("missing.json"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read report"));
    }
}

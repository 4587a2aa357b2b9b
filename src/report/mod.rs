//! @ai:module:intent Report generation for performance summaries
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, JsonReporter, MarkdownReporter, ChartGenerator, format_table

pub mod charts;
pub mod json_report;
pub mod markdown_report;
pub mod table;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use markdown_report::{MarkdownReporter, MarkdownReporterTrait};
pub use table::{format_table, format_table_colored};

use crate::config::{ReportConfig, ReportFormat};
use crate::performer::PerformanceSummary;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const JSON_REPORT_FILE: &str = "results.json";
pub const MARKDOWN_REPORT_FILE: &str = "results.md";

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    markdown: MarkdownReporter,
    charts: ChartGenerator,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            markdown: MarkdownReporter::new(),
            charts: ChartGenerator::new(),
        }
    }

    /// @ai:intent Generate the reports selected by `config`
    /// @ai:post returns the paths written
    /// @ai:effects fs:write
    pub fn generate(
        &self,
        summary: &PerformanceSummary,
        config: &ReportConfig,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(output_dir)?;
        let mut written = Vec::new();

        if config.wants(ReportFormat::Json) {
            let path = output_dir.join(JSON_REPORT_FILE);
            self.json.generate(summary, &path)?;
            written.push(path);
        }

        if config.wants(ReportFormat::Markdown) {
            let path = output_dir.join(MARKDOWN_REPORT_FILE);
            self.markdown.generate(summary, &path)?;
            written.push(path);
        }

        if config.wants(ReportFormat::Chart) {
            let charts = self.charts.generate_all(summary, output_dir)?;
            written.extend(charts.into_iter().map(|name| output_dir.join(name)));
        }

        tracing::info!("Reports generated in {}", output_dir.display());
        Ok(written)
    }

    /// @ai:intent Reload a summary saved as JSON
    /// @ai:effects fs:read
    pub fn load(&self, path: &Path) -> Result<PerformanceSummary> {
        self.json.load(path)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
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

    #[test]
    fn test_generate_selected_formats() {
        let temp = TempDir::new().unwrap();
        let mut builder = ReportBuilder::new();
        builder.record("Negation", "A", BehaviorType::Invariance, true);

        let summary = PerformanceSummary {
            timestamp: "2026-01-19T00:00:00Z".to_string(),
            metric_type: MetricType::Weighted,
            success_metric: SuccessMetric::Success,
            report: builder.finish(),
        };

        let generator = ReportGenerator::new();
        let written = generator
            .generate(&summary, &ReportConfig::default(), temp.path())
            .unwrap();

        assert_eq!(
            written,
            vec![
                temp.path().join(JSON_REPORT_FILE),
                temp.path().join(MARKDOWN_REPORT_FILE)
            ]
        );
        assert_eq!(
            generator.load(&temp.path().join(JSON_REPORT_FILE)).unwrap(),
            summary
        );
    }
}

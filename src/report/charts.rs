//! @ai:module:intent Chart generation for performance reports
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator, ChartGeneratorTrait
//! @ai:module:stateless true

use crate::performer::PerformanceSummary;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate all charts from a summary
    fn generate_all(&self, summary: &PerformanceSummary, output_dir: &Path) -> Result<Vec<String>>;
}

/// One chart per report grouping: (key prefix, file name, caption).
const CHARTS: [(&str, &str, &str); 3] = [
    ("Name - ", "by_behavior.png", "Accuracy by Behavior"),
    ("Behavior type - ", "by_behavior_type.png", "Accuracy by Behavior Type"),
    ("Capability - ", "by_capability.png", "Accuracy by Capability"),
];

/// @ai:intent Generates accuracy bar charts from performance summaries
pub struct ChartGenerator;

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Bars of one grouping: label without prefix, accuracy in percent
    /// @ai:effects pure
    fn chart_data(summary: &PerformanceSummary, prefix: &str) -> Vec<(String, f64)> {
        summary
            .report
            .iter()
            .filter_map(|entry| {
                entry
                    .key
                    .strip_prefix(prefix)
                    .map(|label| (label.to_string(), entry.score.accuracy * 100.0))
            })
            .collect()
    }

    /// @ai:intent Draw one bar chart
    /// @ai:effects fs:write
    fn generate_accuracy_chart(
        &self,
        data: &[(String, f64)],
        caption: &str,
        output_path: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 25))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..data.len() as i32, 0f64..100f64)?;

        chart
            .configure_mesh()
            .x_labels(data.len())
            .y_desc("Accuracy (%)")
            .x_label_formatter(&|x| {
                data.get(*x as usize)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(data.iter().enumerate().map(|(i, (_, accuracy))| {
            Rectangle::new(
                [(i as i32, 0.0), (i as i32 + 1, *accuracy)],
                BLUE.mix(0.7).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate one chart per non-empty grouping
    /// @ai:effects fs:write
    fn generate_all(&self, summary: &PerformanceSummary, output_dir: &Path) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();
        for (prefix, file_name, caption) in CHARTS {
            let data = Self::chart_data(summary, prefix);
            if data.is_empty() {
                continue;
            }

            self.generate_accuracy_chart(&data, caption, &output_dir.join(file_name))?;
            generated.push(file_name.to_string());
        }

        tracing::debug!("Generated {} charts", generated.len());
        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::SuccessMetric;
    use crate::performer::{MetricType, ReportBuilder};
    use crate::types::BehaviorType;
    use pretty_assertions::assert_eq;

    fn summary() -> PerformanceSummary {
        let mut builder = ReportBuilder::new();
        builder.record("Negation", "A", BehaviorType::Invariance, true);
        builder.record("Negation", "B", BehaviorType::Invariance, false);

        PerformanceSummary {
            timestamp: "2026-01-19T00:00:00Z".to_string(),
            metric_type: MetricType::Weighted,
            success_metric: SuccessMetric::Success,
            report: builder.finish(),
        }
    }

    #[test]
    fn test_chart_data_strips_prefix() {
        let summary = summary();

        assert_eq!(
            ChartGenerator::chart_data(&summary, "Name - "),
            vec![("A".to_string(), 100.0), ("B".to_string(), 0.0)]
        );
        assert_eq!(
            ChartGenerator::chart_data(&summary, "Capability - "),
            vec![("Negation".to_string(), 50.0)]
        );
    }

    #[test]
    fn test_chart_data_skips_total() {
        let data = ChartGenerator::chart_data(&summary(), "Behavior type - ");
        assert_eq!(data.len(), 1);
        assert!(data.iter().all(|(label, _)| label != "Total"));
    }
}

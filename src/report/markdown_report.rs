//! @ai:module:intent Markdown report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter, MarkdownReporterTrait
//! @ai:module:stateless true

use crate::performer::{PerformanceSummary, ReportEntry, TOTAL_KEY};
use anyhow::Result;
use std::fmt::{self, Write as FmtWrite};
use std::path::Path;

const SECTIONS: [(&str, &str); 3] = [
    ("Name - ", "Results by Behavior"),
    ("Behavior type - ", "Results by Behavior Type"),
    ("Capability - ", "Results by Capability"),
];

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Generate Markdown report from a summary
    fn generate(&self, summary: &PerformanceSummary, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates Markdown reports from performance summaries
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Format an accuracy as a percentage
    /// @ai:effects pure
    fn format_accuracy(accuracy: f64) -> String {
        format!("{:.1}%", accuracy * 100.0)
    }

    fn write_summary(output: &mut String, summary: &PerformanceSummary) -> fmt::Result {
        writeln!(output, "# Behavior Test Results")?;
        writeln!(output)?;
        writeln!(output, "**Date:** {}", summary.timestamp)?;
        writeln!(output, "**Metric:** {}", summary.metric_type.as_str())?;
        writeln!(output, "**Success:** {}", summary.success_metric.as_str())?;

        if let Some(total) = summary.report.total() {
            writeln!(
                output,
                "**Overall:** {} ({})",
                Self::format_accuracy(total.accuracy),
                total.support()
            )?;
        }
        writeln!(output)
    }

    fn write_section(
        output: &mut String,
        title: &str,
        prefix: &str,
        entries: &[&ReportEntry],
    ) -> fmt::Result {
        writeln!(output, "## {}", title)?;
        writeln!(output)?;
        writeln!(output, "| Test | Acc | Support |")?;
        writeln!(output, "|------|-----|---------|")?;

        for entry in entries {
            writeln!(
                output,
                "| {} | {} | {} |",
                entry.key.trim_start_matches(prefix),
                Self::format_accuracy(entry.score.accuracy),
                entry.score.support()
            )?;
        }

        writeln!(output)
    }

    /// @ai:intent Render the whole document
    /// @ai:effects pure
    pub fn render(summary: &PerformanceSummary) -> Result<String> {
        let mut output = String::new();
        Self::write_summary(&mut output, summary)?;

        for (prefix, title) in SECTIONS {
            let entries: Vec<&ReportEntry> = summary
                .report
                .iter()
                .filter(|entry| entry.key != TOTAL_KEY && entry.key.starts_with(prefix))
                .collect();

            if !entries.is_empty() {
                Self::write_section(&mut output, title, prefix, &entries)?;
            }
        }

        Ok(output)
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, summary: &PerformanceSummary, output_path: &Path) -> Result<()> {
        let content = Self::render(summary)?;
        std::fs::write(output_path, content)?;
        Ok(())
    }
}

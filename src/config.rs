//! @ai:module:intent Configuration structs for the behavior harness
//! @ai:module:layer infrastructure
//! @ai:module:public_api HarnessConfig, PerformerConfig, PathConfig, ReportConfig, ReportFormat, FilterConfig
//! @ai:module:stateless true

use crate::performer::MetricType;
use crate::types::BehaviorType;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Main configuration for the harness
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub performer: PerformerConfig,
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// @ai:intent How behaviors are scored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformerConfig {
    #[serde(default)]
    pub metric_type: MetricType,
    #[serde(default)]
    pub binarize: bool,
}

/// @ai:intent Path configuration for suites and results
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_suite_dir")]
    pub suite_dir: PathBuf,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

/// Output format of a generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Markdown,
    Chart,
}

/// @ai:intent Which reports to write and which behaviors they cover
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_formats")]
    pub formats: Vec<ReportFormat>,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// @ai:intent Filter configuration for selecting behaviors of a suite
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    pub capabilities: Option<Vec<String>>,
    pub names: Option<Vec<String>>,
    pub test_types: Option<Vec<BehaviorType>>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            suite_dir: default_suite_dir(),
            results_dir: default_results_dir(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            filter: FilterConfig::default(),
        }
    }
}

fn default_suite_dir() -> PathBuf {
    PathBuf::from("suite")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_formats() -> Vec<ReportFormat> {
    vec![ReportFormat::Json, ReportFormat::Markdown]
}

impl HarnessConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ReportConfig {
    pub fn wants(&self, format: ReportFormat) -> bool {
        self.formats.contains(&format)
    }
}

impl FilterConfig {
    /// @ai:intent Check if filter matches a behavior
    /// @ai:effects pure
    pub fn matches(&self, capability: &str, name: &str, test_type: BehaviorType) -> bool {
        let capability_match = self
            .capabilities
            .as_ref()
            .map(|c| c.iter().any(|cap| cap == capability))
            .unwrap_or(true);

        let name_match = self
            .names
            .as_ref()
            .map(|n| n.iter().any(|candidate| candidate == name))
            .unwrap_or(true);

        let type_match = self
            .test_types
            .as_ref()
            .map(|t| t.contains(&test_type))
            .unwrap_or(true);

        capability_match && name_match && type_match
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_none() && self.names.is_none() && self.test_types.is_none()
    }
}

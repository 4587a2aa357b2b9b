//! @ai:module:intent Hierarchical accuracy aggregation over behaviors
//! @ai:module:layer application
//! @ai:module:public_api Performer, ReportBuilder
//! @ai:module:stateless false

use crate::behavior::Behavior;
use crate::config::PerformerConfig;
use crate::error::{Error, Result};
use crate::output::SuccessMetric;
use crate::performer::types::{
    behavior_type_key, capability_key, name_key, MetricType, PerformanceReport,
    PerformanceSummary, ReportEntry, Score, TOTAL_KEY,
};
use crate::types::BehaviorType;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    successes: usize,
    total: usize,
}

impl Tally {
    fn record(&mut self, success: bool) {
        self.total += 1;
        if success {
            self.successes += 1;
        }
    }

    fn score(&self) -> Score {
        Score::new(self.successes, self.total)
    }
}

/// @ai:intent Incremental accumulator of per-sample outcomes
///
/// Usable on its own when outcomes arrive one at a time (e.g. batch by batch
/// from an external evaluation loop); `Performer::fit` is built on it.
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    total: Tally,
    per_name: BTreeMap<String, Tally>,
    per_capability: BTreeMap<String, Tally>,
    per_type: BTreeMap<BehaviorType, Tally>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Make a behavior's groups visible even before any outcome
    /// @ai:effects state:write
    pub fn register(&mut self, capability: &str, name: &str, test_type: BehaviorType) {
        self.per_name.entry(name.to_string()).or_default();
        self.per_capability
            .entry(capability.to_string())
            .or_default();
        self.per_type.entry(test_type).or_default();
    }

    /// @ai:intent Count one sample outcome in every grouping
    /// @ai:effects state:write
    pub fn record(&mut self, capability: &str, name: &str, test_type: BehaviorType, success: bool) {
        self.total.record(success);
        self.per_name
            .entry(name.to_string())
            .or_default()
            .record(success);
        self.per_capability
            .entry(capability.to_string())
            .or_default()
            .record(success);
        self.per_type.entry(test_type).or_default().record(success);
    }

    /// @ai:intent Merge all groupings into one flat report
    /// @ai:effects pure
    pub fn finish(&self) -> PerformanceReport {
        let mut entries = vec![ReportEntry {
            key: TOTAL_KEY.to_string(),
            score: self.total.score(),
        }];

        entries.extend(self.per_name.iter().map(|(name, tally)| ReportEntry {
            key: name_key(name),
            score: tally.score(),
        }));
        entries.extend(self.per_type.iter().map(|(test_type, tally)| ReportEntry {
            key: behavior_type_key(*test_type),
            score: tally.score(),
        }));
        entries.extend(self.per_capability.iter().map(|(capability, tally)| ReportEntry {
            key: capability_key(capability),
            score: tally.score(),
        }));

        PerformanceReport { entries }
    }
}

/// @ai:intent Computes the performance report of a collection of behaviors, once
pub struct Performer {
    metric_type: MetricType,
    success_metric: SuccessMetric,
    is_fitted: bool,
    result: Option<PerformanceSummary>,
}

impl Performer {
    /// @ai:intent Create an unfitted performer
    /// @ai:effects pure
    pub fn new(metric_type: MetricType, binarize: bool) -> Self {
        Self {
            metric_type,
            success_metric: SuccessMetric::from_binarize(binarize),
            is_fitted: false,
            result: None,
        }
    }

    pub fn from_config(config: &PerformerConfig) -> Self {
        Self::new(config.metric_type, config.binarize)
    }

    /// @ai:intent Run pending behaviors and aggregate their outputs
    /// @ai:pre the performer has not been fitted
    /// @ai:post result() is Some
    /// @ai:effects state:write, runs behaviors not yet run
    pub fn fit<'a, I>(&mut self, behaviors: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a mut Behavior>,
    {
        if self.is_fitted {
            return Err(Error::AlreadyFitted);
        }

        let mut behaviors: Vec<&mut Behavior> = behaviors.into_iter().collect();

        let pending = behaviors.iter().filter(|b| !b.is_ran()).count();
        if pending > 0 {
            tracing::info!("{} behaviors were not run, running them now...", pending);
            for behavior in behaviors.iter_mut().filter(|b| !b.is_ran()) {
                behavior.run()?;
            }
        }

        let mut builder = ReportBuilder::new();
        for behavior in &behaviors {
            builder.register(&behavior.capability, &behavior.name, behavior.test_type);

            for output in behavior.outputs() {
                let success =
                    output
                        .score(self.success_metric)
                        .ok_or_else(|| Error::UnsupportedSuccessMetric {
                            metric: self.success_metric.as_str().to_string(),
                            task: output.task_type().as_str().to_string(),
                        })?;
                builder.record(
                    &behavior.capability,
                    &behavior.name,
                    behavior.test_type,
                    success,
                );
            }
        }

        self.result = Some(PerformanceSummary {
            timestamp: chrono::Utc::now().to_rfc3339(),
            metric_type: self.metric_type,
            success_metric: self.success_metric,
            report: builder.finish(),
        });
        self.is_fitted = true;

        tracing::info!(
            "Performer fitted on {} behaviors ({})",
            behaviors.len(),
            self.success_metric.as_str()
        );
        Ok(())
    }

    pub fn result(&self) -> Option<&PerformanceReport> {
        self.result.as_ref().map(|summary| &summary.report)
    }

    pub fn summary(&self) -> Option<&PerformanceSummary> {
        self.result.as_ref()
    }

    /// @ai:intent Render the result as a `Test | Acc | Support` table
    /// @ai:effects pure
    pub fn tabulate_result(&self) -> Option<String> {
        self.result().map(crate::report::format_table)
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    pub fn metric_type(&self) -> MetricType {
        self.metric_type
    }

    pub fn success_metric(&self) -> SuccessMetric {
        self.success_metric
    }
}

impl Default for Performer {
    fn default() -> Self {
        Self::new(MetricType::default(), false)
    }
}

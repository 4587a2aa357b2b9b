//! @ai:module:intent Behavioral testing harness for NLP classification models
//! @ai:module:layer application
//! @ai:module:public_api behavior, performer, testpack, dataset, predictor, output, types, config, report

pub mod behavior;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod performer;
pub mod predictor;
pub mod report;
pub mod testpack;
pub mod types;

pub use behavior::{Behavior, BehaviorSet, LabelSet, TaskLabels, TokenLabels};
pub use config::HarnessConfig;
pub use dataset::{SampleRecord, SampleTable};
pub use error::{Error, Result};
pub use output::{Output, SuccessMetric};
pub use performer::{PerformanceReport, PerformanceSummary, Performer, ReportBuilder, Score};
pub use predictor::{predict_fn, MockPredictor, Predictor, RecordedPredictor, SharedPredictor};
pub use report::ReportGenerator;
pub use testpack::{PredictionFns, TestPack};
pub use types::{BehaviorType, Label, Span, TaskType, Token};

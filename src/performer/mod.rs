//! @ai:module:intent Performance aggregation over run behaviors
//! @ai:module:layer application
//! @ai:module:public_api Performer, ReportBuilder, PerformanceReport, PerformanceSummary, Score, MetricType
//! @ai:module:stateless false

pub mod aggregator;
pub mod types;

pub use aggregator::{Performer, ReportBuilder};
pub use types::{
    behavior_type_key, capability_key, name_key, MetricType, PerformanceReport,
    PerformanceSummary, ReportEntry, Score, TOTAL_KEY,
};

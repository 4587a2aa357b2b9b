//! @ai:module:intent Behaviors: named test cases bound to a prediction function
//! @ai:module:layer domain
//! @ai:module:public_api Behavior, BehaviorSet, LabelSet, TaskLabels, TokenLabels, list_records
//! @ai:module:stateless false

pub mod convert;
pub mod labels;
pub mod set;
pub mod store;

pub use labels::{LabelSet, TaskLabels, TokenLabels};
pub use set::BehaviorSet;
pub use store::{list_records, RECORD_EXTENSION};

use crate::error::{Error, Result};
use crate::output::Output;
use crate::predictor::SharedPredictor;
use crate::types::{BehaviorType, Label, Span, TaskType};
use serde::{Deserialize, Serialize};

/// @ai:intent Named test case: samples, expected labels and a prediction function
///
/// A behavior runs at most once; `reset` re-arms it. The prediction function,
/// the outputs and the run flag never reach the persisted record.
#[derive(Clone, Serialize, Deserialize)]
pub struct Behavior {
    pub capability: String,
    pub name: String,
    pub test_type: BehaviorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    samples: Vec<String>,
    labels: TaskLabels,
    #[serde(skip)]
    predict_fn: Option<SharedPredictor>,
    #[serde(skip)]
    outputs: Vec<Output>,
    #[serde(skip)]
    is_ran: bool,
}

impl Behavior {
    /// @ai:intent Create a behavior for any task variant
    /// @ai:pre per-sample labels have the same length as samples
    /// @ai:effects pure
    pub fn new(
        capability: impl Into<String>,
        name: impl Into<String>,
        test_type: BehaviorType,
        samples: Vec<String>,
        labels: TaskLabels,
    ) -> Result<Self> {
        let behavior = Self {
            capability: capability.into(),
            name: name.into(),
            test_type,
            description: None,
            samples,
            labels,
            predict_fn: None,
            outputs: Vec::new(),
            is_ran: false,
        };
        behavior.validate()?;
        Ok(behavior)
    }

    pub fn sequence_classification(
        capability: impl Into<String>,
        name: impl Into<String>,
        test_type: BehaviorType,
        samples: Vec<String>,
        labels: LabelSet<Label>,
    ) -> Result<Self> {
        Self::new(
            capability,
            name,
            test_type,
            samples,
            TaskLabels::SequenceClassification(labels),
        )
    }

    pub fn multi_label_sequence_classification(
        capability: impl Into<String>,
        name: impl Into<String>,
        test_type: BehaviorType,
        samples: Vec<String>,
        labels: LabelSet<Vec<i64>>,
    ) -> Result<Self> {
        Self::new(
            capability,
            name,
            test_type,
            samples,
            TaskLabels::MultiLabelSequenceClassification(labels),
        )
    }

    pub fn span_classification(
        capability: impl Into<String>,
        name: impl Into<String>,
        test_type: BehaviorType,
        samples: Vec<String>,
        labels: LabelSet<Vec<Span>>,
    ) -> Result<Self> {
        Self::new(
            capability,
            name,
            test_type,
            samples,
            TaskLabels::SpanClassification(labels),
        )
    }

    pub fn token_classification(
        capability: impl Into<String>,
        name: impl Into<String>,
        test_type: BehaviorType,
        samples: Vec<String>,
        labels: LabelSet<TokenLabels>,
    ) -> Result<Self> {
        Self::new(
            capability,
            name,
            test_type,
            samples,
            TaskLabels::TokenClassification(labels),
        )
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_predict_fn(mut self, predict_fn: SharedPredictor) -> Self {
        self.predict_fn = Some(predict_fn);
        self
    }

    /// @ai:intent Rebind (or unbind) the prediction function
    /// @ai:effects state:write
    pub fn set_predict_fn(&mut self, predict_fn: Option<SharedPredictor>) {
        self.predict_fn = predict_fn;
    }

    /// @ai:intent Check the label/sample count invariant
    /// @ai:effects pure
    pub(crate) fn validate(&self) -> Result<()> {
        match self.labels.explicit_len() {
            Some(count) if count != self.samples.len() => Err(Error::InvalidLabelCount {
                name: self.name.clone(),
                labels: count,
                samples: self.samples.len(),
            }),
            _ => Ok(()),
        }
    }

    /// @ai:intent Predict every sample once and score it against its label
    /// @ai:pre the behavior has not run and a prediction function is bound
    /// @ai:post outputs.len() == samples.len(), in sample order
    /// @ai:effects state:write, calls predict_fn
    pub fn run(&mut self) -> Result<()> {
        if self.is_ran {
            return Err(Error::AlreadyRan {
                name: self.name.clone(),
            });
        }

        let predictor = self
            .predict_fn
            .as_ref()
            .ok_or_else(|| Error::MissingPredictFn {
                name: self.name.clone(),
            })?;

        let predictions = predictor
            .predict(&self.samples)
            .map_err(|source| Error::Prediction {
                name: self.name.clone(),
                source,
            })?;

        if predictions.len() != self.samples.len() {
            return Err(Error::PredictionCountMismatch {
                name: self.name.clone(),
                expected: self.samples.len(),
                actual: predictions.len(),
            });
        }

        self.outputs =
            convert::build_outputs(&self.name, &self.labels, &self.samples, predictions)?;
        self.is_ran = true;

        tracing::info!(
            "Behavior '{}' ran on {} samples ({})",
            self.name,
            self.samples.len(),
            self.task_type()
        );
        Ok(())
    }

    /// @ai:intent Clear outputs and the run flag
    /// @ai:effects state:write
    pub fn reset(&mut self) {
        self.outputs.clear();
        self.is_ran = false;
    }

    /// @ai:intent Copy of this behavior in its not-yet-run state, predictor kept
    /// @ai:effects pure
    pub fn reset_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.reset();
        copy
    }

    /// @ai:intent Copy suitable for persistence: not run, no predictor
    /// @ai:effects pure
    pub fn snapshot(&self) -> Self {
        let mut copy = self.reset_copy();
        copy.predict_fn = None;
        copy
    }

    pub fn task_type(&self) -> TaskType {
        self.labels.task_type()
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn labels(&self) -> &TaskLabels {
        &self.labels
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn is_ran(&self) -> bool {
        self.is_ran
    }

    pub fn predict_fn(&self) -> Option<&SharedPredictor> {
        self.predict_fn.as_ref()
    }
}

impl std::fmt::Debug for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Behavior")
            .field("capability", &self.capability)
            .field("name", &self.name)
            .field("test_type", &self.test_type)
            .field("task_type", &self.task_type())
            .field("samples", &self.samples.len())
            .field("has_predict_fn", &self.predict_fn.is_some())
            .field("is_ran", &self.is_ran)
            .finish()
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Behavior {}: name='{}'>", self.task_type(), self.name)
    }
}

impl From<Behavior> for Vec<Behavior> {
    fn from(behavior: Behavior) -> Self {
        vec![behavior]
    }
}

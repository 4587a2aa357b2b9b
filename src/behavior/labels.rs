//! @ai:module:intent Ground-truth label containers per task variant
//! @ai:module:layer domain
//! @ai:module:public_api LabelSet, TaskLabels, TokenLabels
//! @ai:module:stateless true

use crate::error::Result;
use crate::types::{Label, Span, TaskType, Token};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// @ai:intent One label shared by every sample, or one label per sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSet<T> {
    Shared(T),
    PerSample(Vec<T>),
}

impl<T> LabelSet<T> {
    /// @ai:intent Label of the sample at `index`
    /// @ai:pre index < number of samples (checked at behavior construction)
    /// @ai:effects pure
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            LabelSet::Shared(label) => Some(label),
            LabelSet::PerSample(labels) => labels.get(index),
        }
    }

    /// Number of explicit labels, `None` for a shared label.
    pub fn explicit_len(&self) -> Option<usize> {
        match self {
            LabelSet::Shared(_) => None,
            LabelSet::PerSample(labels) => Some(labels.len()),
        }
    }
}

impl<T> From<Vec<T>> for LabelSet<T> {
    fn from(labels: Vec<T>) -> Self {
        LabelSet::PerSample(labels)
    }
}

/// @ai:intent Token ground truth, typed tokens or bare labels by position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenLabels {
    Tokens(Vec<Token>),
    Labels(Vec<i64>),
}

impl TokenLabels {
    /// @ai:intent Normalize to typed tokens, bare labels get their 0-based position
    /// @ai:effects pure
    pub fn to_tokens(&self) -> Vec<Token> {
        match self {
            TokenLabels::Tokens(tokens) => tokens.clone(),
            TokenLabels::Labels(labels) => Token::from_labels(labels),
        }
    }
}

impl From<Vec<Token>> for TokenLabels {
    fn from(tokens: Vec<Token>) -> Self {
        TokenLabels::Tokens(tokens)
    }
}

impl From<Vec<i64>> for TokenLabels {
    fn from(labels: Vec<i64>) -> Self {
        TokenLabels::Labels(labels)
    }
}

/// @ai:intent Labels of a behavior, tagged by the task they belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task_type", content = "values", rename_all = "snake_case")]
pub enum TaskLabels {
    SequenceClassification(LabelSet<Label>),
    MultiLabelSequenceClassification(LabelSet<Vec<i64>>),
    SpanClassification(LabelSet<Vec<Span>>),
    TokenClassification(LabelSet<TokenLabels>),
}

impl TaskLabels {
    pub fn task_type(&self) -> TaskType {
        match self {
            TaskLabels::SequenceClassification(_) => TaskType::SequenceClassification,
            TaskLabels::MultiLabelSequenceClassification(_) => {
                TaskType::MultiLabelSequenceClassification
            }
            TaskLabels::SpanClassification(_) => TaskType::SpanClassification,
            TaskLabels::TokenClassification(_) => TaskType::TokenClassification,
        }
    }

    pub fn explicit_len(&self) -> Option<usize> {
        match self {
            TaskLabels::SequenceClassification(set) => set.explicit_len(),
            TaskLabels::MultiLabelSequenceClassification(set) => set.explicit_len(),
            TaskLabels::SpanClassification(set) => set.explicit_len(),
            TaskLabels::TokenClassification(set) => set.explicit_len(),
        }
    }

    /// @ai:intent Label of one sample as a JSON value
    /// @ai:effects pure
    pub fn value_at(&self, index: usize) -> Result<Value> {
        let value = match self {
            TaskLabels::SequenceClassification(set) => serde_json::to_value(set.get(index))?,
            TaskLabels::MultiLabelSequenceClassification(set) => {
                serde_json::to_value(set.get(index))?
            }
            TaskLabels::SpanClassification(set) => serde_json::to_value(set.get(index))?,
            TaskLabels::TokenClassification(set) => serde_json::to_value(set.get(index))?,
        };
        Ok(value)
    }
}

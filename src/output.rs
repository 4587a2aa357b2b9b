//! @ai:module:intent Typed per-sample outputs with task-specific success predicates
//! @ai:module:layer domain
//! @ai:module:public_api Output, SequenceClassificationOutput, MultiLabelSequenceClassificationOutput, SpanClassificationOutput, TokenClassificationOutput, SuccessMetric
//! @ai:module:stateless true

use crate::types::{BinarySpan, Label, Span, TaskType, Token};
use serde::{Deserialize, Serialize};

/// @ai:intent Which success predicate the performer reads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessMetric {
    #[default]
    Success,
    BinarySuccess,
}

impl SuccessMetric {
    pub fn from_binarize(binarize: bool) -> Self {
        if binarize {
            SuccessMetric::BinarySuccess
        } else {
            SuccessMetric::Success
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessMetric::Success => "success",
            SuccessMetric::BinarySuccess => "binary_success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceClassificationOutput {
    pub text: String,
    pub y: Label,
    pub y_pred: Label,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_pred_prob: Option<f64>,
}

impl SequenceClassificationOutput {
    pub fn success(&self) -> bool {
        self.y == self.y_pred
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLabelSequenceClassificationOutput {
    pub text: String,
    pub y: Vec<i64>,
    pub y_pred: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_pred_prob: Option<Vec<f64>>,
}

impl MultiLabelSequenceClassificationOutput {
    /// @ai:intent Full label-vector equality
    pub fn success(&self) -> bool {
        self.y == self.y_pred
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanClassificationOutput {
    pub text: String,
    pub y: Vec<Span>,
    pub y_pred: Vec<Span>,
}

impl SpanClassificationOutput {
    /// @ai:intent Set-style match: same count and equal after canonical sort
    /// @ai:effects pure
    pub fn success(&self) -> bool {
        sorted_match(self.y.clone(), self.y_pred.clone())
    }

    /// @ai:intent Set-style match on label-free regions
    /// @ai:effects pure
    pub fn binary_success(&self) -> bool {
        let y: Vec<BinarySpan> = self.y.iter().map(Span::to_binary).collect();
        let y_pred: Vec<BinarySpan> = self.y_pred.iter().map(Span::to_binary).collect();
        sorted_match(y, y_pred)
    }
}

fn sorted_match<T: Ord>(mut y: Vec<T>, mut y_pred: Vec<T>) -> bool {
    if y.len() != y_pred.len() {
        return false;
    }
    y.sort();
    y_pred.sort();
    y == y_pred
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClassificationOutput {
    pub text: String,
    pub y: Vec<Token>,
    pub y_pred: Vec<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_pred_prob: Option<Vec<f64>>,
}

impl TokenClassificationOutput {
    /// @ai:intent Ordered, position-sensitive sequence equality
    pub fn success(&self) -> bool {
        self.y == self.y_pred
    }
}

/// @ai:intent Output of one sample, tagged by task type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "task_type", rename_all = "snake_case")]
pub enum Output {
    SequenceClassification(SequenceClassificationOutput),
    MultiLabelSequenceClassification(MultiLabelSequenceClassificationOutput),
    SpanClassification(SpanClassificationOutput),
    TokenClassification(TokenClassificationOutput),
}

impl Output {
    pub fn task_type(&self) -> TaskType {
        match self {
            Output::SequenceClassification(_) => TaskType::SequenceClassification,
            Output::MultiLabelSequenceClassification(_) => {
                TaskType::MultiLabelSequenceClassification
            }
            Output::SpanClassification(_) => TaskType::SpanClassification,
            Output::TokenClassification(_) => TaskType::TokenClassification,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Output::SequenceClassification(o) => &o.text,
            Output::MultiLabelSequenceClassification(o) => &o.text,
            Output::SpanClassification(o) => &o.text,
            Output::TokenClassification(o) => &o.text,
        }
    }

    /// @ai:intent Exact success predicate of the underlying variant
    /// @ai:effects pure
    pub fn success(&self) -> bool {
        match self {
            Output::SequenceClassification(o) => o.success(),
            Output::MultiLabelSequenceClassification(o) => o.success(),
            Output::SpanClassification(o) => o.success(),
            Output::TokenClassification(o) => o.success(),
        }
    }

    /// @ai:intent Label-free success, only defined for span outputs
    /// @ai:effects pure
    pub fn binary_success(&self) -> Option<bool> {
        match self {
            Output::SpanClassification(o) => Some(o.binary_success()),
            _ => None,
        }
    }

    /// @ai:intent Read the requested success predicate
    /// @ai:post None when the metric does not apply to this variant
    pub fn score(&self, metric: SuccessMetric) -> Option<bool> {
        match metric {
            SuccessMetric::Success => Some(self.success()),
            SuccessMetric::BinarySuccess => self.binary_success(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_output(y: Vec<Span>, y_pred: Vec<Span>) -> SpanClassificationOutput {
        SpanClassificationOutput {
            text: "This is a test".to_string(),
            y,
            y_pred,
        }
    }

    #[test]
    fn test_sequence_success() {
        let output = SequenceClassificationOutput {
            text: "good".to_string(),
            y: Label::Id(1),
            y_pred: Label::Id(1),
            y_pred_prob: Some(0.8),
        };
        assert!(output.success());
    }

    #[test]
    fn test_span_success_is_order_insensitive() {
        let output = span_output(
            vec![Span::new(0, 10, "A"), Span::new(12, 15, "B")],
            vec![Span::new(12, 15, "B"), Span::new(0, 10, "A")],
        );
        assert!(output.success());
    }

    #[test]
    fn test_span_region_mismatch_fails() {
        let output = span_output(vec![Span::new(0, 8, "X")], vec![Span::new(0, 4, "X")]);
        assert!(!output.success());
    }

    #[test]
    fn test_span_length_mismatch_fails() {
        let output = span_output(
            vec![Span::new(2, 5, 1), Span::new(1, 8, 0)],
            vec![Span::new(1, 8, 0), Span::new(2, 5, 1), Span::new(4, 6, 1)],
        );
        assert!(!output.success());
        assert!(!output.binary_success());
    }

    #[test]
    fn test_binary_success_ignores_label() {
        let output = span_output(vec![Span::new(0, 10, 4)], vec![Span::new(0, 10, 5)]);
        assert!(output.binary_success());
        assert!(!output.success());
    }

    #[test]
    fn test_token_success_is_position_sensitive() {
        let output = TokenClassificationOutput {
            text: "a b".to_string(),
            y: vec![Token::new(0, 0), Token::new(1, 1)],
            y_pred: vec![Token::new(1, 1), Token::new(0, 0)],
            y_pred_prob: None,
        };
        assert!(!output.success());
    }

    #[test]
    fn test_binary_metric_undefined_for_sequence() {
        let output = Output::SequenceClassification(SequenceClassificationOutput {
            text: "t".to_string(),
            y: Label::Id(0),
            y_pred: Label::Id(0),
            y_pred_prob: None,
        });
        assert_eq!(output.score(SuccessMetric::Success), Some(true));
        assert_eq!(output.score(SuccessMetric::BinarySuccess), None);
    }
}

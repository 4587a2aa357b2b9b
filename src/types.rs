//! @ai:module:intent Core value types shared by behaviors and outputs
//! @ai:module:layer domain
//! @ai:module:public_api BehaviorType, TaskType, Label, Span, BinarySpan, Token
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// @ai:intent Kind of behavioral test
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorType {
    /// Prediction should not change under the perturbation
    Invariance,
    /// Prediction should change in an expected direction
    Directional,
    /// Prediction should be correct on simple cases
    MinimumFunctionality,
}

impl BehaviorType {
    /// @ai:intent Convert behavior type to its report representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorType::Invariance => "invariance",
            BehaviorType::Directional => "directional",
            BehaviorType::MinimumFunctionality => "minimum functionality",
        }
    }
}

impl std::fmt::Display for BehaviorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Classification shape a behavior produces outputs for
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    SequenceClassification,
    MultiLabelSequenceClassification,
    SpanClassification,
    TokenClassification,
}

impl TaskType {
    /// @ai:intent Convert task type to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::SequenceClassification => "sequence_classification",
            TaskType::MultiLabelSequenceClassification => "multi_label_sequence_classification",
            TaskType::SpanClassification => "span_classification",
            TaskType::TokenClassification => "token_classification",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Class label, either a numeric id or a name
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Id(i64),
    Name(String),
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Id(id) => write!(f, "{}", id),
            Label::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<i64> for Label {
    fn from(id: i64) -> Self {
        Label::Id(id)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Label::Name(name.to_string())
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Label::Name(name)
    }
}

/// @ai:intent Labeled region of a text for span classification
///
/// Equality, hashing and ordering only look at `(start, end, label)`;
/// `text` and `prob` are metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub label: Label,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob: Option<f64>,
}

impl Span {
    /// @ai:intent Create a span without metadata
    /// @ai:effects pure
    pub fn new(start: usize, end: usize, label: impl Into<Label>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            text: None,
            prob: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_prob(mut self, prob: f64) -> Self {
        self.prob = Some(prob);
        self
    }

    /// @ai:intent Project the span to its label-free region
    /// @ai:effects pure
    pub fn to_binary(&self) -> BinarySpan {
        BinarySpan {
            start: self.start,
            end: self.end,
            text: self.text.clone(),
            prob: self.prob,
        }
    }

    fn key(&self) -> (usize, usize, &Label) {
        (self.start, self.end, &self.label)
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Span {}

impl Hash for Span {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// @ai:intent Label-free span, compared on `(start, end)` only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinarySpan {
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob: Option<f64>,
}

impl PartialEq for BinarySpan {
    fn eq(&self, other: &Self) -> bool {
        (self.start, self.end) == (other.start, other.end)
    }
}

impl Eq for BinarySpan {}

impl Hash for BinarySpan {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.start, self.end).hash(state);
    }
}

impl PartialOrd for BinarySpan {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BinarySpan {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.start, self.end).cmp(&(other.start, other.end))
    }
}

/// @ai:intent Classification of one position in a token sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub pos: usize,
    pub label: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob: Option<f64>,
}

impl Token {
    pub fn new(pos: usize, label: i64) -> Self {
        Self {
            pos,
            label,
            prob: None,
        }
    }

    /// @ai:intent Pair bare labels with their 0-based position
    /// @ai:effects pure
    pub fn from_labels(labels: &[i64]) -> Vec<Token> {
        labels
            .iter()
            .enumerate()
            .map(|(pos, label)| Token::new(pos, *label))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_equality_ignores_metadata() {
        let a = Span::new(0, 10, 1).with_text("Berlin").with_prob(0.9);
        let b = Span::new(0, 10, 1);
        assert_eq!(a, b);
        assert_ne!(a, Span::new(0, 10, 2));
    }

    #[test]
    fn test_span_ordering_by_field() {
        let mut spans = vec![
            Span::new(20, 30, 1),
            Span::new(2, 5, 1),
            Span::new(2, 4, 0),
        ];
        spans.sort();
        assert_eq!(spans[0], Span::new(2, 4, 0));
        assert_eq!(spans[2], Span::new(20, 30, 1));
    }

    #[test]
    fn test_binary_span_drops_label() {
        assert_eq!(Span::new(0, 10, 4).to_binary(), Span::new(0, 10, 5).to_binary());
    }

    #[test]
    fn test_label_untagged_serde() {
        let id: Label = serde_json::from_str("3").unwrap();
        let name: Label = serde_json::from_str("\"PER\"").unwrap();
        assert_eq!(id, Label::Id(3));
        assert_eq!(name, Label::from("PER"));
    }

    #[test]
    fn test_token_from_labels() {
        let tokens = Token::from_labels(&[0, 1, 1]);
        assert_eq!(tokens[2], Token::new(2, 1));
    }

    #[test]
    fn test_behavior_type_as_str() {
        assert_eq!(BehaviorType::Invariance.as_str(), "invariance");
        assert_eq!(
            BehaviorType::MinimumFunctionality.to_string(),
            "minimum functionality"
        );
    }
}

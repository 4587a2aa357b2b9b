//! @ai:module:intent Normalize raw predictions into typed outputs per task variant
//! @ai:module:layer domain
//! @ai:module:public_api build_outputs
//! @ai:module:stateless true

use crate::behavior::labels::{LabelSet, TaskLabels};
use crate::error::{Error, Result};
use crate::output::{
    MultiLabelSequenceClassificationOutput, Output, SequenceClassificationOutput,
    SpanClassificationOutput, TokenClassificationOutput,
};
use crate::types::{Label, Span, TaskType, Token};
use serde_json::Value;

/// @ai:intent Zip predictions, labels and samples into one output per sample
/// @ai:pre predictions.len() == samples.len()
/// @ai:post output order matches sample order
/// @ai:effects pure
pub fn build_outputs(
    name: &str,
    labels: &TaskLabels,
    samples: &[String],
    predictions: Vec<Value>,
) -> Result<Vec<Output>> {
    samples
        .iter()
        .zip(predictions)
        .enumerate()
        .map(|(index, (text, raw))| build_output(name, labels, index, text, raw))
        .collect()
}

fn build_output(
    name: &str,
    labels: &TaskLabels,
    index: usize,
    text: &str,
    raw: Value,
) -> Result<Output> {
    let text = text.to_string();

    let output = match labels {
        TaskLabels::SequenceClassification(set) => {
            let (y_pred, y_pred_prob) = sequence_prediction(&raw)?;
            Output::SequenceClassification(SequenceClassificationOutput {
                text,
                y: label_at(name, set, index)?.clone(),
                y_pred,
                y_pred_prob,
            })
        }
        TaskLabels::MultiLabelSequenceClassification(set) => {
            let (y_pred, y_pred_prob) = multi_label_prediction(&raw)?;
            Output::MultiLabelSequenceClassification(MultiLabelSequenceClassificationOutput {
                text,
                y: label_at(name, set, index)?.clone(),
                y_pred,
                y_pred_prob,
            })
        }
        TaskLabels::SpanClassification(set) => {
            Output::SpanClassification(SpanClassificationOutput {
                text,
                y: label_at(name, set, index)?.clone(),
                y_pred: span_prediction(&raw)?,
            })
        }
        TaskLabels::TokenClassification(set) => {
            Output::TokenClassification(TokenClassificationOutput {
                text,
                y: label_at(name, set, index)?.to_tokens(),
                y_pred: token_prediction(&raw)?,
                y_pred_prob: None,
            })
        }
    };

    Ok(output)
}

fn label_at<'a, T>(name: &str, set: &'a LabelSet<T>, index: usize) -> Result<&'a T> {
    set.get(index).ok_or_else(|| Error::InvalidLabelCount {
        name: name.to_string(),
        labels: set.explicit_len().unwrap_or(0),
        samples: index + 1,
    })
}

/// @ai:intent Name the JSON kind of a value for error messages
/// @ai:effects pure
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unsupported(task: TaskType, value: &Value) -> Error {
    Error::UnsupportedPrediction {
        task: task.as_str().to_string(),
        found: value.to_string(),
    }
}

fn as_label(value: &Value) -> Option<Label> {
    match value {
        Value::Number(n) => n.as_i64().map(Label::Id),
        Value::String(s) => Some(Label::Name(s.clone())),
        _ => None,
    }
}

/// @ai:intent Accept a bare label or a `[label, probability]` pair
/// @ai:effects pure
fn sequence_prediction(raw: &Value) -> Result<(Label, Option<f64>)> {
    let task = TaskType::SequenceClassification;

    match raw {
        Value::Array(pair) if pair.len() == 2 => {
            let label = as_label(&pair[0]).ok_or_else(|| unsupported(task, raw))?;
            let prob = pair[1].as_f64().ok_or_else(|| unsupported(task, raw))?;
            Ok((label, Some(prob)))
        }
        other => as_label(other)
            .map(|label| (label, None))
            .ok_or_else(|| unsupported(task, raw)),
    }
}

fn as_int_vec(value: &Value) -> Option<Vec<i64>> {
    value.as_array()?.iter().map(Value::as_i64).collect()
}

fn as_float_vec(value: &Value) -> Option<Vec<f64>> {
    value.as_array()?.iter().map(Value::as_f64).collect()
}

/// @ai:intent Accept a label vector or a `[labels, probabilities]` pair
/// @ai:effects pure
fn multi_label_prediction(raw: &Value) -> Result<(Vec<i64>, Option<Vec<f64>>)> {
    let task = TaskType::MultiLabelSequenceClassification;

    match raw.as_array() {
        Some(pair) if pair.len() == 2 && pair[0].is_array() => {
            let labels = as_int_vec(&pair[0]).ok_or_else(|| unsupported(task, raw))?;
            let probs = as_float_vec(&pair[1]).ok_or_else(|| unsupported(task, raw))?;
            Ok((labels, Some(probs)))
        }
        Some(_) => as_int_vec(raw)
            .map(|labels| (labels, None))
            .ok_or_else(|| unsupported(task, raw)),
        None => Err(unsupported(task, raw)),
    }
}

/// @ai:intent Build a span from a `[start, end, label, text?, prob?]` tuple
/// @ai:effects pure
fn tuple_span(tuple: &[Value]) -> Result<Span> {
    if tuple.len() < 3 {
        return Err(Error::MalformedSpan { len: tuple.len() });
    }

    let invalid = || Error::UnsupportedSpanFormat {
        found: Value::Array(tuple.to_vec()).to_string(),
    };

    let start = tuple[0].as_u64().ok_or_else(invalid)? as usize;
    let end = tuple[1].as_u64().ok_or_else(invalid)? as usize;
    let label = as_label(&tuple[2]).ok_or_else(invalid)?;

    Ok(Span {
        start,
        end,
        label,
        text: tuple.get(3).and_then(Value::as_str).map(str::to_string),
        prob: tuple.get(4).and_then(Value::as_f64),
    })
}

/// @ai:intent Accept a list of span tuples or a list of typed spans
///
/// The representation is decided by the first element; every element of the
/// sample must then use that same representation.
/// @ai:effects pure
fn span_prediction(raw: &Value) -> Result<Vec<Span>> {
    let elements = raw.as_array().ok_or_else(|| Error::UnsupportedSpanFormat {
        found: json_kind(raw).to_string(),
    })?;

    let Some(first) = elements.first() else {
        return Ok(Vec::new());
    };

    match first {
        Value::Array(_) => elements
            .iter()
            .map(|element| match element {
                Value::Array(tuple) => tuple_span(tuple),
                other => Err(Error::UnsupportedSpanFormat {
                    found: json_kind(other).to_string(),
                }),
            })
            .collect(),
        Value::Object(_) => elements
            .iter()
            .map(|element| match element {
                Value::Object(_) => {
                    serde_json::from_value::<Span>(element.clone()).map_err(Error::from)
                }
                other => Err(Error::UnsupportedSpanFormat {
                    found: json_kind(other).to_string(),
                }),
            })
            .collect(),
        other => Err(Error::UnsupportedSpanFormat {
            found: json_kind(other).to_string(),
        }),
    }
}

/// @ai:intent Accept a list of typed tokens or a list of bare integer labels
/// @ai:effects pure
fn token_prediction(raw: &Value) -> Result<Vec<Token>> {
    let elements = raw.as_array().ok_or_else(|| Error::UnsupportedTokenFormat {
        found: json_kind(raw).to_string(),
    })?;

    let Some(first) = elements.first() else {
        return Ok(Vec::new());
    };

    if first.is_object() {
        return elements
            .iter()
            .map(|element| match element {
                Value::Object(_) => {
                    serde_json::from_value::<Token>(element.clone()).map_err(Error::from)
                }
                other => Err(Error::UnsupportedTokenFormat {
                    found: json_kind(other).to_string(),
                }),
            })
            .collect();
    }

    if first.is_i64() {
        let labels = elements
            .iter()
            .map(|element| {
                element.as_i64().ok_or_else(|| Error::UnsupportedTokenFormat {
                    found: json_kind(element).to_string(),
                })
            })
            .collect::<Result<Vec<i64>>>()?;
        return Ok(Token::from_labels(&labels));
    }

    Err(Error::UnsupportedTokenFormat {
        found: json_kind(first).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sequence_bare_and_pair() {
        assert_eq!(sequence_prediction(&json!(1)).unwrap(), (Label::Id(1), None));
        assert_eq!(
            sequence_prediction(&json!(["POS", 0.75])).unwrap(),
            (Label::from("POS"), Some(0.75))
        );
        assert!(matches!(
            sequence_prediction(&json!({"label": 1})),
            Err(Error::UnsupportedPrediction { .. })
        ));
    }

    #[test]
    fn test_multi_label_vector_and_pair() {
        assert_eq!(
            multi_label_prediction(&json!([1, 0, 1])).unwrap(),
            (vec![1, 0, 1], None)
        );
        assert_eq!(
            multi_label_prediction(&json!([[1, 0], [0.9, 0.1]])).unwrap(),
            (vec![1, 0], Some(vec![0.9, 0.1]))
        );
    }

    #[test]
    fn test_span_tuples() {
        let raw = json!([[0, 10, "PER", "Wolfgang", 0.9], [20, 26, 1]]);
        let spans = span_prediction(&raw).unwrap();
        assert_eq!(spans, vec![Span::new(0, 10, "PER"), Span::new(20, 26, 1)]);
        assert_eq!(spans[0].text.as_deref(), Some("Wolfgang"));
        assert_eq!(spans[0].prob, Some(0.9));
    }

    #[test]
    fn test_span_objects() {
        let spans = span_prediction(&json!([{"start": 0, "end": 10, "label": 1}])).unwrap();
        assert_eq!(spans, vec![Span::new(0, 10, 1)]);
    }

    #[test]
    fn test_span_empty_prediction() {
        assert!(span_prediction(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_span_short_tuple_is_malformed() {
        assert!(matches!(
            span_prediction(&json!([[0, 10]])),
            Err(Error::MalformedSpan { len: 2 })
        ));
    }

    #[test]
    fn test_span_unsupported_element() {
        match span_prediction(&json!(["PER"])) {
            Err(Error::UnsupportedSpanFormat { found }) => assert_eq!(found, "string"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_tokens_from_bare_labels() {
        assert_eq!(
            token_prediction(&json!([0, 1, 1])).unwrap(),
            vec![Token::new(0, 0), Token::new(1, 1), Token::new(2, 1)]
        );
    }

    #[test]
    fn test_tokens_unsupported_element() {
        assert!(matches!(
            token_prediction(&json!(["B-PER"])),
            Err(Error::UnsupportedTokenFormat { .. })
        ));
    }
}

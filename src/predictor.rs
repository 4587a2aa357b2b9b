//! @ai:module:intent Prediction function seam between behaviors and the model under test
//! @ai:module:layer infrastructure
//! @ai:module:public_api Predictor, SharedPredictor, predict_fn, MockPredictor, RecordedPredictor
//! @ai:module:stateless false

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// @ai:intent Opaque model wrapper: one raw prediction per sample, in input order
///
/// Raw predictions are JSON values so every accepted shape (bare label,
/// `[label, prob]`, span tuples, typed spans or tokens) can be expressed.
pub trait Predictor: Send + Sync {
    /// @ai:intent Predict all samples in a single call
    fn predict(&self, samples: &[String]) -> Result<Vec<Value>>;
}

/// Predictor handle shared between behaviors of a suite.
pub type SharedPredictor = Arc<dyn Predictor>;

struct FnPredictor<F>(F);

impl<F> Predictor for FnPredictor<F>
where
    F: Fn(&[String]) -> Result<Vec<Value>> + Send + Sync,
{
    fn predict(&self, samples: &[String]) -> Result<Vec<Value>> {
        (self.0)(samples)
    }
}

/// @ai:intent Wrap a closure as a shared predictor
/// @ai:effects pure
pub fn predict_fn<F>(f: F) -> SharedPredictor
where
    F: Fn(&[String]) -> Result<Vec<Value>> + Send + Sync + 'static,
{
    Arc::new(FnPredictor(f))
}

/// @ai:intent Mock predictor returning canned predictions
pub struct MockPredictor {
    response: MockResponse,
    calls: AtomicUsize,
}

enum MockResponse {
    Constant(Value),
    Fixed(Vec<Value>),
}

impl MockPredictor {
    /// @ai:intent Create a mock that predicts the same value for every sample
    /// @ai:effects pure
    pub fn constant(value: Value) -> Self {
        Self {
            response: MockResponse::Constant(value),
            calls: AtomicUsize::new(0),
        }
    }

    /// @ai:intent Create a mock that returns exactly `values`, whatever the input
    /// @ai:effects pure
    pub fn fixed(values: Vec<Value>) -> Self {
        Self {
            response: MockResponse::Fixed(values),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `predict` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Predictor for MockPredictor {
    fn predict(&self, samples: &[String]) -> Result<Vec<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        Ok(match &self.response {
            MockResponse::Constant(value) => vec![value.clone(); samples.len()],
            MockResponse::Fixed(values) => values.clone(),
        })
    }
}

/// @ai:intent Replays predictions recorded offline, keyed by sample text
pub struct RecordedPredictor {
    predictions: HashMap<String, Value>,
}

impl RecordedPredictor {
    pub fn new(predictions: HashMap<String, Value>) -> Self {
        Self { predictions }
    }

    /// @ai:intent Load a `{ "sample text": prediction }` JSON object
    /// @ai:pre path points to a JSON object
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read predictions file: {}", path.display()))?;

        let predictions: HashMap<String, Value> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse predictions file: {}", path.display()))?;

        tracing::info!(
            "Loaded {} recorded predictions from {}",
            predictions.len(),
            path.display()
        );
        Ok(Self::new(predictions))
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

impl Predictor for RecordedPredictor {
    /// @ai:intent Look up every sample; a missing sample is an error
    /// @ai:effects pure
    fn predict(&self, samples: &[String]) -> Result<Vec<Value>> {
        samples
            .iter()
            .map(|sample| {
                self.predictions
                    .get(sample)
                    .cloned()
                    .with_context(|| format!("No recorded prediction for sample: {:?}", sample))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn samples(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_mock_constant_broadcasts() {
        let mock = MockPredictor::constant(json!(1));
        let predictions = mock.predict(&samples(&["a", "b", "c"])).unwrap();
        assert_eq!(predictions, vec![json!(1); 3]);
        assert_eq!(mock.calls(), 1);
    }

    #[test]
    fn test_predict_fn_wraps_closure() {
        let predictor = predict_fn(|samples| Ok(samples.iter().map(|s| json!(s.len())).collect()));
        let predictions = predictor.predict(&samples(&["ab", "abcd"])).unwrap();
        assert_eq!(predictions, vec![json!(2), json!(4)]);
    }

    #[test]
    fn test_recorded_predictor_lookup() {
        let mut recorded = HashMap::new();
        recorded.insert("good movie".to_string(), json!(1));
        let predictor = RecordedPredictor::new(recorded);

        assert_eq!(predictor.predict(&samples(&["good movie"])).unwrap(), vec![json!(1)]);
        assert!(predictor.predict(&samples(&["unknown"])).is_err());
    }

    #[test]
    fn test_recorded_predictor_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("predictions.json");
        std::fs::write(&path, r#"{"a": 0, "b": [1, 0.7]}"#).unwrap();

        let predictor = RecordedPredictor::load(&path).unwrap();
        assert_eq!(predictor.len(), 2);
        assert_eq!(predictor.predict(&samples(&["b"])).unwrap(), vec![json!([1, 0.7])]);
    }
}

//! @ai:module:intent JSON persistence of behaviors, one record per behavior
//! @ai:module:layer infrastructure
//! @ai:module:public_api list_records, RECORD_EXTENSION
//! @ai:module:stateless true

use crate::behavior::Behavior;
use crate::error::{Error, Result};
use crate::predictor::SharedPredictor;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension of persisted behavior records.
pub const RECORD_EXTENSION: &str = "json";

impl Behavior {
    /// @ai:intent Record file stem: the name's words joined with underscores
    /// @ai:post the stem is non-empty and holds no path separator
    /// @ai:effects pure
    pub fn file_stem(&self) -> Result<String> {
        let stem: String = self
            .name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();

        if stem.is_empty() {
            return Err(Error::InvalidRecordName {
                name: self.name.clone(),
            });
        }
        Ok(stem)
    }

    /// @ai:intent Persist a not-yet-run snapshot of this behavior
    /// @ai:post the live behavior keeps its outputs and run flag
    /// @ai:effects fs:write
    pub fn to_file(&self, folder: &Path) -> Result<PathBuf> {
        let path = folder.join(format!("{}.{}", self.file_stem()?, RECORD_EXTENSION));
        std::fs::create_dir_all(folder)?;

        let json = serde_json::to_string_pretty(&self.snapshot())?;

        std::fs::write(&path, json).map_err(|source| Error::FileWrite {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Saved behavior '{}' to {}", self.name, path.display());
        Ok(path)
    }

    /// @ai:intent Load a persisted behavior and bind a prediction function
    /// @ai:pre path points to a record written by `to_file`
    /// @ai:effects fs:read
    pub fn from_file(path: &Path, predict_fn: Option<SharedPredictor>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut behavior: Behavior = serde_json::from_str(&content)?;
        behavior.validate()?;
        behavior.set_predict_fn(predict_fn);

        tracing::debug!("Loaded behavior '{}' from {}", behavior.name, path.display());
        Ok(behavior)
    }
}

/// @ai:intent Find behavior records directly inside a folder, sorted by file name
/// @ai:effects fs:read
pub fn list_records(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(Error::NotADirectory(folder.to_path_buf()));
    }

    let mut records = Vec::new();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        let is_record = path
            .extension()
            .map(|ext| ext == RECORD_EXTENSION)
            .unwrap_or(false);

        if is_record {
            records.push(path);
        } else {
            tracing::warn!("Skipping non-record file {}", path.display());
        }
    }

    records.sort();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{LabelSet, TokenLabels};
    use crate::predictor::{predict_fn, MockPredictor};
    use crate::types::{BehaviorType, Label, Span, Token};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn texts(n: usize) -> Vec<String> {
        vec!["My name is Wolfgang and I live in Berlin".to_string(); n]
    }

    #[test]
    fn test_file_stem_joins_whitespace() {
        let behavior = Behavior::sequence_classification(
            "Capability 2",
            "Test  sequence\tclassification",
            BehaviorType::Invariance,
            texts(1),
            LabelSet::Shared(Label::Id(1)),
        )
        .unwrap();
        assert_eq!(behavior.file_stem().unwrap(), "Test_sequence_classification");
    }

    fn named(name: &str) -> Behavior {
        Behavior::sequence_classification(
            "Capability 1",
            name,
            BehaviorType::Invariance,
            texts(1),
            LabelSet::Shared(Label::Id(1)),
        )
        .unwrap()
    }

    #[test]
    fn test_record_stays_inside_folder() {
        let temp = TempDir::new().unwrap();
        let suite = temp.path().join("suite");

        let behavior = named("../escape/a\\b");
        assert_eq!(behavior.file_stem().unwrap(), ".._escape_a_b");

        let path = behavior.to_file(&suite).unwrap();
        assert_eq!(path.parent(), Some(suite.as_path()));
        assert_eq!(list_records(&suite).unwrap(), vec![path]);
    }

    #[test]
    fn test_blank_name_has_no_record() {
        let temp = TempDir::new().unwrap();
        let behavior = named(" \t ");

        assert!(matches!(
            behavior.file_stem(),
            Err(Error::InvalidRecordName { .. })
        ));
        assert!(matches!(
            behavior.to_file(temp.path()),
            Err(Error::InvalidRecordName { .. })
        ));
    }

    #[test]
    fn test_round_trip_reproduces_outputs() {
        let temp = TempDir::new().unwrap();
        let predictor = predict_fn(|samples| {
            Ok(samples
                .iter()
                .enumerate()
                .map(|(i, _)| json!([[0, 10, i as i64], [20, 30, 1]]))
                .collect())
        });

        let mut behavior = Behavior::span_classification(
            "Capability 2",
            "Test span classification",
            BehaviorType::Invariance,
            texts(3),
            LabelSet::Shared(vec![Span::new(0, 10, 1), Span::new(20, 30, 1)]),
        )
        .unwrap()
        .with_description("spans survive persistence")
        .with_predict_fn(predictor.clone());
        behavior.run().unwrap();

        let path = behavior.to_file(temp.path()).unwrap();
        assert_eq!(path, temp.path().join("Test_span_classification.json"));
        assert!(behavior.is_ran());

        let mut loaded = Behavior::from_file(&path, Some(predictor)).unwrap();
        assert!(!loaded.is_ran());
        assert!(loaded.outputs().is_empty());
        assert_eq!(loaded.description.as_deref(), Some("spans survive persistence"));

        loaded.run().unwrap();
        assert_eq!(loaded.outputs(), behavior.outputs());
    }

    #[test]
    fn test_record_excludes_runtime_state() {
        let temp = TempDir::new().unwrap();
        let mut behavior = Behavior::token_classification(
            "Capability 1",
            "Token record",
            BehaviorType::Directional,
            texts(1),
            LabelSet::PerSample(vec![TokenLabels::Tokens(vec![Token::new(0, 1)])]),
        )
        .unwrap()
        .with_predict_fn(Arc::new(MockPredictor::constant(json!([1]))));
        behavior.run().unwrap();

        let path = behavior.to_file(temp.path()).unwrap();
        let record: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert!(record.get("outputs").is_none());
        assert!(record.get("is_ran").is_none());
        assert!(record.get("predict_fn").is_none());
        assert_eq!(record["labels"]["task_type"], json!("token_classification"));
    }

    #[test]
    fn test_loaded_behavior_without_predictor_cannot_run() {
        let temp = TempDir::new().unwrap();
        let behavior = Behavior::sequence_classification(
            "Capability 1",
            "Unbound",
            BehaviorType::Invariance,
            texts(1),
            LabelSet::Shared(Label::Id(1)),
        )
        .unwrap();

        let path = behavior.to_file(temp.path()).unwrap();
        let mut loaded = Behavior::from_file(&path, None).unwrap();
        assert!(matches!(loaded.run(), Err(Error::MissingPredictFn { .. })));
    }

    #[test]
    fn test_list_records_skips_other_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("b.json"), "{}").unwrap();
        std::fs::write(temp.path().join("a.json"), "{}").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "").unwrap();
        std::fs::create_dir(temp.path().join("nested")).unwrap();

        let records = list_records(temp.path()).unwrap();
        assert_eq!(
            records,
            vec![temp.path().join("a.json"), temp.path().join("b.json")]
        );
    }

    #[test]
    fn test_list_records_requires_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        assert!(matches!(list_records(&missing), Err(Error::NotADirectory(_))));
    }
}

//! @ai:module:intent Flatten a suite into one record per sample for external batch prediction
//! @ai:module:layer application
//! @ai:module:public_api SampleRecord, SampleTable
//! @ai:module:stateless true

use crate::behavior::{list_records, Behavior};
use crate::error::Result;
use crate::testpack::TestPack;
use crate::types::BehaviorType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// @ai:intent One sample of one behavior with its expected label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub capability: String,
    pub name: String,
    pub test_type: BehaviorType,
    pub text: String,
    pub label: Value,
}

/// @ai:intent Flat, index-addressable table of samples
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    records: Vec<SampleRecord>,
}

impl SampleTable {
    /// @ai:intent Flatten behaviors in iteration order, samples in input order
    /// @ai:effects pure
    pub fn from_behaviors<'a, I>(behaviors: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Behavior>,
    {
        let mut records = Vec::new();

        for behavior in behaviors {
            for (i, text) in behavior.samples().iter().enumerate() {
                records.push(SampleRecord {
                    capability: behavior.capability.clone(),
                    name: behavior.name.clone(),
                    test_type: behavior.test_type,
                    text: text.clone(),
                    label: behavior.labels().value_at(i)?,
                });
            }
        }

        Ok(Self { records })
    }

    pub fn from_testpack(testpack: &TestPack) -> Result<Self> {
        Self::from_behaviors(testpack.behaviors())
    }

    /// @ai:intent Flatten every record stored in a folder
    /// @ai:effects fs:read
    pub fn from_folder(folder: &Path) -> Result<Self> {
        let behaviors = list_records(folder)?
            .iter()
            .map(|path| Behavior::from_file(path, None))
            .collect::<Result<Vec<_>>>()?;

        let table = Self::from_behaviors(&behaviors)?;
        tracing::debug!(
            "Flattened {} behaviors into {} samples",
            behaviors.len(),
            table.len()
        );
        Ok(table)
    }

    pub fn get(&self, index: usize) -> Option<&SampleRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SampleRecord> {
        self.records.iter()
    }

    /// @ai:intent Write one JSON object per line
    /// @ai:effects io:write
    pub fn to_json_lines<W: Write>(&self, mut writer: W) -> Result<()> {
        for record in &self.records {
            serde_json::to_writer(&mut writer, record)?;
            writeln!(writer)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SampleTable {
    type Item = &'a SampleRecord;
    type IntoIter = std::slice::Iter<'a, SampleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::LabelSet;
    use crate::types::{Label, Span};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn pack() -> TestPack {
        let a = Behavior::sequence_classification(
            "Negation",
            "A",
            BehaviorType::Invariance,
            vec!["good".to_string(), "not good".to_string()],
            LabelSet::Shared(Label::Id(1)),
        )
        .unwrap();
        let b = Behavior::span_classification(
            "NER",
            "B",
            BehaviorType::MinimumFunctionality,
            vec!["I live in Berlin".to_string()],
            LabelSet::PerSample(vec![vec![Span::new(10, 16, "LOC")]]),
        )
        .unwrap();

        let mut pack = TestPack::default();
        pack.add(vec![a, b]).unwrap();
        pack
    }

    #[test]
    fn test_from_testpack_broadcasts_shared_label() {
        let table = SampleTable::from_testpack(&pack()).unwrap();
        assert_eq!(table.len(), 3);

        let first = table.get(0).unwrap();
        assert_eq!(first.name, "A");
        assert_eq!(first.label, json!(1));
        assert_eq!(table.get(1).unwrap().label, json!(1));
        assert_eq!(table.get(1).unwrap().text, "not good");

        let span = table.get(2).unwrap();
        assert_eq!(span.test_type, BehaviorType::MinimumFunctionality);
        assert_eq!(span.label[0]["label"], json!("LOC"));
    }

    #[test]
    fn test_from_folder_matches_testpack() {
        let temp = TempDir::new().unwrap();
        let pack = pack();
        pack.to_file(temp.path()).unwrap();

        assert_eq!(
            SampleTable::from_folder(temp.path()).unwrap(),
            SampleTable::from_testpack(&pack).unwrap()
        );
    }

    #[test]
    fn test_json_lines() {
        let table = SampleTable::from_testpack(&pack()).unwrap();
        let mut buffer = Vec::new();
        table.to_json_lines(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);

        let parsed: SampleRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, *table.get(0).unwrap());
    }
}

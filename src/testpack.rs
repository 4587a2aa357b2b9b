//! @ai:module:intent Test suite orchestration: collect behaviors, run once, aggregate
//! @ai:module:layer application
//! @ai:module:public_api TestPack, PredictionFns
//! @ai:module:stateless false

use crate::behavior::{list_records, Behavior, BehaviorSet};
use crate::config::FilterConfig;
use crate::error::{Error, Result};
use crate::output::Output;
use crate::performer::{PerformanceReport, Performer};
use crate::predictor::SharedPredictor;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// @ai:intent Prediction functions to bind when loading a suite from disk
pub enum PredictionFns {
    /// One function shared by every record.
    Shared(SharedPredictor),
    /// One function per record, paired with records in sorted file-name order.
    PerRecord(Vec<SharedPredictor>),
    /// Load without binding; bind later with `Behavior::set_predict_fn`.
    Unbound,
}

impl From<SharedPredictor> for PredictionFns {
    fn from(predictor: SharedPredictor) -> Self {
        PredictionFns::Shared(predictor)
    }
}

impl From<Vec<SharedPredictor>> for PredictionFns {
    fn from(predictors: Vec<SharedPredictor>) -> Self {
        PredictionFns::PerRecord(predictors)
    }
}

impl PredictionFns {
    fn for_record(&self, index: usize) -> Option<SharedPredictor> {
        match self {
            PredictionFns::Shared(predictor) => Some(predictor.clone()),
            PredictionFns::PerRecord(predictors) => predictors.get(index).cloned(),
            PredictionFns::Unbound => None,
        }
    }
}

/// @ai:intent Suite of uniquely named behaviors scored by one performer
pub struct TestPack {
    behaviors: BehaviorSet,
    performer: Performer,
    is_ran: bool,
}

impl TestPack {
    /// @ai:intent Create an empty, unrun pack
    /// @ai:effects pure
    pub fn new(performer: Performer) -> Self {
        Self {
            behaviors: BehaviorSet::new(),
            performer,
            is_ran: false,
        }
    }

    /// @ai:intent Create a pack from an initial batch of behaviors
    /// @ai:pre names are unique
    pub fn with_behaviors(behaviors: Vec<Behavior>, performer: Performer) -> Result<Self> {
        let mut pack = Self::new(performer);
        pack.add(behaviors)?;
        Ok(pack)
    }

    /// @ai:intent Add one behavior or a batch, all or nothing
    /// @ai:effects state:write
    pub fn add(&mut self, behaviors: impl Into<Vec<Behavior>>) -> Result<()> {
        self.behaviors.update(behaviors.into())
    }

    /// @ai:intent Drop behaviors the filter does not select
    /// @ai:effects state:write
    pub fn retain_matching(&mut self, filter: &FilterConfig) {
        let before = self.behaviors.len();
        self.behaviors
            .retain(|b| filter.matches(&b.capability, &b.name, b.test_type));

        let dropped = before - self.behaviors.len();
        if dropped > 0 {
            tracing::info!("Filtered out {} behaviors", dropped);
        }
    }

    /// @ai:intent Run every behavior, then fit the performer on all of them
    /// @ai:pre the pack has not run
    /// @ai:post result() is Some
    /// @ai:effects state:write, calls every prediction function
    pub fn run(&mut self) -> Result<()> {
        if self.is_ran {
            return Err(Error::TestPackAlreadyRan);
        }

        tracing::info!("Running test pack with {} behaviors", self.behaviors.len());
        for behavior in self.behaviors.iter_mut() {
            behavior.run()?;
        }

        self.performer.fit(&mut self.behaviors)?;
        self.is_ran = true;
        Ok(())
    }

    pub fn result(&self) -> Option<&PerformanceReport> {
        if !self.is_ran {
            return None;
        }
        self.performer.result()
    }

    /// @ai:intent Outputs of every behavior, by name
    pub fn outputs(&self) -> impl Iterator<Item = (&str, &[Output])> {
        self.behaviors
            .iter()
            .map(|behavior| (behavior.name.as_str(), behavior.outputs()))
    }

    pub fn behaviors(&self) -> &BehaviorSet {
        &self.behaviors
    }

    pub fn performer(&self) -> &Performer {
        &self.performer
    }

    pub fn is_ran(&self) -> bool {
        self.is_ran
    }

    /// @ai:intent Persist every behavior as its own record
    /// @ai:pre record file stems are unique, checked before anything is written
    /// @ai:post folder exists, even for an empty pack
    /// @ai:effects fs:write
    pub fn to_file(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let mut stems: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for behavior in &self.behaviors {
            stems
                .entry(behavior.file_stem()?)
                .or_default()
                .push(behavior.name.clone());
        }

        if let Some((stem, names)) = stems.into_iter().find(|(_, names)| names.len() > 1) {
            return Err(Error::RecordNameClash { stem, names });
        }

        std::fs::create_dir_all(folder)?;
        let paths = self
            .behaviors
            .iter()
            .map(|behavior| behavior.to_file(folder))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!("Saved {} behaviors to {}", paths.len(), folder.display());
        Ok(paths)
    }

    /// @ai:intent Rebuild a pack from a folder of records
    /// @ai:pre a per-record function list has one entry per record
    /// @ai:post the pack is unrun and the performer is the one supplied
    /// @ai:effects fs:read
    pub fn from_file(
        folder: &Path,
        prediction_fns: impl Into<PredictionFns>,
        performer: Performer,
    ) -> Result<Self> {
        let prediction_fns = prediction_fns.into();
        let records = list_records(folder)?;

        if let PredictionFns::PerRecord(predictors) = &prediction_fns {
            if predictors.len() != records.len() {
                return Err(Error::PredictionFunctionCountMismatch {
                    functions: predictors.len(),
                    records: records.len(),
                });
            }
        }

        let behaviors = records
            .iter()
            .enumerate()
            .map(|(i, path)| Behavior::from_file(path, prediction_fns.for_record(i)))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            "Loaded {} behaviors from {}",
            behaviors.len(),
            folder.display()
        );
        Self::with_behaviors(behaviors, performer)
    }
}

impl Default for TestPack {
    fn default() -> Self {
        Self::new(Performer::default())
    }
}

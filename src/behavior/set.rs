//! @ai:module:intent Uniqueness-enforcing collection of behaviors
//! @ai:module:layer domain
//! @ai:module:public_api BehaviorSet
//! @ai:module:stateless false

use crate::behavior::Behavior;
use crate::error::{Error, Result};
use std::collections::{btree_map, BTreeMap, HashSet};

/// @ai:intent Set of behaviors keyed by name
///
/// Inserts never overwrite: a name already present (or repeated inside one
/// batch) rejects the whole insert.
#[derive(Debug, Clone, Default)]
pub struct BehaviorSet {
    behaviors: BTreeMap<String, Behavior>,
}

impl BehaviorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Insert one behavior
    /// @ai:post on error the set is unchanged
    /// @ai:effects state:write
    pub fn add(&mut self, value: Behavior) -> Result<()> {
        if self.contains(&value.name) {
            return Err(Error::DuplicateBehavior {
                names: vec![value.name],
            });
        }

        self.behaviors.insert(value.name.clone(), value);
        Ok(())
    }

    /// @ai:intent Insert a batch of behaviors, all or nothing
    /// @ai:post on error the set is unchanged and every offending name is reported
    /// @ai:effects state:write
    pub fn update(&mut self, values: Vec<Behavior>) -> Result<()> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for value in &values {
            if self.contains(&value.name) || !seen.insert(value.name.clone()) {
                duplicates.push(value.name.clone());
            }
        }

        if !duplicates.is_empty() {
            return Err(Error::DuplicateBehavior { names: duplicates });
        }

        for value in values {
            self.behaviors.insert(value.name.clone(), value);
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.behaviors.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Behavior> {
        self.behaviors.get(name)
    }

    /// @ai:intent Keep only the behaviors matching `keep`
    /// @ai:effects state:write
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Behavior) -> bool,
    {
        self.behaviors.retain(|_, behavior| keep(behavior));
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.behaviors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, Behavior> {
        self.behaviors.values()
    }

    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, String, Behavior> {
        self.behaviors.values_mut()
    }
}

impl<'a> IntoIterator for &'a BehaviorSet {
    type Item = &'a Behavior;
    type IntoIter = btree_map::Values<'a, String, Behavior>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut BehaviorSet {
    type Item = &'a mut Behavior;
    type IntoIter = btree_map::ValuesMut<'a, String, Behavior>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl IntoIterator for BehaviorSet {
    type Item = Behavior;
    type IntoIter = btree_map::IntoValues<String, Behavior>;

    fn into_iter(self) -> Self::IntoIter {
        self.behaviors.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::LabelSet;
    use crate::types::{BehaviorType, Label};
    use pretty_assertions::assert_eq;

    fn behavior(name: &str) -> Behavior {
        Behavior::sequence_classification(
            "Capability 1",
            name,
            BehaviorType::Invariance,
            vec!["TEST".to_string()],
            LabelSet::PerSample(vec![Label::Id(1)]),
        )
        .unwrap()
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut set = BehaviorSet::new();
        let x = behavior("X");
        set.add(x.clone()).unwrap();

        match set.add(x) {
            Err(Error::DuplicateBehavior { names }) => assert_eq!(names, vec!["X".to_string()]),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_update_is_all_or_nothing() {
        let mut set = BehaviorSet::new();
        let x = behavior("X");
        set.add(x.clone()).unwrap();

        let result = set.update(vec![x, behavior("Y")]);
        assert!(matches!(result, Err(Error::DuplicateBehavior { .. })));
        assert!(!set.contains("Y"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_update_reports_every_duplicate() {
        let mut set = BehaviorSet::new();
        set.update(vec![behavior("A"), behavior("B")]).unwrap();

        match set.update(vec![behavior("A"), behavior("C"), behavior("B")]) {
            Err(Error::DuplicateBehavior { names }) => {
                assert_eq!(names, vec!["A".to_string(), "B".to_string()])
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!set.contains("C"));
    }

    #[test]
    fn test_update_rejects_repeats_within_batch() {
        let mut set = BehaviorSet::new();
        let result = set.update(vec![behavior("A"), behavior("A")]);
        assert!(result.is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_names_iterate() {
        let mut set = BehaviorSet::new();
        set.update(vec![behavior("B"), behavior("A")]).unwrap();
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}

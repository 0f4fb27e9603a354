//! Explicit index of internal heat exchangers.
//!
//! Wiring needs, for every cycle, the internal heat exchangers on its cold
//! side (by target) and on its hot side (by source). Both lookups are range
//! or filter scans over integer keys; labels are never parsed.

use hp_core::CycleId;
use std::collections::BTreeMap;

/// One internal heat exchanger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatExEntry<'a> {
    /// Cycle whose hot (condensate) side passes through the unit.
    pub source: CycleId,
    /// Cycle whose cold (suction) side passes through the unit.
    pub target: CycleId,
    pub label: &'a str,
}

/// `(source, target) -> component label`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeatExIndex {
    units: BTreeMap<(CycleId, CycleId), String>,
}

impl HeatExIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source: CycleId, target: CycleId, label: impl Into<String>) {
        self.units.insert((source, target), label.into());
    }

    pub fn get(&self, source: CycleId, target: CycleId) -> Option<&str> {
        self.units.get(&(source, target)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All entries by ascending `(source, target)`.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = HeatExEntry<'_>> {
        self.units.iter().map(|(&(source, target), label)| HeatExEntry {
            source,
            target,
            label: label.as_str(),
        })
    }

    /// Units heating the cold side of `target`, by ascending source cycle.
    pub fn cold_chain(&self, target: CycleId) -> Vec<HeatExEntry<'_>> {
        self.iter().filter(|e| e.target == target).collect()
    }

    /// Units cooling the hot side of `source`, by descending target cycle.
    pub fn hot_chain(&self, source: CycleId) -> Vec<HeatExEntry<'_>> {
        self.iter().filter(|e| e.source == source).rev().collect()
    }

    /// Forget the unit with the given component label, if indexed.
    pub fn remove_label(&mut self, label: &str) -> Option<(CycleId, CycleId)> {
        let key = self
            .units
            .iter()
            .find(|(_, l)| l.as_str() == label)
            .map(|(k, _)| *k)?;
        self.units.remove(&key);
        Some(key)
    }
}

//! Declarative heat pump configuration.

use hp_core::CycleId;
use hp_graph::ComponentKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Rejected configuration. Raised before any component is created.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("At least one fluid is required")]
    NoFluids,

    #[error("A heat pump needs at least one cycle")]
    NoCycles,

    #[error("Cycle {cycle} in {context} is outside 1..={nr_cycles}")]
    CycleOutOfRange {
        context: &'static str,
        cycle: u32,
        nr_cycles: u32,
    },

    #[error("Internal heat exchanger entry for cycle {cycle} lists no target cycles")]
    EmptyTargets { cycle: u32 },

    #[error("Internal heat exchanger entry for cycle {cycle} lists target {target} more than once")]
    DuplicateTarget { cycle: u32, target: u32 },

    #[error("Intercooler entry for cycle {cycle} must have at least one stage")]
    NoIntercoolerStages { cycle: u32 },

    #[error("Intercooler entry for cycle {cycle} has {amount} stages, at most {max} allowed")]
    TooManyIntercoolerStages { cycle: u32, amount: u32, max: u32 },
}

/// Upper bound on intercooler stages per cycle.
pub const MAX_INTERCOOLER_STAGES: u32 = 64;

/// Target cycle(s) of the internal heat exchangers fed by one cycle's hot side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeatExTargets {
    Single(u32),
    Many(Vec<u32>),
}

impl HeatExTargets {
    /// Targets in the order they were given.
    pub fn as_slice(&self) -> &[u32] {
        match self {
            HeatExTargets::Single(target) => std::slice::from_ref(target),
            HeatExTargets::Many(targets) => targets,
        }
    }

    pub fn contains(&self, target: u32) -> bool {
        self.as_slice().contains(&target)
    }
}

impl From<u32> for HeatExTargets {
    fn from(target: u32) -> Self {
        HeatExTargets::Single(target)
    }
}

impl From<Vec<u32>> for HeatExTargets {
    fn from(targets: Vec<u32>) -> Self {
        HeatExTargets::Many(targets)
    }
}

/// Unit placed between two compression stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntercoolerKind {
    /// Two-stream exchanger; its coolant side is left for the caller to attach.
    HeatExchanger,
    /// Single-stream heat rejection.
    HeatExchangerSimple,
}

impl IntercoolerKind {
    pub fn component_kind(self) -> ComponentKind {
        match self {
            IntercoolerKind::HeatExchanger => ComponentKind::HeatExchanger,
            IntercoolerKind::HeatExchangerSimple => ComponentKind::HeatExchangerSimple,
        }
    }
}

/// Intercooled compression for one cycle: `amount` intercoolers between
/// `amount + 1` compressors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntercoolerSpec {
    pub amount: u32,
    #[serde(rename = "type")]
    pub kind: IntercoolerKind,
}

/// Topology parametrisation of a (possibly cascaded) heat pump.
///
/// Cycle indices are 1-based. `int_heatex` maps the cycle whose hot side is
/// cooled to the cycle(s) whose cold side is heated; `intercooler` maps a
/// cycle to its intercooled compression layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfig {
    pub fluids: Vec<String>,
    #[serde(default = "default_nr_cycles")]
    pub nr_cycles: u32,
    #[serde(default)]
    pub int_heatex: BTreeMap<u32, HeatExTargets>,
    #[serde(default)]
    pub intercooler: BTreeMap<u32, IntercoolerSpec>,
}

fn default_nr_cycles() -> u32 {
    1
}

impl CycleConfig {
    /// A plain cascade of `nr_cycles` cycles.
    pub fn new<I, S>(fluids: I, nr_cycles: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fluids: fluids.into_iter().map(Into::into).collect(),
            nr_cycles,
            int_heatex: BTreeMap::new(),
            intercooler: BTreeMap::new(),
        }
    }

    /// Single-stage water/refrigerant heat pump, optionally with an internal
    /// heat exchanger between its own condensate and suction gas.
    pub fn single_stage(refrigerant: impl Into<String>, int_heatex: bool) -> Self {
        let config = Self::new(["water".to_string(), refrigerant.into()], 1);
        if int_heatex {
            config.with_int_heatex(1, 1)
        } else {
            config
        }
    }

    /// Route the hot side of `cycle` through internal heat exchanger(s).
    pub fn with_int_heatex(mut self, cycle: u32, targets: impl Into<HeatExTargets>) -> Self {
        self.int_heatex.insert(cycle, targets.into());
        self
    }

    /// Split the compression of `cycle` with `amount` intercoolers.
    pub fn with_intercooler(mut self, cycle: u32, amount: u32, kind: IntercoolerKind) -> Self {
        self.intercooler
            .insert(cycle, IntercoolerSpec { amount, kind });
        self
    }

    /// Check every invariant; nothing may be built from an invalid config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fluids.is_empty() {
            return Err(ConfigError::NoFluids);
        }
        if self.nr_cycles == 0 {
            return Err(ConfigError::NoCycles);
        }

        for (&cycle, targets) in &self.int_heatex {
            self.check_cycle(cycle, "int_heatex")?;
            if targets.as_slice().is_empty() {
                return Err(ConfigError::EmptyTargets { cycle });
            }
            let mut seen = BTreeSet::new();
            for &target in targets.as_slice() {
                self.check_cycle(target, "int_heatex targets")?;
                if !seen.insert(target) {
                    return Err(ConfigError::DuplicateTarget { cycle, target });
                }
            }
        }

        for (&cycle, spec) in &self.intercooler {
            self.check_cycle(cycle, "intercooler")?;
            if spec.amount == 0 {
                return Err(ConfigError::NoIntercoolerStages { cycle });
            }
            if spec.amount > MAX_INTERCOOLER_STAGES {
                return Err(ConfigError::TooManyIntercoolerStages {
                    cycle,
                    amount: spec.amount,
                    max: MAX_INTERCOOLER_STAGES,
                });
            }
        }

        Ok(())
    }

    fn check_cycle(&self, cycle: u32, context: &'static str) -> Result<(), ConfigError> {
        if cycle == 0 || cycle > self.nr_cycles {
            return Err(ConfigError::CycleOutOfRange {
                context,
                cycle,
                nr_cycles: self.nr_cycles,
            });
        }
        Ok(())
    }

    /// Cycles `1..=nr_cycles` in increasing order.
    pub fn cycles(&self) -> impl Iterator<Item = CycleId> + use<> {
        CycleId::range(self.nr_cycles)
    }

    /// The top cycle, which carries the condenser.
    pub fn top_cycle(&self) -> Result<CycleId, ConfigError> {
        CycleId::new(self.nr_cycles).map_err(|_| ConfigError::NoCycles)
    }

    /// Intercooled layout of `cycle`, if any.
    pub fn intercooling(&self, cycle: CycleId) -> Option<IntercoolerSpec> {
        self.intercooler.get(&cycle.get()).copied()
    }

    /// Every `(source, target)` internal heat exchanger pair, by ascending
    /// source and then in the order the targets were listed.
    pub fn internal_pairs(&self) -> Vec<(CycleId, CycleId)> {
        self.int_heatex
            .iter()
            .flat_map(|(&source, targets)| {
                targets.as_slice().iter().map(move |&target| (source, target))
            })
            .filter_map(|(source, target)| {
                Some((CycleId::new(source).ok()?, CycleId::new(target).ok()?))
            })
            .collect()
    }

    /// Total number of intercooler stages over all cycles.
    pub fn total_intercooler_stages(&self) -> u64 {
        self.intercooler.values().map(|s| u64::from(s.amount)).sum()
    }
}

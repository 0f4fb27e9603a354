//! Project schema definitions.

use std::collections::BTreeMap;

use hp_graph::{Network, UnitSystem};
use hp_model::{CycleConfig, HeatExTargets, HeatPump, IntercoolerSpec};
use serde::{Deserialize, Serialize};

use crate::ProjectResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    /// Network fluids; may be omitted for the single-stage preset.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fluids: Vec<String>,
    #[serde(default)]
    pub units: UnitSystem,
    pub layout: LayoutDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum LayoutDef {
    Cascade {
        #[serde(default = "default_nr_cycles")]
        nr_cycles: u32,
        #[serde(
            default,
            skip_serializing_if = "BTreeMap::is_empty",
            deserialize_with = "cycle_keys::deserialize"
        )]
        int_heatex: BTreeMap<u32, HeatExTargets>,
        #[serde(
            default,
            skip_serializing_if = "BTreeMap::is_empty",
            deserialize_with = "cycle_keys::deserialize"
        )]
        intercooler: BTreeMap<u32, IntercoolerSpec>,
    },
    SingleStage {
        refrigerant: String,
        #[serde(default)]
        int_heatex: bool,
    },
}

fn default_nr_cycles() -> u32 {
    1
}

impl Project {
    /// Builder configuration described by this project.
    pub fn to_cycle_config(&self) -> CycleConfig {
        match &self.layout {
            LayoutDef::Cascade {
                nr_cycles,
                int_heatex,
                intercooler,
            } => CycleConfig {
                fluids: self.fluids.clone(),
                nr_cycles: *nr_cycles,
                int_heatex: int_heatex.clone(),
                intercooler: intercooler.clone(),
            },
            LayoutDef::SingleStage {
                refrigerant,
                int_heatex,
            } => {
                let mut config = CycleConfig::single_stage(refrigerant.clone(), *int_heatex);
                if !self.fluids.is_empty() {
                    config.fluids = self.fluids.clone();
                }
                config
            }
        }
    }

    /// Build the heat pump and register it with `network`.
    pub fn build<N: Network>(&self, network: N) -> ProjectResult<HeatPump<N>> {
        let hp = HeatPump::build_with_units(self.to_cycle_config(), self.units.clone(), network)?;
        Ok(hp)
    }
}

/// Cycle-keyed maps. Keys arrive as integers from YAML and as strings from
/// JSON; the tagged layout buffers its content, so both forms are accepted here.
mod cycle_keys {
    use std::collections::BTreeMap;
    use std::fmt;

    use serde::de::{self, Deserialize, Deserializer, Visitor};

    #[derive(PartialEq, Eq, PartialOrd, Ord)]
    struct CycleKey(u32);

    impl<'de> Deserialize<'de> for CycleKey {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct KeyVisitor;

            impl Visitor<'_> for KeyVisitor {
                type Value = CycleKey;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a cycle number")
                }

                fn visit_u64<E: de::Error>(self, v: u64) -> Result<CycleKey, E> {
                    u32::try_from(v)
                        .map(CycleKey)
                        .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
                }

                fn visit_i64<E: de::Error>(self, v: i64) -> Result<CycleKey, E> {
                    u32::try_from(v)
                        .map(CycleKey)
                        .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<CycleKey, E> {
                    v.trim()
                        .parse()
                        .map(CycleKey)
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }

            deserializer.deserialize_any(KeyVisitor)
        }
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<BTreeMap<u32, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let map = BTreeMap::<CycleKey, V>::deserialize(deserializer)?;
        Ok(map.into_iter().map(|(k, v)| (k.0, v)).collect())
    }
}

//! Naming of heat pump units and their connections.
//!
//! Component labels are the human-readable names the network sees
//! (`Compressor 1-2`); tags are the compact forms used to build connection
//! labels (`comp1-2_to_intercooler1-2`).

use hp_core::CycleId;
use std::fmt;

/// Port names on catalog components.
pub mod ports {
    /// Single-stream inlet, or hot-side inlet of a two-stream unit.
    pub const IN: &str = "in1";
    /// Single-stream outlet, or hot-side outlet of a two-stream unit.
    pub const OUT: &str = "out1";
    pub const HOT_IN: &str = "in1";
    pub const HOT_OUT: &str = "out1";
    pub const COLD_IN: &str = "in2";
    pub const COLD_OUT: &str = "out2";
}

/// Every unit the factory knows how to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    HeatSourceFeed,
    HeatSourceBack,
    HeatSourcePump,
    Evaporator,
    ConsumerCloser,
    ConsumerPump,
    Consumer,
    CycleCloser(CycleId),
    Valve(CycleId),
    /// Cascade heat exchanger between cycle `c` (hot side) and `c + 1` (cold side).
    HeatExchanger(CycleId),
    Condenser(CycleId),
    /// The only compressor of a cycle without intercooling.
    Compressor(CycleId),
    /// Compressor `stage` (1-based) of an intercooled cycle.
    CompressorStage(CycleId, u32),
    /// Intercooler `stage` (1-based) after compressor `stage`.
    Intercooler(CycleId, u32),
    InternalHeatExchanger { source: CycleId, target: CycleId },
}

impl Unit {
    /// Component label.
    pub fn label(self) -> String {
        match self {
            Unit::HeatSourceFeed => "Heat Source Feed Flow".to_string(),
            Unit::HeatSourceBack => "Heat Source Back Flow".to_string(),
            Unit::HeatSourcePump => "Heat Source Recirculation Pump".to_string(),
            Unit::Evaporator => "Evaporator 1".to_string(),
            Unit::ConsumerCloser => "Consumer Cycle Closer".to_string(),
            Unit::ConsumerPump => "Consumer Recirculation Pump".to_string(),
            Unit::Consumer => "Consumer".to_string(),
            Unit::CycleCloser(c) => format!("Cycle Closer {}", c),
            Unit::Valve(c) => format!("Valve {}", c),
            Unit::HeatExchanger(c) => format!("Heat Exchanger {}_{}", c, c.next()),
            Unit::Condenser(c) => format!("Condenser {}", c),
            Unit::Compressor(c) => format!("Compressor {}", c),
            Unit::CompressorStage(c, stage) => format!("Compressor {}-{}", c, stage),
            Unit::Intercooler(c, stage) => format!("Intercooler {}-{}", c, stage),
            Unit::InternalHeatExchanger { source, target } => {
                format!("Internal Heat Exchanger {}_{}", source, target)
            }
        }
    }

    /// Compact tag used in connection labels.
    pub fn tag(self) -> String {
        match self {
            Unit::HeatSourceFeed => "heatsource_ff".to_string(),
            Unit::HeatSourceBack => "heatsource_bf".to_string(),
            Unit::HeatSourcePump => "heatsource_pump".to_string(),
            Unit::Evaporator => "evaporator1".to_string(),
            Unit::ConsumerCloser => "heatsink_cc".to_string(),
            Unit::ConsumerPump => "heatsink_pump".to_string(),
            Unit::Consumer => "consumer".to_string(),
            Unit::CycleCloser(c) => format!("cc{}", c),
            Unit::Valve(c) => format!("valve{}", c),
            Unit::HeatExchanger(c) => format!("heatex{}_{}", c, c.next()),
            Unit::Condenser(c) => format!("cond{}", c),
            Unit::Compressor(c) => format!("comp{}", c),
            Unit::CompressorStage(c, stage) => format!("comp{}-{}", c, stage),
            Unit::Intercooler(c, stage) => format!("intercooler{}-{}", c, stage),
            Unit::InternalHeatExchanger { source, target } => {
                format!("int_heatex{}_{}", source, target)
            }
        }
    }
}

impl Unit {
    /// Whether both units exchange heat between the same two cycles, so that
    /// they may be joined on their hot and on their cold stream.
    pub fn spans_same_cycles(self, other: Unit) -> bool {
        match (self, other) {
            (Unit::HeatExchanger(c), Unit::InternalHeatExchanger { source, target })
            | (Unit::InternalHeatExchanger { source, target }, Unit::HeatExchanger(c)) => {
                source == c && target == c.next()
            }
            _ => false,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Label of the connection running from `from` to `to`.
pub fn connection_label(from: Unit, to: Unit) -> String {
    format!("{}_to_{}", from.tag(), to.tag())
}

/// Label of a cold-stream connection between units that are also joined on
/// their hot stream.
pub fn cold_connection_label(from: Unit, to: Unit) -> String {
    format!("{}_cold", connection_label(from, to))
}

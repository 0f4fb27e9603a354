//! Catalog of process-unit kinds and their fixed port layouts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a port relative to its component. Inlets order first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Flow enters the component.
    Inlet,
    /// Flow leaves the component.
    Outlet,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Inlet => write!(f, "inlet"),
            PortDirection::Outlet => write!(f, "outlet"),
        }
    }
}

/// Kind of a process unit.
///
/// Two-stream units (`HeatExchanger`, `Condenser`) carry the hot stream on
/// `in1 -> out1` and the cold stream on `in2 -> out2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Source,
    Sink,
    Pump,
    /// Single-stream heat exchanger with a prescribed heat flow.
    HeatExchangerSimple,
    HeatExchanger,
    Condenser,
    Compressor,
    Valve,
    CycleCloser,
}

const NONE: &[&str] = &[];
const IN1: &[&str] = &["in1"];
const OUT1: &[&str] = &["out1"];
const IN1_IN2: &[&str] = &["in1", "in2"];
const OUT1_OUT2: &[&str] = &["out1", "out2"];

impl ComponentKind {
    /// Ordered inlet port names.
    pub fn inlets(self) -> &'static [&'static str] {
        match self {
            ComponentKind::Source => NONE,
            ComponentKind::HeatExchanger | ComponentKind::Condenser => IN1_IN2,
            _ => IN1,
        }
    }

    /// Ordered outlet port names.
    pub fn outlets(self) -> &'static [&'static str] {
        match self {
            ComponentKind::Sink => NONE,
            ComponentKind::HeatExchanger | ComponentKind::Condenser => OUT1_OUT2,
            _ => OUT1,
        }
    }

    /// Ports of the given direction.
    pub fn ports(self, direction: PortDirection) -> &'static [&'static str] {
        match direction {
            PortDirection::Inlet => self.inlets(),
            PortDirection::Outlet => self.outlets(),
        }
    }

    /// 1-based stream side a port belongs to (`in2`/`out2` -> 2).
    pub fn side_of(self, port: &str, direction: PortDirection) -> Option<usize> {
        self.ports(direction)
            .iter()
            .position(|p| *p == port)
            .map(|i| i + 1)
    }

    /// Number of independent streams passing through the unit.
    pub fn side_count(self) -> usize {
        self.inlets().len().max(self.outlets().len())
    }

    /// Whether the unit carries two separate streams.
    pub fn is_two_stream(self) -> bool {
        self.side_count() == 2
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Source => "Source",
            ComponentKind::Sink => "Sink",
            ComponentKind::Pump => "Pump",
            ComponentKind::HeatExchangerSimple => "HeatExchangerSimple",
            ComponentKind::HeatExchanger => "HeatExchanger",
            ComponentKind::Condenser => "Condenser",
            ComponentKind::Compressor => "Compressor",
            ComponentKind::Valve => "Valve",
            ComponentKind::CycleCloser => "CycleCloser",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arities() {
        assert!(ComponentKind::Source.inlets().is_empty());
        assert_eq!(ComponentKind::Source.outlets(), &["out1"]);
        assert_eq!(ComponentKind::Sink.inlets(), &["in1"]);
        assert!(ComponentKind::Sink.outlets().is_empty());
        assert_eq!(ComponentKind::Condenser.inlets(), &["in1", "in2"]);
        assert_eq!(ComponentKind::HeatExchanger.outlets(), &["out1", "out2"]);
        assert_eq!(ComponentKind::HeatExchangerSimple.inlets(), &["in1"]);
    }

    #[test]
    fn sides() {
        let hx = ComponentKind::HeatExchanger;
        assert_eq!(hx.side_of("in2", PortDirection::Inlet), Some(2));
        assert_eq!(hx.side_of("out1", PortDirection::Outlet), Some(1));
        assert_eq!(hx.side_of("out1", PortDirection::Inlet), None);
        assert!(hx.is_two_stream());
        assert!(!ComponentKind::Compressor.is_two_stream());
        assert_eq!(ComponentKind::Source.side_count(), 1);
    }

    #[test]
    fn inlets_sort_before_outlets() {
        let mut dirs = vec![PortDirection::Outlet, PortDirection::Inlet];
        dirs.sort();
        assert_eq!(dirs, vec![PortDirection::Inlet, PortDirection::Outlet]);
    }
}

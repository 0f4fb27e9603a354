//! Topology wiring: the connections between the factory's components.

use hp_core::CycleId;
use hp_graph::{PortRef, Topology};
use tracing::debug;

use crate::config::CycleConfig;
use crate::error::ModelResult;
use crate::index::{HeatExEntry, HeatExIndex};
use crate::labels::{Unit, cold_connection_label, connection_label, ports};

/// A port on a unit, with the unit's component label resolved.
#[derive(Debug, Clone)]
struct Endpoint {
    unit: Unit,
    label: String,
    port: &'static str,
}

impl Endpoint {
    fn of(unit: Unit, port: &'static str) -> Self {
        Self {
            unit,
            label: unit.label(),
            port,
        }
    }

    fn internal(entry: &HeatExEntry<'_>, port: &'static str) -> Self {
        Self {
            unit: Unit::InternalHeatExchanger {
                source: entry.source,
                target: entry.target,
            },
            label: entry.label.to_string(),
            port,
        }
    }
}

struct Wiring<'a> {
    topo: &'a mut Topology,
    index: &'a HeatExIndex,
    config: &'a CycleConfig,
    top: CycleId,
}

/// Connect every component created by [`crate::factory::generate_components`].
///
/// Every port is consumed at most once and every label is unique; any
/// violation is returned as a structural error and the caller should discard
/// the partially wired topology.
pub fn generate_topology(
    topo: &mut Topology,
    index: &HeatExIndex,
    config: &CycleConfig,
) -> ModelResult<()> {
    config.validate()?;
    let top = config.top_cycle()?;

    let mut wiring = Wiring {
        topo,
        index,
        config,
        top,
    };
    wiring.skeleton()?;
    for cycle in config.cycles() {
        wiring.cycle(cycle)?;
    }

    debug!(
        connections = wiring.topo.connection_count(),
        "generated topology"
    );
    Ok(())
}

impl Wiring<'_> {
    fn link(&mut self, from: Endpoint, to: Endpoint) -> ModelResult<()> {
        // A cascade exchanger feeding the internal exchanger of its own cycle
        // pair is wired on both streams; the cold one gets its own label.
        let label = if from.port == ports::COLD_OUT && from.unit.spans_same_cycles(to.unit) {
            cold_connection_label(from.unit, to.unit)
        } else {
            connection_label(from.unit, to.unit)
        };
        self.topo.connect(
            label,
            PortRef::new(from.label, from.port),
            PortRef::new(to.label, to.port),
        )?;
        Ok(())
    }

    /// Heat source line, evaporator feed and consumer loop.
    fn skeleton(&mut self) -> ModelResult<()> {
        let first = CycleId::FIRST;
        let condenser = Unit::Condenser(self.top);

        self.link(
            Endpoint::of(Unit::Valve(first), ports::OUT),
            Endpoint::of(Unit::Evaporator, ports::COLD_IN),
        )?;

        self.link(
            Endpoint::of(Unit::HeatSourceFeed, ports::OUT),
            Endpoint::of(Unit::HeatSourcePump, ports::IN),
        )?;
        self.link(
            Endpoint::of(Unit::HeatSourcePump, ports::OUT),
            Endpoint::of(Unit::Evaporator, ports::HOT_IN),
        )?;
        self.link(
            Endpoint::of(Unit::Evaporator, ports::HOT_OUT),
            Endpoint::of(Unit::HeatSourceBack, ports::IN),
        )?;

        self.link(
            Endpoint::of(Unit::ConsumerCloser, ports::OUT),
            Endpoint::of(Unit::ConsumerPump, ports::IN),
        )?;
        self.link(
            Endpoint::of(Unit::ConsumerPump, ports::OUT),
            Endpoint::of(condenser, ports::COLD_IN),
        )?;
        self.link(
            Endpoint::of(condenser, ports::COLD_OUT),
            Endpoint::of(Unit::Consumer, ports::IN),
        )?;
        self.link(
            Endpoint::of(Unit::Consumer, ports::OUT),
            Endpoint::of(Unit::ConsumerCloser, ports::IN),
        )
    }

    fn cycle(&mut self, cycle: CycleId) -> ModelResult<()> {
        self.link(
            Endpoint::of(Unit::CycleCloser(cycle), ports::OUT),
            Endpoint::of(Unit::Valve(cycle), ports::IN),
        )?;

        // Cold side: evaporating refrigerant leaves the evaporator (cycle 1) or
        // the cascade exchanger below.
        let mut cold = match cycle.prev() {
            Some(lower) => {
                self.link(
                    Endpoint::of(Unit::Valve(cycle), ports::OUT),
                    Endpoint::of(Unit::HeatExchanger(lower), ports::COLD_IN),
                )?;
                Endpoint::of(Unit::HeatExchanger(lower), ports::COLD_OUT)
            }
            None => Endpoint::of(Unit::Evaporator, ports::COLD_OUT),
        };

        let index = self.index;
        for entry in index.cold_chain(cycle) {
            self.link(cold, Endpoint::internal(&entry, ports::COLD_IN))?;
            cold = Endpoint::internal(&entry, ports::COLD_OUT);
        }

        let discharge = self.compression(cycle, cold)?;

        let (hot_in, mut hot) = if cycle == self.top {
            (
                Endpoint::of(Unit::Condenser(cycle), ports::HOT_IN),
                Endpoint::of(Unit::Condenser(cycle), ports::HOT_OUT),
            )
        } else {
            (
                Endpoint::of(Unit::HeatExchanger(cycle), ports::HOT_IN),
                Endpoint::of(Unit::HeatExchanger(cycle), ports::HOT_OUT),
            )
        };
        self.link(discharge, hot_in)?;

        // Hot side: condensate passes the cycle's internal heat exchangers,
        // highest target cycle first.
        for entry in index.hot_chain(cycle) {
            self.link(hot, Endpoint::internal(&entry, ports::HOT_IN))?;
            hot = Endpoint::internal(&entry, ports::HOT_OUT);
        }

        self.link(hot, Endpoint::of(Unit::CycleCloser(cycle), ports::IN))
    }

    /// Wire the compression path fed by `suction`; returns the discharge outlet.
    fn compression(&mut self, cycle: CycleId, suction: Endpoint) -> ModelResult<Endpoint> {
        let Some(spec) = self.config.intercooling(cycle) else {
            self.link(suction, Endpoint::of(Unit::Compressor(cycle), ports::IN))?;
            return Ok(Endpoint::of(Unit::Compressor(cycle), ports::OUT));
        };

        self.link(
            suction,
            Endpoint::of(Unit::CompressorStage(cycle, 1), ports::IN),
        )?;
        for stage in 1..=spec.amount {
            self.link(
                Endpoint::of(Unit::CompressorStage(cycle, stage), ports::OUT),
                Endpoint::of(Unit::Intercooler(cycle, stage), ports::IN),
            )?;
            self.link(
                Endpoint::of(Unit::Intercooler(cycle, stage), ports::OUT),
                Endpoint::of(Unit::CompressorStage(cycle, stage + 1), ports::IN),
            )?;
        }
        Ok(Endpoint::of(
            Unit::CompressorStage(cycle, spec.amount + 1),
            ports::OUT,
        ))
    }
}

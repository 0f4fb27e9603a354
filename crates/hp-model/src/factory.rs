//! Component factory: every unit a configuration calls for.

use hp_graph::{Component, ComponentKind, Topology};
use tracing::debug;

use crate::config::CycleConfig;
use crate::error::ModelResult;
use crate::index::HeatExIndex;
use crate::labels::Unit;

/// Instantiate every component of the heat pump described by `config`.
///
/// The configuration is validated first, so an invalid configuration never
/// produces a partial component set. Returns the component-only topology and
/// the internal heat exchanger index the wiring step consults.
pub fn generate_components(config: &CycleConfig) -> ModelResult<(Topology, HeatExIndex)> {
    config.validate()?;
    let top = config.top_cycle()?;

    let mut topo = Topology::new();
    let mut index = HeatExIndex::new();

    for (unit, kind) in [
        (Unit::HeatSourceFeed, ComponentKind::Source),
        (Unit::HeatSourceBack, ComponentKind::Sink),
        (Unit::HeatSourcePump, ComponentKind::Pump),
        (Unit::Evaporator, ComponentKind::HeatExchanger),
        (Unit::ConsumerCloser, ComponentKind::CycleCloser),
        (Unit::ConsumerPump, ComponentKind::Pump),
        (Unit::Consumer, ComponentKind::HeatExchangerSimple),
    ] {
        add(&mut topo, unit, kind)?;
    }

    for cycle in config.cycles() {
        add(&mut topo, Unit::CycleCloser(cycle), ComponentKind::CycleCloser)?;
        add(&mut topo, Unit::Valve(cycle), ComponentKind::Valve)?;

        if let Some(lower) = cycle.prev() {
            add(&mut topo, Unit::HeatExchanger(lower), ComponentKind::HeatExchanger)?;
        }

        if cycle == top {
            add(&mut topo, Unit::Condenser(cycle), ComponentKind::Condenser)?;
        }

        match config.intercooling(cycle) {
            Some(spec) => {
                for stage in 1..=spec.amount + 1 {
                    if stage <= spec.amount {
                        add(
                            &mut topo,
                            Unit::Intercooler(cycle, stage),
                            spec.kind.component_kind(),
                        )?;
                    }
                    add(
                        &mut topo,
                        Unit::CompressorStage(cycle, stage),
                        ComponentKind::Compressor,
                    )?;
                }
            }
            None => add(&mut topo, Unit::Compressor(cycle), ComponentKind::Compressor)?,
        }
    }

    for (source, target) in config.internal_pairs() {
        let unit = Unit::InternalHeatExchanger { source, target };
        add(&mut topo, unit, ComponentKind::HeatExchanger)?;
        index.insert(source, target, unit.label());
    }

    debug!(
        components = topo.component_count(),
        internal_heat_exchangers = index.len(),
        "generated components"
    );
    Ok((topo, index))
}

fn add(topo: &mut Topology, unit: Unit, kind: ComponentKind) -> ModelResult<()> {
    topo.add_component(Component::new(unit.label(), kind))?;
    Ok(())
}

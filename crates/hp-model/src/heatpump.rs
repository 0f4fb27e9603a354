//! Heat pump facade: build, register with the network, mutate.

use hp_graph::{
    Component, Network, NetworkSettings, NullNetwork, PortRef, Removal, Topology, UnitSystem,
};
use tracing::{info, warn};

use crate::config::CycleConfig;
use crate::error::ModelResult;
use crate::factory::generate_components;
use crate::index::HeatExIndex;
use crate::wiring::generate_topology;

/// Run the factory and the wiring on a fresh topology.
///
/// The whole factory runs before any wiring step, so both sides of an
/// internal heat exchanger exist whichever cycle reaches it first.
pub fn build_topology(config: &CycleConfig) -> ModelResult<(Topology, HeatExIndex)> {
    let (mut topo, index) = generate_components(config)?;
    generate_topology(&mut topo, &index, config)?;
    Ok((topo, index))
}

/// A built heat pump topology bound to its network collaborator.
#[derive(Debug)]
pub struct HeatPump<N: Network = NullNetwork> {
    config: CycleConfig,
    topology: Topology,
    index: HeatExIndex,
    network: N,
}

impl<N: Network> HeatPump<N> {
    /// Build the topology with default network units.
    pub fn build(config: CycleConfig, network: N) -> ModelResult<Self> {
        Self::build_with_units(config, UnitSystem::default(), network)
    }

    /// Build the topology, then hand it to `network`.
    ///
    /// The network only hears about a topology that was built completely:
    /// on error nothing has been sent to it.
    pub fn build_with_units(
        config: CycleConfig,
        units: UnitSystem,
        mut network: N,
    ) -> ModelResult<Self> {
        let (topology, index) = build_topology(&config)?;

        network.configure(&NetworkSettings {
            fluids: config.fluids.clone(),
            units,
        });
        for component in topology.components() {
            network.add_component(component);
        }
        for connection in topology.connections() {
            network.add_connection(connection);
        }

        let open_ports = topology.open_ports().len();
        if open_ports > 0 {
            warn!(open_ports, "topology has unconnected ports");
        }
        info!(
            cycles = config.nr_cycles,
            components = topology.component_count(),
            connections = topology.connection_count(),
            "heat pump topology built"
        );

        Ok(Self {
            config,
            topology,
            index,
            network,
        })
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn index(&self) -> &HeatExIndex {
        &self.index
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    pub fn into_parts(self) -> (Topology, HeatExIndex, N) {
        (self.topology, self.index, self.network)
    }

    /// Delete a component with its connections, keeping the network and the
    /// internal heat exchanger index in step.
    ///
    /// A missing label yields `Removal::NotFound` and changes nothing.
    pub fn delete_component(&mut self, label: &str) -> Removal {
        let removal = self.topology.delete_component(label);
        if removal.is_found() {
            for connection in removal.connections() {
                self.network.remove_connection(connection);
            }
            self.index.remove_label(label);
        }
        removal
    }

    /// Add a component to extend the built topology.
    pub fn add_component(&mut self, component: Component) -> ModelResult<()> {
        self.topology.add_component(component.clone())?;
        self.network.add_component(&component);
        Ok(())
    }

    /// Add a connection to extend the built topology.
    pub fn connect(
        &mut self,
        label: impl Into<String>,
        source: PortRef,
        target: PortRef,
    ) -> ModelResult<()> {
        let connection = self.topology.connect(label, source, target)?;
        self.network.add_connection(connection);
        Ok(())
    }
}

//! Contract towards the external network/solver collaborator.
//!
//! The topology builder never solves anything. It hands every component and
//! connection to a `Network` as they become final, and tells it about every
//! connection that the mutator removes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::graph::{Component, Connection};

/// Display/solver unit system forwarded to the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSystem {
    #[serde(rename = "T", default = "default_temperature")]
    pub temperature: String,
    #[serde(rename = "p", default = "default_pressure")]
    pub pressure: String,
    #[serde(rename = "h", default = "default_enthalpy")]
    pub enthalpy: String,
    #[serde(rename = "m", default = "default_mass_flow")]
    pub mass_flow: String,
}

fn default_temperature() -> String {
    "C".to_string()
}

fn default_pressure() -> String {
    "bar".to_string()
}

fn default_enthalpy() -> String {
    "kJ / kg".to_string()
}

fn default_mass_flow() -> String {
    "kg / s".to_string()
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            pressure: default_pressure(),
            enthalpy: default_enthalpy(),
            mass_flow: default_mass_flow(),
        }
    }
}

/// Settings the network is initialised with before any component arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSettings {
    pub fluids: Vec<String>,
    #[serde(default)]
    pub units: UnitSystem,
}

impl NetworkSettings {
    pub fn new(fluids: Vec<String>) -> Self {
        Self {
            fluids,
            units: UnitSystem::default(),
        }
    }
}

/// The external equation-solving engine, as seen from the topology builder.
pub trait Network {
    /// Called once, before any component or connection is added.
    fn configure(&mut self, _settings: &NetworkSettings) {}

    fn add_component(&mut self, component: &Component);

    fn add_connection(&mut self, connection: &Connection);

    fn remove_connection(&mut self, connection: &Connection);
}

/// A network that ignores every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNetwork;

impl Network for NullNetwork {
    fn add_component(&mut self, _component: &Component) {}

    fn add_connection(&mut self, _connection: &Connection) {}

    fn remove_connection(&mut self, _connection: &Connection) {}
}

/// One call received by a [`RecordingNetwork`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    Configured(NetworkSettings),
    ComponentAdded(String),
    ConnectionAdded(String),
    ConnectionRemoved(String),
}

/// A network that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNetwork {
    pub events: Vec<NetworkEvent>,
}

impl RecordingNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connections currently known to the network: added and not yet removed.
    pub fn live_connections(&self) -> BTreeSet<String> {
        let mut live = BTreeSet::new();
        for event in &self.events {
            match event {
                NetworkEvent::ConnectionAdded(label) => {
                    live.insert(label.clone());
                }
                NetworkEvent::ConnectionRemoved(label) => {
                    live.remove(label);
                }
                _ => {}
            }
        }
        live
    }

    /// Labels of the components added so far, in arrival order.
    pub fn components(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                NetworkEvent::ComponentAdded(label) => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Network for RecordingNetwork {
    fn configure(&mut self, settings: &NetworkSettings) {
        self.events.push(NetworkEvent::Configured(settings.clone()));
    }

    fn add_component(&mut self, component: &Component) {
        self.events
            .push(NetworkEvent::ComponentAdded(component.label.clone()));
    }

    fn add_connection(&mut self, connection: &Connection) {
        self.events
            .push(NetworkEvent::ConnectionAdded(connection.label.clone()));
    }

    fn remove_connection(&mut self, connection: &Connection) {
        self.events
            .push(NetworkEvent::ConnectionRemoved(connection.label.clone()));
    }
}

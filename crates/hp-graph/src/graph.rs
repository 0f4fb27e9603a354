//! Core topology data structures.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

use crate::catalog::{ComponentKind, PortDirection};
use crate::error::{GraphError, GraphResult};

/// A process unit, identified by its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub label: String,
    pub kind: ComponentKind,
}

impl Component {
    pub fn new(label: impl Into<String>, kind: ComponentKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }

    /// Ordered inlet port names.
    pub fn inlets(&self) -> &'static [&'static str] {
        self.kind.inlets()
    }

    /// Ordered outlet port names.
    pub fn outlets(&self) -> &'static [&'static str] {
        self.kind.outlets()
    }

    /// Whether the component declares `port` in the given direction.
    pub fn has_port(&self, port: &str, direction: PortDirection) -> bool {
        self.kind.ports(direction).contains(&port)
    }
}

/// A named port on a named component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortRef {
    pub component: String,
    pub port: String,
}

impl PortRef {
    pub fn new(component: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            port: port.into(),
        }
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.port)
    }
}

/// A directed flow link from an outlet port to an inlet port.
///
/// Endpoints refer to components by label; the connection owns neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub label: String,
    pub source: PortRef,
    pub target: PortRef,
}

impl Connection {
    /// Whether either endpoint belongs to `component`.
    pub fn touches(&self, component: &str) -> bool {
        self.source.component == component || self.target.component == component
    }
}

/// Components and connections of a heat pump, keyed by label.
///
/// Invariants maintained by every `&mut` method:
/// - both endpoints of every connection name existing components,
/// - every port is consumed by at most one connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    pub(crate) components: BTreeMap<String, Component>,
    pub(crate) connections: BTreeMap<String, Connection>,
    /// Port -> label of the connection consuming it.
    pub(crate) occupied: HashMap<PortRef, String>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component. Labels must be unique.
    pub fn add_component(&mut self, component: Component) -> GraphResult<()> {
        if self.components.contains_key(&component.label) {
            return Err(GraphError::DuplicateComponent {
                label: component.label,
            });
        }
        debug!(component = %component.label, kind = %component.kind, "adding component");
        self.components.insert(component.label.clone(), component);
        Ok(())
    }

    /// Connect an outlet port to an inlet port.
    ///
    /// Rejects duplicate labels, unknown components or ports, and ports that
    /// are already consumed. Nothing is modified on error.
    pub fn connect(
        &mut self,
        label: impl Into<String>,
        source: PortRef,
        target: PortRef,
    ) -> GraphResult<&Connection> {
        let label = label.into();
        if self.connections.contains_key(&label) {
            return Err(GraphError::DuplicateConnection { label });
        }
        self.check_endpoint(&label, &source, PortDirection::Outlet)?;
        self.check_endpoint(&label, &target, PortDirection::Inlet)?;

        debug!(connection = %label, from = %source, to = %target, "connecting");
        self.occupied.insert(source.clone(), label.clone());
        self.occupied.insert(target.clone(), label.clone());
        let connection = Connection {
            label: label.clone(),
            source,
            target,
        };
        Ok(self.connections.entry(label).or_insert(connection))
    }

    fn check_endpoint(
        &self,
        connection: &str,
        port: &PortRef,
        direction: PortDirection,
    ) -> GraphResult<()> {
        let component =
            self.components
                .get(&port.component)
                .ok_or_else(|| GraphError::UnknownComponent {
                    connection: connection.to_string(),
                    component: port.component.clone(),
                })?;
        if !component.has_port(&port.port, direction) {
            return Err(GraphError::UnknownPort {
                component: port.component.clone(),
                port: port.port.clone(),
                direction,
            });
        }
        if let Some(occupied_by) = self.occupied.get(port) {
            return Err(GraphError::PortInUse {
                component: port.component.clone(),
                port: port.port.clone(),
                occupied_by: occupied_by.clone(),
            });
        }
        Ok(())
    }

    /// Remove a single connection, releasing both of its ports.
    pub fn remove_connection(&mut self, label: &str) -> Option<Connection> {
        let connection = self.connections.remove(label)?;
        self.occupied.remove(&connection.source);
        self.occupied.remove(&connection.target);
        debug!(connection = %label, "removed connection");
        Some(connection)
    }

    /// Look up a component by label.
    pub fn component(&self, label: &str) -> Option<&Component> {
        self.components.get(label)
    }

    /// Look up a connection by label.
    pub fn connection(&self, label: &str) -> Option<&Connection> {
        self.connections.get(label)
    }

    pub fn contains_component(&self, label: &str) -> bool {
        self.components.contains_key(label)
    }

    /// All components in label order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// All connections in label order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Connections with an endpoint on `component`, in label order.
    pub fn incident_connections(&self, component: &str) -> Vec<&Connection> {
        self.connections
            .values()
            .filter(|c| c.touches(component))
            .collect()
    }

    /// The connection consuming `component.port`, if any.
    pub fn connection_at(&self, component: &str, port: &str) -> Option<&Connection> {
        let label = self.occupied.get(&PortRef::new(component, port))?;
        self.connections.get(label)
    }

    /// The inlet fed by `component.outlet`, if connected.
    pub fn downstream(&self, component: &str, outlet: &str) -> Option<&PortRef> {
        self.connection_at(component, outlet)
            .filter(|c| c.source.component == component && c.source.port == outlet)
            .map(|c| &c.target)
    }

    /// The outlet feeding `component.inlet`, if connected.
    pub fn upstream(&self, component: &str, inlet: &str) -> Option<&PortRef> {
        self.connection_at(component, inlet)
            .filter(|c| c.target.component == component && c.target.port == inlet)
            .map(|c| &c.source)
    }
}

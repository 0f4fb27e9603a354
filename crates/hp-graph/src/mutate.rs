//! Structural mutation: component deletion with connection cascade.

use tracing::info;

use crate::graph::{Component, Connection, Topology};

/// Outcome of [`Topology::delete_component`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// No component with the requested label existed; nothing changed.
    NotFound,
    /// The component and every connection touching it were removed.
    Removed {
        component: Component,
        /// Cascaded connections, in label order.
        connections: Vec<Connection>,
    },
}

impl Removal {
    pub fn is_found(&self) -> bool {
        matches!(self, Removal::Removed { .. })
    }

    /// Connections removed by the cascade (empty for `NotFound`).
    pub fn connections(&self) -> &[Connection] {
        match self {
            Removal::NotFound => &[],
            Removal::Removed { connections, .. } => connections,
        }
    }
}

impl Topology {
    /// Delete a component and every connection that references it.
    ///
    /// A missing label is not an error: the topology is left untouched and
    /// `Removal::NotFound` is returned. Both tables are updated before this
    /// returns, so no caller ever observes a dangling connection.
    pub fn delete_component(&mut self, label: &str) -> Removal {
        let Some(component) = self.components.remove(label) else {
            info!("No component with label {} found.", label);
            return Removal::NotFound;
        };
        info!("Component {} successfully deleted from heat pump.", label);

        let incident: Vec<String> = self
            .connections
            .values()
            .filter(|c| c.touches(label))
            .map(|c| c.label.clone())
            .collect();

        let mut connections = Vec::with_capacity(incident.len());
        for conn_label in incident {
            if let Some(connection) = self.remove_connection(&conn_label) {
                info!("Connection {} successfully deleted from heat pump.", conn_label);
                connections.push(connection);
            }
        }

        Removal::Removed {
            component,
            connections,
        }
    }
}

//! Whole-topology consistency checks.

use crate::catalog::PortDirection;
use crate::error::{GraphError, GraphResult};
use crate::graph::{PortRef, Topology};

impl Topology {
    /// Re-verify referential integrity and port uniqueness across all tables.
    ///
    /// The mutating methods keep these invariants on their own; this is the
    /// independent check used after builds and in tests.
    pub fn check_integrity(&self) -> GraphResult<()> {
        validate_connections(self)?;
        validate_occupancy(self)
    }
}

fn validate_connections(topo: &Topology) -> GraphResult<()> {
    for connection in topo.connections.values() {
        for (port, direction) in [
            (&connection.source, PortDirection::Outlet),
            (&connection.target, PortDirection::Inlet),
        ] {
            let component = topo.components.get(&port.component).ok_or_else(|| {
                GraphError::UnknownComponent {
                    connection: connection.label.clone(),
                    component: port.component.clone(),
                }
            })?;

            if !component.has_port(&port.port, direction) {
                return Err(GraphError::UnknownPort {
                    component: port.component.clone(),
                    port: port.port.clone(),
                    direction,
                });
            }

            // A port shared by two connections can only be indexed to one of them
            if topo.occupied.get(port) != Some(&connection.label) {
                return Err(mismatch(&connection.label, port));
            }
        }
    }
    Ok(())
}

fn validate_occupancy(topo: &Topology) -> GraphResult<()> {
    for (port, label) in &topo.occupied {
        let consistent = topo
            .connections
            .get(label)
            .is_some_and(|c| &c.source == port || &c.target == port);
        if !consistent {
            return Err(mismatch(label, port));
        }
    }
    Ok(())
}

fn mismatch(connection: &str, port: &PortRef) -> GraphError {
    GraphError::OccupancyMismatch {
        connection: connection.to_string(),
        component: port.component.clone(),
        port: port.port.clone(),
    }
}

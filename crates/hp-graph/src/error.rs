//! Graph-specific error types.

use hp_core::HpError;
use thiserror::Error;

use crate::catalog::PortDirection;

/// Structural errors raised while building or checking a topology.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Component '{label}' already exists")]
    DuplicateComponent { label: String },

    #[error("Connection '{label}' already exists")]
    DuplicateConnection { label: String },

    #[error("Connection '{connection}' refers to non-existent component '{component}'")]
    UnknownComponent {
        connection: String,
        component: String,
    },

    #[error("Component '{component}' has no {direction} port '{port}'")]
    UnknownPort {
        component: String,
        port: String,
        direction: PortDirection,
    },

    #[error("Port {component}.{port} is already consumed by connection '{occupied_by}'")]
    PortInUse {
        component: String,
        port: String,
        occupied_by: String,
    },

    #[error("Port-occupancy index disagrees with connection '{connection}' at {component}.{port}")]
    OccupancyMismatch {
        connection: String,
        component: String,
        port: String,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;

impl From<GraphError> for HpError {
    fn from(err: GraphError) -> Self {
        HpError::Structural(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GraphError::PortInUse {
            component: "Valve 1".into(),
            port: "out1".into(),
            occupied_by: "valve1_to_evaporator1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Valve 1.out1"));
        assert!(msg.contains("valve1_to_evaporator1"));
    }

    #[test]
    fn error_conversion() {
        let err = GraphError::DuplicateComponent {
            label: "Consumer".into(),
        };
        let hp: HpError = err.into();
        assert!(matches!(hp, HpError::Structural(_)));
    }
}

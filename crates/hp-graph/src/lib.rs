//! hp-graph: component/connection graph for heatflow.
//!
//! Provides:
//! - The component catalog (kinds and their port arities)
//! - The `Topology` tables with port-occupancy tracking
//! - Safe structural mutation (component deletion with cascade)
//! - Stream analysis, open-port listing and content fingerprints
//! - The `Network` collaborator contract
//!
//! # Example
//!
//! ```
//! use hp_graph::{Component, ComponentKind, PortRef, Topology};
//!
//! let mut topo = Topology::new();
//! topo.add_component(Component::new("Source", ComponentKind::Source)).unwrap();
//! topo.add_component(Component::new("Sink", ComponentKind::Sink)).unwrap();
//! topo.connect(
//!     "source_to_sink",
//!     PortRef::new("Source", "out1"),
//!     PortRef::new("Sink", "in1"),
//! )
//! .unwrap();
//!
//! assert_eq!(topo.component_count(), 2);
//! assert_eq!(topo.connection_count(), 1);
//! ```

pub mod analysis;
pub mod catalog;
pub mod error;
pub mod fingerprint;
pub mod graph;
pub mod mutate;
pub mod network;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use analysis::{OpenPort, Stream, StreamSide};
pub use catalog::{ComponentKind, PortDirection};
pub use error::{GraphError, GraphResult};
pub use graph::{Component, Connection, PortRef, Topology};
pub use mutate::Removal;
pub use network::{
    Network, NetworkEvent, NetworkSettings, NullNetwork, RecordingNetwork, UnitSystem,
};

//! hp-model: heat pump topology builder.
//!
//! Turns a declarative [`CycleConfig`] (number of cycles, internal heat
//! exchangers, intercooled compression) into a wired [`hp_graph::Topology`]:
//!
//! 1. [`factory::generate_components`] instantiates every unit and the
//!    internal heat exchanger index,
//! 2. [`wiring::generate_topology`] connects them,
//! 3. [`HeatPump`] ties both to a [`hp_graph::Network`] and forwards
//!    deletions.
//!
//! # Example
//!
//! ```
//! use hp_graph::NullNetwork;
//! use hp_model::{CycleConfig, HeatPump};
//!
//! let config = CycleConfig::new(["water", "NH3"], 2).with_int_heatex(2, vec![1, 2]);
//! let hp = HeatPump::build(config, NullNetwork).unwrap();
//!
//! assert!(hp.topology().contains_component("Internal Heat Exchanger 2_1"));
//! assert_eq!(hp.topology().component_count(), 17);
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod heatpump;
pub mod index;
pub mod labels;
pub mod wiring;

pub use config::{
    ConfigError, CycleConfig, HeatExTargets, IntercoolerKind, IntercoolerSpec,
    MAX_INTERCOOLER_STAGES,
};
pub use error::{ModelError, ModelResult};
pub use heatpump::{HeatPump, build_topology};
pub use index::{HeatExEntry, HeatExIndex};
pub use labels::Unit;

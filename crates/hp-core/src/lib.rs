//! hp-core: shared foundation for heatflow.
//!
//! Contains:
//! - ids (1-based cycle identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;

// Re-exports: nice ergonomics for downstream crates
pub use error::{HpError, HpResult};
pub use ids::*;

//! Domain layer - port definitions
//!
//! Traits at the boundary between descriptor synthesis and the cluster.
//! Adapters implement these to provide concrete lookups.

pub mod ports;

pub use ports::*;

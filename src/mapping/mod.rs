//! Mapping layer - derives per-role disk configurations from volume options
//!
//! - [`constants`]: named defaults and the size conversion factor
//! - [`policy`]: per-role field whitelist
//! - [`properties`]: the derivations themselves

pub mod constants;
pub mod policy;
pub mod properties;

pub use constants::*;
pub use policy::*;
pub use properties::*;

//! Domain layer - input options and output disk configurations
//!
//! The mapping rules that connect the two live in [`crate::mapping`].

pub mod disk;
pub mod options;

pub use disk::*;
pub use options::*;

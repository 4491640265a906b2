//! EBS Volume Mapper
//!
//! Translates a loosely-typed set of disk-provisioning options into the
//! request structures of the EBS block-storage API, for the three roles a
//! disk can play for an instance: ephemeral, persistent and root.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐      ┌──────────────────────────────────────────────┐
//! │  VolumeOptions   │      │              VolumeProperties                │
//! │ (JSON/YAML/map)  ├─────►│  ephemeral_disk_config() ─► EphemeralDisk... │
//! └──────────────────┘      │  persistent_disk_config() ─► PersistentDi... │
//!                           │  root_disk_config()      ─► RootDiskConfig  │
//!                           └──────────────────────┬───────────────────────┘
//!                                                  │
//!                                    ┌─────────────┴─────────────┐
//!                                    │  DiskRole ─► FieldPolicy  │
//!                                    │  (per-role field table)   │
//!                                    └───────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Input options and output disk configurations
//! - [`mapping`]: Defaults, role policies and the derivations
//! - [`error`]: Error types and handling

pub mod domain;
pub mod error;
pub mod mapping;

// Re-export commonly used types
pub use domain::{
    EbsBlockDevice, EphemeralDiskConfig, PersistentDiskConfig, ResourceType, RootDiskConfig, Tag,
    TagSpecification, VolumeOptions,
};

pub use error::{Error, Result};

pub use mapping::{DiskRole, EncryptionPolicy, FieldPolicy, VolumeProperties};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

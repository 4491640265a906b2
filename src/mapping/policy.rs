//! Role Policies
//!
//! Each disk role carries a fixed whitelist of the optional fields it may
//! emit. The asymmetries between roles are part of the downstream API
//! contract: ephemeral and root disks carry no tags, and root disks carry
//! no encryption settings.

use serde::{Deserialize, Serialize};

// =============================================================================
// Disk Role
// =============================================================================

/// Role a provisioned disk plays for an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiskRole {
    /// Instance-local scratch disk
    Ephemeral,
    /// Durable, independently attachable volume
    Persistent,
    /// Boot volume
    Root,
}

impl DiskRole {
    pub const ALL: [DiskRole; 3] = [DiskRole::Ephemeral, DiskRole::Persistent, DiskRole::Root];

    /// Field whitelist for this role
    pub const fn policy(self) -> &'static FieldPolicy {
        match self {
            DiskRole::Ephemeral => &EPHEMERAL_POLICY,
            DiskRole::Persistent => &PERSISTENT_POLICY,
            DiskRole::Root => &ROOT_POLICY,
        }
    }
}

impl std::fmt::Display for DiskRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiskRole::Ephemeral => write!(f, "ephemeral"),
            DiskRole::Persistent => write!(f, "persistent"),
            DiskRole::Root => write!(f, "root"),
        }
    }
}

// =============================================================================
// Encryption Policy
// =============================================================================

/// How a role emits the `encrypted` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionPolicy {
    /// Never emitted
    Omit,
    /// Emitted as `true` only when requested; `false` is left out
    WhenTrue,
    /// Always emitted, `false` when not requested
    Always,
}

impl EncryptionPolicy {
    /// Resolve the flag from the requested value
    pub fn resolve(self, requested: Option<bool>) -> Option<bool> {
        match self {
            EncryptionPolicy::Omit => None,
            EncryptionPolicy::WhenTrue => requested.filter(|encrypted| *encrypted),
            EncryptionPolicy::Always => Some(requested.unwrap_or(false)),
        }
    }
}

// =============================================================================
// Field Policy
// =============================================================================

/// Optional-field whitelist for one disk role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPolicy {
    /// Emit the volume size even when no size was requested
    pub size_when_unset: bool,
    pub iops: bool,
    pub throughput: bool,
    pub encrypted: EncryptionPolicy,
    pub kms_key_id: bool,
    pub tag_specifications: bool,
}

pub const EPHEMERAL_POLICY: FieldPolicy = FieldPolicy {
    size_when_unset: true,
    iops: true,
    throughput: true,
    encrypted: EncryptionPolicy::WhenTrue,
    kms_key_id: true,
    tag_specifications: false,
};

pub const PERSISTENT_POLICY: FieldPolicy = FieldPolicy {
    size_when_unset: true,
    iops: true,
    throughput: true,
    encrypted: EncryptionPolicy::Always,
    kms_key_id: true,
    tag_specifications: true,
};

pub const ROOT_POLICY: FieldPolicy = FieldPolicy {
    size_when_unset: false,
    iops: true,
    throughput: true,
    encrypted: EncryptionPolicy::Omit,
    kms_key_id: false,
    tag_specifications: false,
};

impl FieldPolicy {
    /// Pass `value` through when `allowed`, drop it otherwise
    pub fn gate<T>(allowed: bool, value: Option<T>) -> Option<T> {
        if allowed {
            value
        } else {
            None
        }
    }

    /// Resolve the emitted size from the requested MiB and its GiB conversion.
    ///
    /// A missing or zero request counts as unset.
    pub fn volume_size(&self, requested_mib: Option<i64>, size_gib: i64) -> Option<i64> {
        let is_set = requested_mib.is_some_and(|mib| mib != 0);
        if is_set || self.size_when_unset {
            Some(size_gib)
        } else {
            None
        }
    }
}

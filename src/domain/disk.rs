//! Disk Configurations - request structures for the block-storage API
//!
//! Field names are part of the downstream API contract and serialize
//! unchanged. Optional fields are `None` when the role or the input leaves
//! them out, and are then omitted from the payload entirely.

use super::options::Tag;
use serde::{Deserialize, Serialize};

// =============================================================================
// Tag Specifications
// =============================================================================

/// Resource a tag specification applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Volume,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Volume => write!(f, "volume"),
        }
    }
}

/// Tags to apply to a resource at creation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSpecification {
    pub resource_type: ResourceType,
    pub tags: Vec<Tag>,
}

impl TagSpecification {
    /// Tag specification for a volume
    pub fn volume(tags: Vec<Tag>) -> Self {
        Self {
            resource_type: ResourceType::Volume,
            tags,
        }
    }
}

// =============================================================================
// Block Device Mappings
// =============================================================================

/// EBS storage block of a block device mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EbsBlockDevice {
    /// Size in GiB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_size: Option<i64>,

    pub volume_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iops: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key_id: Option<String>,

    pub delete_on_termination: bool,
}

/// Block device mapping for an instance-local scratch disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EphemeralDiskConfig {
    pub device_name: String,
    pub ebs: EbsBlockDevice,
}

/// Block device mapping for an instance's boot volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootDiskConfig {
    pub device_name: String,
    pub ebs: EbsBlockDevice,
}

// =============================================================================
// Volume Creation
// =============================================================================

/// Create-volume request for an attachable, durable disk.
///
/// Carries no device name; the attachment point is chosen at attach time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentDiskConfig {
    /// Size in GiB
    pub size: i64,

    /// Always serialized, as `null` when no zone was requested
    #[serde(default)]
    pub availability_zone: Option<String>,

    pub volume_type: String,

    pub encrypted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iops: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_specifications: Option<Vec<TagSpecification>>,
}

//! Volume Options - the loosely-typed provisioning input
//!
//! An options mapping arrives from an upstream resolver (manifest or CLI
//! parsing). Every recognized key is optional and unknown keys are ignored,
//! so a resolver may hand over a superset of what the mapper reads.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

// =============================================================================
// Tag Record
// =============================================================================

/// A single tag applied to a provisioned volume
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Volume Options
// =============================================================================

/// Disk-provisioning options for a single request.
///
/// Absent keys are `None`; defaults are applied by the derivations in
/// [`crate::mapping::VolumeProperties`], never here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VolumeOptions {
    /// Requested size in mebibytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    /// Volume type identifier (e.g. gp3, io1)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub volume_type: Option<String>,

    /// Provisioned IOPS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iops: Option<u64>,

    /// Provisioned throughput in MiB/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<u64>,

    /// Availability zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub az: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,

    /// ARN of the KMS key used to encrypt the volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_key_arn: Option<String>,

    /// Device path of the boot volume (e.g. /dev/sda)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_device_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl VolumeOptions {
    /// Build options from an already-parsed mapping
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::Configuration(format!(
                "volume options must be a mapping, got {}",
                value_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Parse options from a JSON document
    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Parse options from a YAML document
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let value: serde_json::Value = serde_yaml::from_str(input)?;
        Self::from_value(value)
    }

    /// Load options from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        debug!(path = %path.display(), json = is_json, "Loading volume options");

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    pub fn with_size(mut self, size_mib: i64) -> Self {
        self.size = Some(size_mib);
        self
    }

    pub fn with_type(mut self, volume_type: impl Into<String>) -> Self {
        self.volume_type = Some(volume_type.into());
        self
    }

    pub fn with_iops(mut self, iops: u64) -> Self {
        self.iops = Some(iops);
        self
    }

    pub fn with_throughput(mut self, throughput: u64) -> Self {
        self.throughput = Some(throughput);
        self
    }

    pub fn with_az(mut self, az: impl Into<String>) -> Self {
        self.az = Some(az.into());
        self
    }

    pub fn with_encrypted(mut self, encrypted: bool) -> Self {
        self.encrypted = Some(encrypted);
        self
    }

    pub fn with_kms_key_arn(mut self, arn: impl Into<String>) -> Self {
        self.kms_key_arn = Some(arn.into());
        self
    }

    pub fn with_root_device_name(mut self, device: impl Into<String>) -> Self {
        self.root_device_name = Some(device.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "mapping",
    }
}

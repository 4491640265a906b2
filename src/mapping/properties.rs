//! Volume Properties
//!
//! Holds one request's options and derives the ephemeral, persistent and
//! root disk configurations from them. Every derivation is a pure function
//! of the stored options; repeated calls yield identical results.

use super::constants::{
    DEFAULT_ROOT_DEVICE_NAME, DEFAULT_VOLUME_TYPE, DELETE_ON_TERMINATION, EPHEMERAL_DEVICE_NAME,
    MIB_PER_GIB,
};
use super::policy::{DiskRole, FieldPolicy};
use crate::domain::{
    EbsBlockDevice, EphemeralDiskConfig, PersistentDiskConfig, RootDiskConfig, TagSpecification,
    VolumeOptions,
};
use tracing::debug;

/// Disk-provisioning options and the per-role derivations over them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeProperties {
    options: VolumeOptions,
}

impl VolumeProperties {
    pub fn new(options: VolumeOptions) -> Self {
        Self { options }
    }

    /// The options this instance was built from
    pub fn options(&self) -> &VolumeOptions {
        &self.options
    }

    /// Requested size converted to GiB, rounded down. Missing size is 0.
    pub fn size_in_gib(&self) -> i64 {
        self.options.size.unwrap_or(0).div_euclid(MIB_PER_GIB)
    }

    /// Requested volume type, or the default
    pub fn volume_type(&self) -> &str {
        self.options
            .volume_type
            .as_deref()
            .unwrap_or(DEFAULT_VOLUME_TYPE)
    }

    /// Block device mapping for the instance-local scratch disk
    pub fn ephemeral_disk_config(&self) -> EphemeralDiskConfig {
        let config = EphemeralDiskConfig {
            device_name: EPHEMERAL_DEVICE_NAME.to_string(),
            ebs: self.ebs_block(DiskRole::Ephemeral),
        };
        debug!(
            role = %DiskRole::Ephemeral,
            device = %config.device_name,
            volume_type = %config.ebs.volume_type,
            "Derived disk config"
        );
        config
    }

    /// Create-volume request for an attachable persistent disk
    pub fn persistent_disk_config(&self) -> PersistentDiskConfig {
        let policy = DiskRole::Persistent.policy();

        let tag_specifications = self
            .options
            .tags
            .as_ref()
            .filter(|tags| !tags.is_empty())
            .map(|tags| vec![TagSpecification::volume(tags.clone())]);

        let config = PersistentDiskConfig {
            size: self.size_in_gib(),
            availability_zone: self.options.az.clone(),
            volume_type: self.volume_type().to_string(),
            encrypted: policy
                .encrypted
                .resolve(self.options.encrypted)
                .unwrap_or(false),
            iops: FieldPolicy::gate(policy.iops, self.options.iops),
            throughput: FieldPolicy::gate(policy.throughput, self.options.throughput),
            kms_key_id: FieldPolicy::gate(policy.kms_key_id, self.options.kms_key_arn.clone()),
            tag_specifications: FieldPolicy::gate(policy.tag_specifications, tag_specifications),
        };
        debug!(
            role = %DiskRole::Persistent,
            size_gib = config.size,
            volume_type = %config.volume_type,
            az = ?config.availability_zone,
            "Derived disk config"
        );
        config
    }

    /// Block device mapping for the boot volume
    pub fn root_disk_config(&self) -> RootDiskConfig {
        let config = RootDiskConfig {
            device_name: self
                .options
                .root_device_name
                .clone()
                .unwrap_or_else(|| DEFAULT_ROOT_DEVICE_NAME.to_string()),
            ebs: self.ebs_block(DiskRole::Root),
        };
        debug!(
            role = %DiskRole::Root,
            device = %config.device_name,
            volume_type = %config.ebs.volume_type,
            "Derived disk config"
        );
        config
    }

    /// EBS storage block for a block-device-mapped role
    fn ebs_block(&self, role: DiskRole) -> EbsBlockDevice {
        let policy = role.policy();
        EbsBlockDevice {
            volume_size: policy.volume_size(self.options.size, self.size_in_gib()),
            volume_type: self.volume_type().to_string(),
            iops: FieldPolicy::gate(policy.iops, self.options.iops),
            throughput: FieldPolicy::gate(policy.throughput, self.options.throughput),
            encrypted: policy.encrypted.resolve(self.options.encrypted),
            kms_key_id: FieldPolicy::gate(policy.kms_key_id, self.options.kms_key_arn.clone()),
            delete_on_termination: DELETE_ON_TERMINATION,
        }
    }
}

impl From<VolumeOptions> for VolumeProperties {
    fn from(options: VolumeOptions) -> Self {
        Self::new(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tag;
    use serde_json::{json, Value};

    fn minimal() -> VolumeProperties {
        VolumeProperties::new(VolumeOptions::default())
    }

    fn maximal() -> VolumeProperties {
        VolumeProperties::new(
            VolumeOptions::default()
                .with_size(2048)
                .with_type("io1")
                .with_iops(1)
                .with_az("us-east-1a")
                .with_encrypted(true)
                .with_kms_key_arn("my_fake_kms_arn")
                .with_root_device_name("/dev/sda")
                .with_tags(vec![Tag::new("foo", "bar")]),
        )
    }

    fn to_json<T: serde::Serialize>(value: &T) -> Value {
        serde_json::to_value(value).unwrap()
    }

    // -------------------------------------------------------------------------
    // ephemeral_disk_config
    // -------------------------------------------------------------------------

    #[test]
    fn test_ephemeral_minimal() {
        assert_eq!(
            to_json(&minimal().ephemeral_disk_config()),
            json!({
                "device_name": "/dev/sdb",
                "ebs": {
                    "volume_size": 0,
                    "volume_type": "gp3",
                    "delete_on_termination": true
                }
            })
        );
    }

    #[test]
    fn test_ephemeral_maximal() {
        // Tags are not carried on the ephemeral mapping.
        assert_eq!(
            to_json(&maximal().ephemeral_disk_config()),
            json!({
                "device_name": "/dev/sdb",
                "ebs": {
                    "volume_size": 2,
                    "volume_type": "io1",
                    "iops": 1,
                    "encrypted": true,
                    "kms_key_id": "my_fake_kms_arn",
                    "delete_on_termination": true
                }
            })
        );
    }

    #[test]
    fn test_ephemeral_omits_false_encryption() {
        let props = VolumeProperties::new(VolumeOptions::default().with_encrypted(false));
        let config = props.ephemeral_disk_config();
        assert_eq!(config.ebs.encrypted, None);
        assert!(to_json(&config)["ebs"].get("encrypted").is_none());
    }

    #[test]
    fn test_ephemeral_device_ignores_root_device_name() {
        let props = VolumeProperties::new(VolumeOptions::default().with_root_device_name("/dev/sda"));
        assert_eq!(props.ephemeral_disk_config().device_name, EPHEMERAL_DEVICE_NAME);
    }

    // -------------------------------------------------------------------------
    // persistent_disk_config
    // -------------------------------------------------------------------------

    #[test]
    fn test_persistent_minimal() {
        assert_eq!(
            to_json(&minimal().persistent_disk_config()),
            json!({
                "size": 0,
                "availability_zone": null,
                "volume_type": "gp3",
                "encrypted": false
            })
        );
    }

    #[test]
    fn test_persistent_maximal() {
        assert_eq!(
            to_json(&maximal().persistent_disk_config()),
            json!({
                "size": 2,
                "availability_zone": "us-east-1a",
                "volume_type": "io1",
                "encrypted": true,
                "iops": 1,
                "kms_key_id": "my_fake_kms_arn",
                "tag_specifications": [{
                    "resource_type": "volume",
                    "tags": [{"name": "foo", "value": "bar"}]
                }]
            })
        );
    }

    #[test]
    fn test_persistent_empty_tags_omitted() {
        let props = VolumeProperties::new(VolumeOptions::default().with_tags(Vec::new()));
        let config = props.persistent_disk_config();
        assert_eq!(config.tag_specifications, None);
        assert!(to_json(&config).get("tag_specifications").is_none());
    }

    #[test]
    fn test_persistent_tags_kept_in_order() {
        let tags = vec![Tag::new("b", "2"), Tag::new("a", "1")];
        let props = VolumeProperties::new(VolumeOptions::default().with_tags(tags.clone()));
        assert_eq!(
            props.persistent_disk_config().tag_specifications,
            Some(vec![TagSpecification::volume(tags)])
        );
    }

    #[test]
    fn test_persistent_explicit_false_encryption() {
        let props = VolumeProperties::new(VolumeOptions::default().with_encrypted(false));
        assert!(!props.persistent_disk_config().encrypted);
    }

    // -------------------------------------------------------------------------
    // root_disk_config
    // -------------------------------------------------------------------------

    #[test]
    fn test_root_minimal() {
        assert_eq!(
            to_json(&minimal().root_disk_config()),
            json!({
                "device_name": "/dev/xvda",
                "ebs": {
                    "volume_type": "gp3",
                    "delete_on_termination": true
                }
            })
        );
    }

    #[test]
    fn test_root_maximal() {
        // Encryption, KMS key and tags are never carried on the root mapping.
        assert_eq!(
            to_json(&maximal().root_disk_config()),
            json!({
                "device_name": "/dev/sda",
                "ebs": {
                    "volume_size": 2,
                    "volume_type": "io1",
                    "iops": 1,
                    "delete_on_termination": true
                }
            })
        );
    }

    #[test]
    fn test_root_zero_size_omitted() {
        let props = VolumeProperties::new(VolumeOptions::default().with_size(0));
        assert_eq!(props.root_disk_config().ebs.volume_size, None);
    }

    // -------------------------------------------------------------------------
    // Shared rules
    // -------------------------------------------------------------------------

    #[test]
    fn test_size_conversion_rounds_down() {
        let cases = [
            (None, 0),
            (Some(0), 0),
            (Some(1023), 0),
            (Some(1024), 1),
            (Some(2048), 2),
            (Some(3000), 2),
        ];
        for (size, expected) in cases {
            let props = VolumeProperties::new(VolumeOptions {
                size,
                ..Default::default()
            });
            assert_eq!(props.size_in_gib(), expected, "size {:?}", size);
            assert_eq!(props.persistent_disk_config().size, expected);
            assert_eq!(props.ephemeral_disk_config().ebs.volume_size, Some(expected));
        }
    }

    #[test]
    fn test_negative_size_floors() {
        let props = VolumeProperties::new(VolumeOptions::default().with_size(-1));
        assert_eq!(props.size_in_gib(), -1);
        assert_eq!(props.root_disk_config().ebs.volume_size, Some(-1));
    }

    #[test]
    fn test_volume_type_applied_everywhere() {
        let props = VolumeProperties::new(VolumeOptions::default().with_type("io1"));
        assert_eq!(props.ephemeral_disk_config().ebs.volume_type, "io1");
        assert_eq!(props.persistent_disk_config().volume_type, "io1");
        assert_eq!(props.root_disk_config().ebs.volume_type, "io1");

        let props = minimal();
        assert_eq!(props.ephemeral_disk_config().ebs.volume_type, DEFAULT_VOLUME_TYPE);
        assert_eq!(props.persistent_disk_config().volume_type, DEFAULT_VOLUME_TYPE);
        assert_eq!(props.root_disk_config().ebs.volume_type, DEFAULT_VOLUME_TYPE);
    }

    #[test]
    fn test_throughput_passed_through() {
        let props = VolumeProperties::new(VolumeOptions::default().with_throughput(250));
        assert_eq!(props.ephemeral_disk_config().ebs.throughput, Some(250));
        assert_eq!(props.persistent_disk_config().throughput, Some(250));
        assert_eq!(props.root_disk_config().ebs.throughput, Some(250));

        assert!(to_json(&minimal().persistent_disk_config()).get("throughput").is_none());
    }

    #[test]
    fn test_derivations_repeatable() {
        let props = maximal();
        let before = props.options().clone();

        assert_eq!(props.ephemeral_disk_config(), props.ephemeral_disk_config());
        assert_eq!(props.persistent_disk_config(), props.persistent_disk_config());
        assert_eq!(props.root_disk_config(), props.root_disk_config());
        assert_eq!(props.options(), &before);
    }

    #[test]
    fn test_shared_across_threads() {
        let props = maximal();
        let expected = props.persistent_disk_config();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert_eq!(props.persistent_disk_config(), expected));
            }
        });
    }
}

//! Mapping defaults and unit conversions

/// Device name of the ephemeral disk, independent of the options
pub const EPHEMERAL_DEVICE_NAME: &str = "/dev/sdb";

/// Boot device name when the options carry no `root_device_name`
pub const DEFAULT_ROOT_DEVICE_NAME: &str = "/dev/xvda";

/// Volume type when the options carry no `type`
pub const DEFAULT_VOLUME_TYPE: &str = "gp3";

/// Mebibytes per gibibyte
pub const MIB_PER_GIB: i64 = 1024;

/// Every block device mapping produced here is destroyed with its instance
pub const DELETE_ON_TERMINATION: bool = true;

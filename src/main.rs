//! EBS Volume Mapper CLI
//!
//! Reads a disk-provisioning options mapping (JSON or YAML) and prints the
//! ephemeral, persistent and/or root disk configuration as JSON on stdout.
//! Logs go to stderr.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ebs_volume_mapper::{DiskRole, Error, Result, VolumeOptions, VolumeProperties};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Which disk configuration to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RoleSelection {
    Ephemeral,
    Persistent,
    Root,
    All,
}

/// EBS Volume Mapper - derive block device and volume requests from disk options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Options file (.json, otherwise parsed as YAML). Empty options when omitted
    #[arg(long, env = "VOLUME_OPTIONS")]
    options: Option<PathBuf>,

    /// Disk role to derive
    #[arg(long, value_enum, default_value = "all")]
    role: RoleSelection,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print the JSON schema of the options mapping and exit
    #[arg(long)]
    schema: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args)?;

    info!("Starting EBS Volume Mapper v{}", ebs_volume_mapper::VERSION);

    if args.schema {
        let schema = schemars::schema_for!(VolumeOptions);
        return print_json(&serde_json::to_value(schema)?, args.pretty);
    }

    let options = match &args.options {
        Some(path) => {
            info!("Loading options from {}", path.display());
            VolumeOptions::from_path(path)?
        }
        None => VolumeOptions::default(),
    };
    debug!(?options, "Resolved volume options");

    let properties = VolumeProperties::new(options);

    let output = match args.role {
        RoleSelection::Ephemeral => derive(&properties, DiskRole::Ephemeral)?,
        RoleSelection::Persistent => derive(&properties, DiskRole::Persistent)?,
        RoleSelection::Root => derive(&properties, DiskRole::Root)?,
        RoleSelection::All => {
            let mut all = serde_json::Map::new();
            for role in DiskRole::ALL {
                all.insert(role.to_string(), derive(&properties, role)?);
            }
            serde_json::Value::Object(all)
        }
    };

    print_json(&output, args.pretty)
}

fn derive(properties: &VolumeProperties, role: DiskRole) -> Result<serde_json::Value> {
    let value = match role {
        DiskRole::Ephemeral => serde_json::to_value(properties.ephemeral_disk_config())?,
        DiskRole::Persistent => serde_json::to_value(properties.persistent_disk_config())?,
        DiskRole::Root => serde_json::to_value(properties.root_disk_config())?,
    };
    Ok(value)
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) -> Result<()> {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => {
            return Err(Error::Configuration(format!("Invalid log level: {}", other)));
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["ebs-volume-mapper"]);
        assert_eq!(args.role, RoleSelection::All);
        assert!(args.options.is_none());
        assert!(!args.pretty);
        assert!(!args.schema);
    }

    #[test]
    fn test_args_role() {
        let args = Args::parse_from(["ebs-volume-mapper", "--role", "root", "--options", "disk.yml"]);
        assert_eq!(args.role, RoleSelection::Root);
        assert_eq!(args.options, Some(PathBuf::from("disk.yml")));
    }

    #[test]
    fn test_derive_per_role() {
        let properties = VolumeProperties::new(VolumeOptions::default().with_size(2048));
        assert_eq!(derive(&properties, DiskRole::Persistent).unwrap()["size"], 2);
        assert_eq!(derive(&properties, DiskRole::Root).unwrap()["device_name"], "/dev/xvda");
        assert_eq!(derive(&properties, DiskRole::Ephemeral).unwrap()["device_name"], "/dev/sdb");
    }
}

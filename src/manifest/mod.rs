//! Deployment manifest parsing and extraction
//!
//! The director hands back the manifest as YAML text. Extraction walks it
//! once, validating every path the installer needs, and produces a
//! [`ConfigurationRecord`] so nothing downstream touches the raw tree.

mod extract;
pub mod path;

pub use extract::{
    extract, extract_from_value, parse_manifest, ConfigurationRecord, ConsulCertificates,
    EtcdCertificates, NetworkSubnets, SyslogTarget, ZonedJob, ETCD_CLIENT_PORT,
};
pub use path::ManifestPath;

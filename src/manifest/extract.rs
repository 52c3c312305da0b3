//! Pull the installer settings out of a deployment manifest

use serde_yaml_ng::Value;
use tracing::debug;

use super::path::{
    lookup, optional_scalar, optional_sequence, required_scalar, required_scalar_list,
    scalar_to_string, ManifestPath,
};
use crate::{GenerateError, Result};

/// Port the etcd cluster listens on for plain HTTP clients
pub const ETCD_CLIENT_PORT: u16 = 4001;

const CONSUL_SERVERS: &str = "properties.consul.agent.servers.lan";
const ETCD_MACHINES: &str = "properties.etcd.machines";
const SHARED_SECRET: &str = "properties.loggregator_endpoint.shared_secret";
const ETCD_CERTS: &str = "properties.diego.etcd";
const SYSLOG_CONFIG: &str = "properties.syslog_daemon_config";
const CONSUL_PROPERTIES: &str = "properties.consul";
const JOB_ZONE: &str = "properties.diego.rep.zone";

/// PEM material the Windows cell uses to talk to etcd
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtcdCertificates {
    pub ca_cert: String,
    pub client_cert: String,
    pub client_key: String,
}

/// TLS and gossip encryption material for the cell's consul agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsulCertificates {
    pub agent_cert: String,
    pub agent_key: String,
    pub ca_cert: String,
    /// First entry of `encrypt_keys`
    pub encrypt_key: String,
}

/// Remote syslog target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyslogTarget {
    pub host: String,
    /// Empty when the manifest names a host but no port
    pub port: String,
}

/// A named network and the cloud subnets it spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSubnets {
    pub name: String,
    pub subnets: Vec<String>,
}

/// A zoned job and the networks it is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedJob {
    pub zone: String,
    pub networks: Vec<String>,
}

/// Everything the renderer needs, extracted once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    pub consul_agents: Vec<String>,
    /// `http://<first etcd machine>:4001`
    pub etcd_cluster_url: String,
    /// Distinct zones in first-seen order
    pub zones: Vec<String>,
    pub loggregator_shared_secret: String,
    pub etcd_certificates: EtcdCertificates,
    pub syslog: Option<SyslogTarget>,
    /// Present when the deployment runs consul with TLS
    pub consul_certificates: Option<ConsulCertificates>,
    pub networks: Vec<NetworkSubnets>,
    pub zoned_jobs: Vec<ZonedJob>,
}

impl ConfigurationRecord {
    /// Consul agent addresses as a single comma-separated list
    pub fn consul_ips(&self) -> String {
        self.consul_agents.join(",")
    }

    /// Zone of the first zoned job attached to a network that uses `subnet`
    pub fn zone_for_subnet(&self, subnet: &str) -> Option<&str> {
        let network = self
            .networks
            .iter()
            .find(|n| n.subnets.iter().any(|s| s == subnet))?;

        self.zoned_jobs
            .iter()
            .find(|job| job.networks.iter().any(|n| *n == network.name))
            .map(|job| job.zone.as_str())
    }
}

/// Parse manifest text into a generic YAML tree
pub fn parse_manifest(raw: &str) -> Result<Value> {
    serde_yaml_ng::from_str(raw).map_err(|e| GenerateError::Parse {
        context: "deployment manifest".to_string(),
        message: e.to_string(),
    })
}

/// Parse `raw` and extract the installer settings
pub fn extract(raw: &str) -> Result<ConfigurationRecord> {
    let manifest = parse_manifest(raw)?;
    extract_from_value(&manifest)
}

/// Extract the installer settings from an already parsed manifest
pub fn extract_from_value(manifest: &Value) -> Result<ConfigurationRecord> {
    let consul_agents = required_scalar_list(manifest, &CONSUL_SERVERS.into())?;

    let machines = required_scalar_list(manifest, &ETCD_MACHINES.into())?;
    let etcd_cluster_url = machines
        .iter()
        .map(|ip| etcd_url(ip))
        .next()
        .ok_or_else(|| GenerateError::missing(format!("{ETCD_MACHINES}.0")))?;

    let loggregator_shared_secret = required_scalar(manifest, &SHARED_SECRET.into())?;

    let certs = ManifestPath::parse(ETCD_CERTS);
    let etcd_certificates = EtcdCertificates {
        ca_cert: required_scalar(manifest, &certs.join("ca_cert"))?,
        client_cert: required_scalar(manifest, &certs.join("client_cert"))?,
        client_key: required_scalar(manifest, &certs.join("client_key"))?,
    };

    let syslog_path = ManifestPath::parse(SYSLOG_CONFIG);
    let syslog = match optional_scalar(manifest, &syslog_path.join("address"))? {
        Some(host) => Some(SyslogTarget {
            host,
            port: optional_scalar(manifest, &syslog_path.join("port"))?.unwrap_or_default(),
        }),
        None => None,
    };

    let consul_certificates = consul_certificates(manifest)?;

    let jobs = optional_sequence(manifest, &"jobs".into());
    let zoned_jobs = jobs
        .iter()
        .enumerate()
        .filter_map(|(i, job)| zoned_job(i, job).transpose())
        .collect::<Result<Vec<ZonedJob>>>()?;
    let zones = distinct_zones(&zoned_jobs);

    let networks = optional_sequence(manifest, &"networks".into())
        .iter()
        .filter_map(network_subnets)
        .collect();

    debug!(
        consul_agents = consul_agents.len(),
        jobs = jobs.len(),
        zones = ?zones,
        "Extracted manifest configuration"
    );

    Ok(ConfigurationRecord {
        consul_agents,
        etcd_cluster_url,
        zones,
        loggregator_shared_secret,
        etcd_certificates,
        syslog,
        consul_certificates,
        networks,
        zoned_jobs,
    })
}

fn etcd_url(address: &str) -> String {
    format!("http://{address}:{ETCD_CLIENT_PORT}")
}

/// Consul TLS material, keyed off `agent_cert`
///
/// Without an agent certificate the deployment is treated as plain consul.
/// Once it is present the key, CA and first encryption key are required.
fn consul_certificates(manifest: &Value) -> Result<Option<ConsulCertificates>> {
    let consul = ManifestPath::parse(CONSUL_PROPERTIES);
    let Some(agent_cert) = optional_scalar(manifest, &consul.join("agent_cert"))? else {
        return Ok(None);
    };

    Ok(Some(ConsulCertificates {
        agent_cert,
        agent_key: required_scalar(manifest, &consul.join("agent_key"))?,
        ca_cert: required_scalar(manifest, &consul.join("ca_cert"))?,
        encrypt_key: required_scalar(manifest, &consul.join("encrypt_keys").join("0"))?,
    }))
}

/// The zone of a job, or `None` when the job takes no part in zoning
fn job_zone(job: &Value) -> Option<String> {
    lookup(job, &JOB_ZONE.into()).and_then(scalar_to_string)
}

/// Zones name installer files, so they may not contain path separators
fn zoned_job(index: usize, job: &Value) -> Result<Option<ZonedJob>> {
    let Some(zone) = job_zone(job) else {
        return Ok(None);
    };
    if zone.contains(['/', '\\']) {
        return Err(GenerateError::InvalidField {
            path: format!("jobs.{index}.{JOB_ZONE}"),
            expected: "a zone name without path separators",
        });
    }

    let networks = optional_sequence(job, &"networks".into())
        .iter()
        .filter_map(|n| lookup(n, &"name".into()).and_then(scalar_to_string))
        .collect();
    Ok(Some(ZonedJob { zone, networks }))
}

fn network_subnets(network: &Value) -> Option<NetworkSubnets> {
    let name = lookup(network, &"name".into()).and_then(scalar_to_string)?;
    let subnets = optional_sequence(network, &"subnets".into())
        .iter()
        .filter_map(|s| {
            lookup(s, &"cloud_properties.subnet".into()).and_then(scalar_to_string)
        })
        .collect();
    Some(NetworkSubnets { name, subnets })
}

fn distinct_zones(jobs: &[ZonedJob]) -> Vec<String> {
    let mut zones: Vec<String> = Vec::new();
    for job in jobs {
        if !zones.contains(&job.zone) {
            zones.push(job.zone.clone());
        }
    }
    zones
}

//! Installer file rendering
//!
//! Turns a [`ConfigurationRecord`] into the files a Windows cell operator
//! copies onto the machine: the three etcd certificate files, the consul TLS
//! files when the deployment has them, and one `install_<zone>.bat` per
//! redundancy zone. Rendering is pure; writing is left to
//! [`crate::io::OutputWriter`].

pub mod batch;

use crate::manifest::ConfigurationRecord;
use batch::{continued_command, escape_special_characters};

pub const CA_CERT_FILE: &str = "ca.crt";
pub const CLIENT_CERT_FILE: &str = "client.crt";
pub const CLIENT_KEY_FILE: &str = "client.key";
pub const SUBNET_WRAPPER_FILE: &str = "install.bat";

pub const CONSUL_AGENT_CERT_FILE: &str = "consul_agent.crt";
pub const CONSUL_AGENT_KEY_FILE: &str = "consul_agent.key";
pub const CONSUL_CA_CERT_FILE: &str = "consul_ca.crt";
pub const CONSUL_ENCRYPT_KEY_FILE: &str = "consul_encrypt.key";

/// Placeholders left for the operator to fill in by hand
pub const USERNAME_PLACEHOLDER: &str = "[USERNAME]";
pub const PASSWORD_PLACEHOLDER: &str = "[PASSWORD]";

const MSIEXEC_COMMAND: &str = "msiexec /norestart /i diego.msi";
const STACK: &str = "windows2012R2";

/// A file to be written: name relative to the output directory plus contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub filename: String,
    pub content: String,
}

impl RenderedArtifact {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

/// Name of the installer script for `zone`
pub fn installer_filename(zone: &str) -> String {
    format!("install_{zone}.bat")
}

/// Path `cmd.exe` resolves relative to the directory the installer runs from
fn local_path(filename: &str) -> String {
    format!("%cd%\\{filename}")
}

/// Renders certificate and installer artifacts
#[derive(Debug, Clone)]
pub struct InstallerRenderer {
    admin_username: String,
    admin_password: String,
}

impl Default for InstallerRenderer {
    fn default() -> Self {
        Self {
            admin_username: USERNAME_PLACEHOLDER.to_string(),
            admin_password: PASSWORD_PLACEHOLDER.to_string(),
        }
    }
}

impl InstallerRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill in the Windows admin credentials instead of the placeholders
    ///
    /// Both values are escaped for `cmd.exe`.
    pub fn with_admin_credentials(self, username: &str, password: &str) -> Self {
        self.with_admin_username(username).with_admin_password(password)
    }

    pub fn with_admin_username(mut self, username: &str) -> Self {
        self.admin_username = escape_special_characters(username);
        self
    }

    pub fn with_admin_password(mut self, password: &str) -> Self {
        self.admin_password = escape_special_characters(password);
        self
    }

    /// Certificates first, then one installer per zone in record order
    pub fn render(&self, config: &ConfigurationRecord) -> Vec<RenderedArtifact> {
        let certs = &config.etcd_certificates;
        let mut artifacts = vec![
            RenderedArtifact::new(CA_CERT_FILE, certs.ca_cert.clone()),
            RenderedArtifact::new(CLIENT_CERT_FILE, certs.client_cert.clone()),
            RenderedArtifact::new(CLIENT_KEY_FILE, certs.client_key.clone()),
        ];

        if let Some(consul) = &config.consul_certificates {
            artifacts.extend([
                RenderedArtifact::new(CONSUL_AGENT_CERT_FILE, consul.agent_cert.clone()),
                RenderedArtifact::new(CONSUL_AGENT_KEY_FILE, consul.agent_key.clone()),
                RenderedArtifact::new(CONSUL_CA_CERT_FILE, consul.ca_cert.clone()),
                RenderedArtifact::new(CONSUL_ENCRYPT_KEY_FILE, consul.encrypt_key.clone()),
            ]);
        }

        artifacts.extend(config.zones.iter().map(|zone| {
            RenderedArtifact::new(installer_filename(zone), self.installer_script(config, zone))
        }));

        artifacts
    }

    /// The `msiexec` invocation for one zone
    pub fn installer_script(&self, config: &ConfigurationRecord, zone: &str) -> String {
        let mut arguments = vec![
            arg("ADMIN_USERNAME", &self.admin_username),
            arg("ADMIN_PASSWORD", &self.admin_password),
            arg("CONSUL_IPS", &config.consul_ips()),
            arg("CF_ETCD_CLUSTER", &config.etcd_cluster_url),
            arg("STACK", STACK),
            arg("REDUNDANCY_ZONE", zone),
            arg("LOGGREGATOR_SHARED_SECRET", &config.loggregator_shared_secret),
        ];

        if let Some(syslog) = &config.syslog {
            arguments.push(arg("SYSLOG_HOST_IP", &syslog.host));
            arguments.push(arg("SYSLOG_PORT", &syslog.port));
        }

        arguments.extend([
            arg("ETCD_CA_FILE", &local_path(CA_CERT_FILE)),
            arg("ETCD_CERT_FILE", &local_path(CLIENT_CERT_FILE)),
            arg("ETCD_KEY_FILE", &local_path(CLIENT_KEY_FILE)),
        ]);

        if config.consul_certificates.is_some() {
            arguments.extend([
                arg("CONSUL_ENCRYPT_FILE", &local_path(CONSUL_ENCRYPT_KEY_FILE)),
                arg("CONSUL_CA_FILE", &local_path(CONSUL_CA_CERT_FILE)),
                arg("CONSUL_AGENT_CERT_FILE", &local_path(CONSUL_AGENT_CERT_FILE)),
                arg("CONSUL_AGENT_KEY_FILE", &local_path(CONSUL_AGENT_KEY_FILE)),
            ]);
        }

        continued_command(MSIEXEC_COMMAND, &arguments)
    }
}

fn arg(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

/// Render with placeholder admin credentials
pub fn render(config: &ConfigurationRecord) -> Vec<RenderedArtifact> {
    InstallerRenderer::default().render(config)
}

/// `install.bat` that chains to the installer for `zone`
pub fn render_subnet_wrapper(zone: &str) -> RenderedArtifact {
    RenderedArtifact::new(
        SUBNET_WRAPPER_FILE,
        format!("%~dp0\\{}", installer_filename(zone)),
    )
}

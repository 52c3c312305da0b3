use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::Overrides;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// create-install-bat: Diego Windows installer generator
#[derive(Parser, Debug)]
#[command(name = "create-install-bat")]
#[command(version)]
#[command(about = "Generates Diego Windows installer scripts from a BOSH deployment")]
#[command(
    long_about = "Finds the deployment carrying the cf and diego releases on a BOSH director, \
    extracts its etcd certificates and cluster settings, and writes ca.crt, client.crt, \
    client.key and one install_<zone>.bat per redundancy zone into the output directory."
)]
pub struct Cli {
    /// BOSH director URL (e.g. https://bosh.example.com:25555)
    pub director_url: String,

    /// Output directory for certificates and installer scripts
    pub output_dir: PathBuf,

    /// Director username
    #[arg(long, env = "BOSH_USERNAME")]
    pub username: Option<String>,

    /// Director password
    #[arg(long, env = "BOSH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification when talking to the director
    #[arg(long)]
    pub skip_tls_verify: bool,

    /// Director request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Release the deployment must include (repeatable; default: cf, diego)
    #[arg(long = "release", value_name = "NAME")]
    pub releases: Vec<String>,

    /// Windows admin username to embed instead of [USERNAME]
    #[arg(long)]
    pub windows_username: Option<String>,

    /// Windows admin password to embed instead of [PASSWORD]
    #[arg(long)]
    pub windows_password: Option<String>,

    /// AWS subnet of the Windows cell; also writes install.bat for its zone
    #[arg(long)]
    pub aws_subnet: Option<String>,

    /// Settings file (default: <config dir>/create-install-bat/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Set log level
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl Cli {
    /// Command-line values that take precedence over the settings file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            username: self.username.clone(),
            password: self.password.clone(),
            skip_tls_verify: self.skip_tls_verify,
            timeout_secs: self.timeout,
            required_releases: self.releases.clone(),
            windows_username: self.windows_username.clone(),
            windows_password: self.windows_password.clone(),
            aws_subnet: self.aws_subnet.clone(),
        }
    }
}

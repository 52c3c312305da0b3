use serde::{Deserialize, Serialize};

/// Director API credentials and transport options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectorSection {
    pub username: Option<String>,
    pub password: Option<String>,
    pub skip_tls_verify: Option<bool>,
    pub timeout_secs: Option<u64>,
}

/// Windows admin account baked into the installer scripts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowsSection {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Contents of the optional `config.yaml` settings file
///
/// ```yaml
/// director:
///   username: admin
///   password: admin
///   skip_tls_verify: true
///   timeout_secs: 10
/// required_releases: [cf, diego]
/// windows:
///   username: Administrator
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub director: DirectorSection,

    #[serde(default)]
    pub required_releases: Option<Vec<String>>,

    #[serde(default)]
    pub windows: WindowsSection,
}

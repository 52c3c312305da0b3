//! Run configuration
//!
//! Values come from, in order of precedence: command-line flags (and their
//! environment variables), the YAML settings file, then built-in defaults.

mod loader;
mod settings;

pub use loader::{default_settings_path, load_settings, load_settings_from_path};
pub use settings::{DirectorSection, Settings, WindowsSection};

use std::path::PathBuf;
use std::time::Duration;

use crate::director::{DirectorSettings, DEFAULT_REQUIRED_RELEASES};
use crate::pipeline::GenerateOptions;
use crate::{GenerateError, Result};

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub username: Option<String>,
    pub password: Option<String>,
    pub skip_tls_verify: bool,
    pub timeout_secs: Option<u64>,
    pub required_releases: Vec<String>,
    pub windows_username: Option<String>,
    pub windows_password: Option<String>,
    pub aws_subnet: Option<String>,
}

impl Settings {
    /// Merge command-line values over these settings
    ///
    /// An empty `required_releases` list would match every deployment, so it
    /// is rejected.
    pub fn resolve(
        &self,
        director_url: &str,
        output_dir: PathBuf,
        overrides: Overrides,
    ) -> Result<GenerateOptions> {
        let director = DirectorSettings {
            base_url: director_url.to_string(),
            username: overrides
                .username
                .or_else(|| self.director.username.clone())
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: overrides
                .password
                .or_else(|| self.director.password.clone())
                .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            skip_tls_verify: overrides.skip_tls_verify
                || self.director.skip_tls_verify.unwrap_or(false),
            timeout: Duration::from_secs(
                overrides
                    .timeout_secs
                    .or(self.director.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        };

        let required_releases = if !overrides.required_releases.is_empty() {
            overrides.required_releases
        } else if let Some(releases) = &self.required_releases {
            if releases.is_empty() {
                return Err(GenerateError::Config {
                    message: "required_releases must name at least one release".to_string(),
                });
            }
            releases.clone()
        } else {
            DEFAULT_REQUIRED_RELEASES
                .iter()
                .map(|r| r.to_string())
                .collect()
        };

        Ok(GenerateOptions {
            director,
            output_dir,
            required_releases,
            windows_username: overrides
                .windows_username
                .or_else(|| self.windows.username.clone()),
            windows_password: overrides
                .windows_password
                .or_else(|| self.windows.password.clone()),
            aws_subnet: overrides.aws_subnet,
        })
    }
}

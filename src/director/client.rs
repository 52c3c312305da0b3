//! HTTP client for the BOSH director API

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::models::{Deployment, DeploymentDetail};
use crate::{GenerateError, Result};

/// Connection settings for a director
#[derive(Debug, Clone)]
pub struct DirectorSettings {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub skip_tls_verify: bool,
    pub timeout: Duration,
}

/// Fetches deployments and manifests from a director
pub struct DirectorClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl DirectorClient {
    pub fn new(settings: &DirectorSettings) -> Result<Self> {
        if settings.skip_tls_verify {
            debug!("TLS certificate verification disabled for {}", settings.base_url);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("create-install-bat/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(settings.skip_tls_verify)
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            username: settings.username.clone(),
            password: settings.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /deployments`
    pub async fn list_deployments(&self) -> Result<Vec<Deployment>> {
        self.get_json("/deployments", "deployment list").await
    }

    /// `GET /deployments/<name>`, returning the manifest text
    pub async fn fetch_manifest(&self, deployment: &str) -> Result<String> {
        let detail: DeploymentDetail = self
            .get_json(&format!("/deployments/{deployment}"), "deployment details")
            .await?;
        Ok(detail.manifest)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, context: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GenerateError::Authentication {
                url,
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Err(GenerateError::UnexpectedStatus {
                url,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| GenerateError::Parse {
            context: format!("{context} from {url}"),
            message: e.to_string(),
        })
    }
}

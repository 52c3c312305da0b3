//! BOSH director API payloads

use serde::Deserialize;
use tracing::warn;

use crate::{GenerateError, Result};

/// Releases a deployment must carry to host Windows Diego cells
pub const DEFAULT_REQUIRED_RELEASES: [&str; 2] = ["cf", "diego"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// An entry of `GET /deployments`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Deployment {
    pub name: String,
    #[serde(default)]
    pub releases: Vec<Release>,
}

impl Deployment {
    /// True when every name in `required` is among this deployment's releases
    pub fn has_releases<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required
            .iter()
            .all(|name| self.releases.iter().any(|r| r.name == name.as_ref()))
    }
}

/// Body of `GET /deployments/<name>`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeploymentDetail {
    pub manifest: String,
}

/// First deployment whose releases include all of `required`
pub fn select_deployment<'a, S: AsRef<str>>(
    deployments: &'a [Deployment],
    required: &[S],
) -> Result<&'a Deployment> {
    let mut matching = deployments.iter().filter(|d| d.has_releases(required));

    let selected = matching
        .next()
        .ok_or_else(|| GenerateError::DeploymentNotFound {
            required: required.iter().map(|r| r.as_ref().to_string()).collect(),
        })?;

    let others: Vec<&str> = matching.map(|d| d.name.as_str()).collect();
    if !others.is_empty() {
        warn!(
            selected = %selected.name,
            ignored = ?others,
            "More than one deployment carries the required releases; using the first"
        );
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployment(name: &str, releases: &[&str]) -> Deployment {
        Deployment {
            name: name.to_string(),
            releases: releases
                .iter()
                .map(|r| Release {
                    name: r.to_string(),
                    version: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_selects_superset_of_required_releases() {
        let deployments = vec![
            deployment("cf-warden", &["cf"]),
            deployment("cf-warden-diego", &["cf", "diego", "garden-linux"]),
        ];

        let selected = select_deployment(&deployments, &DEFAULT_REQUIRED_RELEASES).unwrap();
        assert_eq!(selected.name, "cf-warden-diego");
    }

    #[test]
    fn test_first_match_wins() {
        let deployments = vec![
            deployment("first", &["diego", "cf"]),
            deployment("second", &["cf", "diego"]),
        ];

        let selected = select_deployment(&deployments, &DEFAULT_REQUIRED_RELEASES).unwrap();
        assert_eq!(selected.name, "first");
    }

    #[test]
    fn test_no_match_is_deployment_not_found() {
        let deployments = vec![deployment("cf-warden", &["cf"]), deployment("diego", &["diego"])];

        let err = select_deployment(&deployments, &DEFAULT_REQUIRED_RELEASES).unwrap_err();
        match err {
            GenerateError::DeploymentNotFound { required } => {
                assert_eq!(required, vec!["cf", "diego"]);
            }
            other => panic!("Expected DeploymentNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_list_is_deployment_not_found() {
        assert!(select_deployment(&[], &DEFAULT_REQUIRED_RELEASES).is_err());
    }

    #[test]
    fn test_deserializes_director_payload() {
        let json = r#"[
            {"name": "cf-warden-diego", "releases": [
                {"name": "cf", "version": "213+dev.2"},
                {"name": "diego", "version": "0.1366.0+dev.2"}
            ], "stemcells": []}
        ]"#;

        let deployments: Vec<Deployment> = serde_json::from_str(json).unwrap();
        assert_eq!(deployments.len(), 1);
        assert_eq!(deployments[0].releases[1].version.as_deref(), Some("0.1366.0+dev.2"));
    }
}

//! The end-to-end generate run
//!
//! Fetch, select, extract and render all happen before the first write, so
//! any failure up to that point leaves the output directory untouched.

use std::path::PathBuf;
use tracing::info;

use crate::director::{select_deployment, DirectorClient, DirectorSettings};
use crate::io::OutputWriter;
use crate::manifest;
use crate::render::{render_subnet_wrapper, InstallerRenderer, RenderedArtifact};
use crate::{GenerateError, Result};

/// Fully resolved inputs for one run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub director: DirectorSettings,
    pub output_dir: PathBuf,
    pub required_releases: Vec<String>,
    pub windows_username: Option<String>,
    pub windows_password: Option<String>,
    pub aws_subnet: Option<String>,
}

impl GenerateOptions {
    fn renderer(&self) -> InstallerRenderer {
        let mut renderer = InstallerRenderer::new();
        if let Some(username) = &self.windows_username {
            renderer = renderer.with_admin_username(username);
        }
        if let Some(password) = &self.windows_password {
            renderer = renderer.with_admin_password(password);
        }
        renderer
    }
}

/// Fetch the manifest and produce every artifact, without writing anything
pub async fn prepare_artifacts(
    client: &DirectorClient,
    options: &GenerateOptions,
) -> Result<Vec<RenderedArtifact>> {
    let deployments = client.list_deployments().await?;
    let deployment = select_deployment(&deployments, options.required_releases.as_slice())?;
    info!("Using deployment '{}'", deployment.name);

    let raw_manifest = client.fetch_manifest(&deployment.name).await?;
    let config = manifest::extract(&raw_manifest)?;
    info!(zones = ?config.zones, "Extracted configuration");

    let mut artifacts = options.renderer().render(&config);

    if let Some(subnet) = &options.aws_subnet {
        let zone = config
            .zone_for_subnet(subnet)
            .ok_or_else(|| GenerateError::SubnetZoneNotFound {
                subnet: subnet.clone(),
            })?;
        info!("Subnet {} maps to zone {}", subnet, zone);
        artifacts.push(render_subnet_wrapper(zone));
    }

    Ok(artifacts)
}

/// Run the whole pipeline, returning the paths written
pub async fn run(client: &DirectorClient, options: &GenerateOptions) -> Result<Vec<PathBuf>> {
    let artifacts = prepare_artifacts(client, options).await?;

    println!("Generate files in output directory");
    let writer = OutputWriter::new(&options.output_dir);
    writer.prepare()?;
    let written = writer.write_all(&artifacts)?;

    info!(
        "Wrote {} files to {}",
        written.len(),
        options.output_dir.display()
    );
    Ok(written)
}

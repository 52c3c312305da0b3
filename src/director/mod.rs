//! BOSH director access
//!
//! Lists deployments, picks the one running Diego and fetches its manifest.

mod client;
mod models;

pub use client::{DirectorClient, DirectorSettings};
pub use models::{
    select_deployment, Deployment, DeploymentDetail, Release, DEFAULT_REQUIRED_RELEASES,
};

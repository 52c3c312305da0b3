//! Generates the files an operator needs to install a Diego cell on Windows
//!
//! A run asks a BOSH director for the deployment carrying the `cf` and
//! `diego` releases, extracts its etcd certificates and cluster settings,
//! and renders them as `ca.crt`, `client.crt`, `client.key` and one
//! `install_<zone>.bat` per redundancy zone.

pub mod cli;
pub mod config;
pub mod director;
pub mod error;
pub mod io;
pub mod manifest;
pub mod pipeline;
pub mod render;

pub use error::{GenerateError, Result};

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::render::RenderedArtifact;
use crate::{GenerateError, Result};

/// Persists rendered artifacts into an output directory
///
/// Each file is written to a temporary sibling and renamed into place, so a
/// destination is either fully replaced or left untouched.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
    quiet: bool,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quiet: false,
        }
    }

    /// Suppress the per-file progress lines
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Create the output directory and any missing parents
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| GenerateError::filesystem(&self.dir, e))
    }

    /// Write one artifact, returning its final path
    pub fn write(&self, artifact: &RenderedArtifact) -> Result<PathBuf> {
        let path = self.dir.join(&artifact.filename);
        if !self.quiet {
            println!("  {}", path.display());
        }

        let mut file = temp_file_in(&self.dir).map_err(|e| GenerateError::filesystem(&path, e))?;
        file
            .write_all(artifact.content.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| GenerateError::filesystem(&path, e))?;
        file
            .persist(&path)
            .map_err(|e| GenerateError::filesystem(&path, e.error))?;

        debug!("Wrote {} bytes to {}", artifact.content.len(), path.display());
        Ok(path)
    }

    /// Write artifacts in order, stopping at the first failure
    pub fn write_all(&self, artifacts: &[RenderedArtifact]) -> Result<Vec<PathBuf>> {
        artifacts.iter().map(|a| self.write(a)).collect()
    }
}

/// Hidden temporary file in `dir`, world-readable like a plainly created file
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".create-install-bat");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    builder.tempfile_in(dir)
}

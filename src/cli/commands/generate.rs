use super::CommandHandler;
use crate::director::DirectorClient;
use crate::pipeline::{self, GenerateOptions};
use crate::{GenerateError, Result};
use tracing::debug;

/// Handler for a generate run
pub struct GenerateCommand {
    pub options: GenerateOptions,
}

impl CommandHandler for GenerateCommand {
    fn execute(&self) -> Result<()> {
        debug!(
            director = %self.options.director.base_url,
            output_dir = %self.options.output_dir.display(),
            releases = ?self.options.required_releases,
            "Starting {}",
            self.name()
        );

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| GenerateError::Config {
                message: format!("Failed to start async runtime: {e}"),
            })?;

        let client = DirectorClient::new(&self.options.director)?;
        runtime.block_on(pipeline::run(&client, &self.options))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "generate"
    }
}

impl GenerateCommand {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }
}

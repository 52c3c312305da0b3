pub mod generate;

use crate::Result;

/// A runnable invocation built from parsed arguments and resolved settings
pub trait CommandHandler {
    fn execute(&self) -> Result<()>;

    /// Short name used in log lines
    fn name(&self) -> &'static str;
}

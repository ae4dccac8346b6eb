use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};

/// Logs go to stderr so command output on stdout stays clean.
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(format!("hisab_cli={level},engine={level},insight={level}"))
        .map_err(|err| CliError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

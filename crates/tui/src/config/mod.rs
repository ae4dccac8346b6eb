use clap::Parser;
use settings::{Overrides, Settings};

use crate::error::Result;

pub type AppConfig = Settings;

#[derive(Debug, Parser)]
#[command(name = "hisab_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the ledger data directory.
    #[arg(long)]
    data_dir: Option<String>,
    /// Override currency code (INR, EUR, USD).
    #[arg(long)]
    currency: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(self) -> (Option<String>, Overrides) {
        (
            self.config,
            Overrides {
                data_dir: self.data_dir,
                currency: self.currency,
                timezone: self.timezone,
                log_level: self.log_level,
            },
        )
    }
}

pub fn load() -> Result<AppConfig> {
    let (config_path, overrides) = Args::parse().overrides();
    Ok(settings::load(config_path.as_deref())?.with_overrides(overrides))
}

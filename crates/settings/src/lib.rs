//! Settings shared by `hisab_tui` and `hisab`, so both front ends open the
//! same ledger.
//!
//! Sources, lowest priority first: built-in defaults, the optional TOML file
//! (`config/hisab.toml` unless another path is given), `HISAB_*` environment
//! variables with `__` between sections (`HISAB_INSIGHT__API_KEY`). Command
//! line flags are applied by each binary through [`Overrides`].
use engine::Currency;
use insight::InsightConfig;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config/hisab.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid setting: {0}")]
    Invalid(String),
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the ledger JSON blobs.
    pub data_dir: String,
    pub currency: String,
    pub timezone: String,
    pub log_level: String,
    /// Log file of the terminal UI. The CLI logs to stderr.
    pub log_file: String,
    pub insight: InsightConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            currency: "INR".to_string(),
            timezone: "Asia/Kolkata".to_string(),
            log_level: "info".to_string(),
            log_file: "data/hisab_tui.log".to_string(),
            insight: InsightConfig::default(),
        }
    }
}

/// Values given on the command line; `None` keeps the layered value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<String>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn currency(&self) -> Result<Currency> {
        Ok(Currency::try_from(self.currency.as_str())?)
    }

    pub fn timezone(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| SettingsError::Invalid(format!("unknown timezone: {}", self.timezone)))
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(currency) = overrides.currency {
            self.currency = currency;
        }
        if let Some(timezone) = overrides.timezone {
            self.timezone = timezone;
        }
        if let Some(log_level) = overrides.log_level {
            self.log_level = log_level;
        }
        self
    }
}

/// Reads the file and environment layers. A missing file is not an error.
pub fn load(config_path: Option<&str>) -> Result<Settings> {
    let config_path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
    let mut settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("HISAB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    if settings.insight.api_key.is_none() {
        settings.insight.api_key = api_key_from_env();
    }

    Ok(settings)
}

/// The key may also come from the variables other tools use for it.
fn api_key_from_env() -> Option<String> {
    ["GEMINI_API_KEY", "API_KEY"]
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .filter(|key| !key.trim().is_empty())
}

use crate::error::{CliError, CliResult};
use gdax_sdk::{Credentials, DEFAULT_ACCURACY, DEFAULT_PAGE_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_URL: &str = "https://api.exchange.coinbase.com";
pub const DEFAULT_SANDBOX_URL: &str = "https://api-public.sandbox.exchange.coinbase.com";
pub const DEFAULT_SELF_TRADE_PREVENTION: &str = "dc";

/// Largest accepted `display.accuracy`
pub const MAX_ACCURACY: usize = 16;

/// Overrides the config file location when `--config` is not given
pub const CONFIG_PATH_ENV: &str = "GDAXCLI_CONFIG";
const ENV_PREFIX: &str = "GDAXCLI";

/// CLI configuration (defaults < config.toml < GDAXCLI__SECTION__KEY env vars)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    pub display: DisplayConfig,
    pub trading: TradingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub url: String,
    pub sandbox_url: String,
    pub sandbox: bool,
    pub page_limit: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub key: Option<String>,
    pub secret: Option<String>,
    pub passphrase: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub accuracy: usize,
    pub color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingConfig {
    pub self_trade_prevention: String,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            sandbox_url: DEFAULT_SANDBOX_URL.to_string(),
            sandbox: false,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_ACCURACY,
            color: true,
        }
    }
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            self_trade_prevention: DEFAULT_SELF_TRADE_PREVENTION.to_string(),
        }
    }
}

impl Config {
    /// Load configuration, reading `path` if given (it must then exist)
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut builder = Self::builder()?;
        match explicit {
            Some(file) => {
                builder = builder.add_source(config::File::from(file).required(true));
            }
            None => {
                if let Some(file) = default_config_path() {
                    builder = builder.add_source(config::File::from(file).required(false));
                }
            }
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        settings.try_deserialize::<Self>()?.validated()
    }

    /// Parse a TOML document layered over the defaults
    pub fn from_toml(source: &str) -> CliResult<Self> {
        let settings = Self::builder()?
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        settings.try_deserialize::<Self>()?.validated()
    }

    fn validated(self) -> CliResult<Self> {
        if self.display.accuracy > MAX_ACCURACY {
            return Err(config::ConfigError::Message(format!(
                "display.accuracy must be at most {}, got {}",
                MAX_ACCURACY, self.display.accuracy
            ))
            .into());
        }
        Ok(self)
    }

    fn builder() -> CliResult<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Config::default();
        Ok(config::Config::builder()
            .set_default("exchange.url", defaults.exchange.url)?
            .set_default("exchange.sandbox_url", defaults.exchange.sandbox_url)?
            .set_default("exchange.sandbox", defaults.exchange.sandbox)?
            .set_default("exchange.page_limit", i64::from(defaults.exchange.page_limit))?
            .set_default("display.accuracy", defaults.display.accuracy as i64)?
            .set_default("display.color", defaults.display.color)?
            .set_default(
                "trading.self_trade_prevention",
                defaults.trading.self_trade_prevention,
            )?)
    }

    /// Exchange URL, honoring the sandbox switch from either the file or `--sandbox`
    pub fn api_url(&self, sandbox: bool) -> &str {
        if sandbox || self.exchange.sandbox {
            &self.exchange.sandbox_url
        } else {
            &self.exchange.url
        }
    }

    /// API credentials; every missing or blank key is reported at once
    pub fn credentials(&self) -> CliResult<Credentials> {
        let creds = &self.credentials;
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let key = present(&creds.key);
        let secret = present(&creds.secret);
        let passphrase = present(&creds.passphrase);

        match (key, secret, passphrase) {
            (Some(key), Some(secret), Some(passphrase)) => {
                Ok(Credentials::new(key, secret, passphrase))
            }
            (key, secret, passphrase) => {
                let missing = [
                    ("credentials.key", key.is_none()),
                    ("credentials.secret", secret.is_none()),
                    ("credentials.passphrase", passphrase.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(CliError::MissingCredentials(missing))
            }
        }
    }

    /// `None` when self-trade prevention is configured as an empty string
    pub fn self_trade_prevention(&self) -> Option<String> {
        let stp = self.trading.self_trade_prevention.trim();
        (!stp.is_empty()).then(|| stp.to_string())
    }
}

/// `<config_dir>/gdaxcli/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gdaxcli").join("config.toml"))
}

use gdax_sdk::{OrderType, SdkError};
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    // Startup errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Missing credentials: {}. Set them in the config file or as GDAXCLI__CREDENTIALS__* environment variables", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    // Bad input
    #[error("{0}")]
    Usage(String),

    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] OrderRejection),

    #[error("{0} is not yet implemented")]
    NotImplemented(String),

    // Runtime errors
    #[error("Exchange error: {0}")]
    Exchange(#[from] SdkError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl CliError {
    /// Errors the user did not cause; these get the full chain and the issue tracker pointer
    pub fn is_unexpected(&self) -> bool {
        matches!(self, CliError::Exchange(_) | CliError::Unexpected(_))
    }
}

/// Why an order (or a cancellation target) was refused before reaching the exchange
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderRejection {
    #[error("unknown order type '{0}', expected market, limit or stop")]
    UnknownOrderType(String),

    #[error("unknown side '{0}', expected buy or sell")]
    UnknownSide(String),

    #[error("unknown product '{0}'")]
    UnknownProduct(String),

    #[error("size '{0}' is not a number")]
    InvalidSize(String),

    #[error("a price is required for {0} orders")]
    MissingPrice(OrderType),

    #[error("price '{0}' must be absolute (180.23) or relative to the market (+5, -1.5)")]
    InvalidPrice(String),

    #[error("Buying higher than or equal to current price: {price} >= {market}")]
    BuyAtOrAboveMarket { price: String, market: String },

    #[error("Selling lower than or equal to current price: {price} <= {market}")]
    SellAtOrBelowMarket { price: String, market: String },

    #[error("no open order matches '{0}'")]
    UnknownOrderId(String),

    #[error("'{prefix}' matches {count} open orders, use a longer prefix")]
    AmbiguousOrderId { prefix: String, count: usize },
}

use crate::error::{CliError, CliResult};

/// Everything the CLI can be asked to do in one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Products,
    /// Empty means every product in the catalog
    Ticker { products: Vec<String> },
    Balance,
    History { accounts: Vec<String> },
    Orders,
    CancelAll { product: String },
    Cancel { order_id: String },
    Place(OrderArgs),
    Fills { product: Option<String> },
}

/// Order arguments exactly as typed; see [`crate::order::validate_order`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderArgs {
    pub order_type: String,
    pub side: String,
    pub product: String,
    pub size: String,
    pub price: Option<String>,
}

/// Currency shown by `history` when none is given
pub const DEFAULT_HISTORY_ACCOUNT: &str = "USD";

impl Command {
    /// Interpret the words following `order`
    ///
    /// ```
    /// use gdaxcli::command::Command;
    ///
    /// let args: Vec<String> = ["cancel", "all", "eth-usd"].iter().map(|s| s.to_string()).collect();
    /// assert_eq!(
    ///     Command::from_order_args(&args).unwrap(),
    ///     Command::CancelAll { product: "eth-usd".to_string() }
    /// );
    /// ```
    pub fn from_order_args(args: &[String]) -> CliResult<Command> {
        let words: Vec<&str> = args.iter().map(String::as_str).collect();
        let command = match words.as_slice() {
            ["list"] => Command::Orders,
            ["cancel", "all"] => return Err(usage("Missing product: order cancel all <product>")),
            ["cancel", "all", product] => Command::CancelAll {
                product: product.to_string(),
            },
            ["cancel"] => return Err(usage("Missing order id: order cancel <id>")),
            ["cancel", order_id] => Command::Cancel {
                order_id: order_id.to_string(),
            },
            [order_type, side, product, size] => Command::Place(OrderArgs {
                order_type: order_type.to_string(),
                side: side.to_string(),
                product: product.to_string(),
                size: size.to_string(),
                price: None,
            }),
            [order_type, side, product, size, price] => Command::Place(OrderArgs {
                order_type: order_type.to_string(),
                side: side.to_string(),
                product: product.to_string(),
                size: size.to_string(),
                price: Some(price.to_string()),
            }),
            words if words.len() > 5 => return Err(usage("Too many values.")),
            _ => return Err(usage("Missing required value.")),
        };
        Ok(command)
    }
}

fn usage(message: &str) -> CliError {
    CliError::Usage(message.to_string())
}

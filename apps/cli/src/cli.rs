//! Command-line interface definitions.

use crate::command::{Command, DEFAULT_HISTORY_ACCOUNT};
use crate::error::CliResult;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  gdaxcli ticker eth-usd btc-usd
  gdaxcli history usd eth
  gdaxcli order limit buy eth-usd .25 -1      # one dollar below market
  gdaxcli order limit sell eth-usd .25 +2.5   # two fifty above market
  gdaxcli order limit sell eth-usd .25 310.50
  gdaxcli order market buy btc-usd 0.01
  gdaxcli order cancel 8b99b1
  gdaxcli order cancel all eth-usd";

/// Commandline client for trading on GDAX.
#[derive(Parser, Debug)]
#[command(name = "gdaxcli")]
#[command(version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Do not ask for confirmation before placing or cancelling orders
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use the sandbox exchange
    #[arg(long, global = true)]
    pub sandbox: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List products available for trading
    Products,

    /// Show the market ticker (default: every product)
    Ticker {
        products: Vec<String>,
    },

    /// Show account balances
    Balance,

    /// Show account history (default: USD)
    History {
        accounts: Vec<String>,
    },

    /// List open orders, or cancel all of them for a product
    Orders {
        #[command(subcommand)]
        action: Option<OrdersAction>,
    },

    /// Place, list or cancel orders
    #[command(
        override_usage = "gdaxcli order <market|limit|stop> <buy|sell> <PRODUCT> <SIZE> [PRICE]\n       \
                          gdaxcli order list\n       \
                          gdaxcli order cancel <ORDER_ID>\n       \
                          gdaxcli order cancel all <PRODUCT>"
    )]
    Order {
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "ARGS"
        )]
        args: Vec<String>,
    },

    /// List fills, optionally for one product
    Fills {
        product: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrdersAction {
    /// Cancel every open order for a product
    Cancel { product: String },
}

impl Cli {
    pub fn to_command(&self) -> CliResult<Command> {
        let command = match &self.command {
            None => Command::Help,
            Some(Commands::Products) => Command::Products,
            Some(Commands::Ticker { products }) => Command::Ticker {
                products: products.clone(),
            },
            Some(Commands::Balance) => Command::Balance,
            Some(Commands::History { accounts }) => Command::History {
                accounts: if accounts.is_empty() {
                    vec![DEFAULT_HISTORY_ACCOUNT.to_string()]
                } else {
                    accounts.clone()
                },
            },
            Some(Commands::Orders { action: None }) => Command::Orders,
            Some(Commands::Orders {
                action: Some(OrdersAction::Cancel { product }),
            }) => Command::CancelAll {
                product: product.clone(),
            },
            Some(Commands::Order { args }) => Command::from_order_args(args)?,
            Some(Commands::Fills { product }) => Command::Fills {
                product: product.clone(),
            },
        };
        Ok(command)
    }
}

/// Full help text, as printed by `gdaxcli help`
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// What to print on stderr when the arguments do not parse
///
/// An unknown command is followed by the full usage text.
pub fn parse_error_message(error: &clap::Error) -> String {
    match error.kind() {
        ErrorKind::InvalidSubcommand => format!("{}\n{}\n", error, usage()),
        _ => error.to_string(),
    }
}

//! gdaxcli
//!
//! Commandline client for trading on GDAX (Coinbase Exchange): market data,
//! balances, account history, fills, and placing or cancelling orders with
//! prices given absolutely or relative to the market.

pub mod cli;
pub mod command;
pub mod config;
pub mod confirm;
pub mod error;
pub mod order;
pub mod session;
pub mod table;
pub mod views;

pub use cli::Cli;
pub use command::{Command, OrderArgs};
pub use crate::config::Config;
pub use confirm::{AssumeYes, Prompt, StdinPrompt};
pub use error::{CliError, CliResult, OrderRejection};
pub use session::{Session, SessionOptions};

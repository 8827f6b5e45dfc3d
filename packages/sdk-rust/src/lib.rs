//! GDAX SDK
//!
//! Rust client for the Coinbase Exchange (formerly GDAX) REST API.
//!
//! This SDK provides:
//! - Authenticated REST client for market data, accounts, orders and fills
//! - Request signing
//! - Cursor pagination over list endpoints
//! - Typed records for every response shape
//! - Formatting utilities for decimal strings
//!
//! # Example
//!
//! ```no_run
//! use gdax_sdk::{Credentials, ExchangeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), gdax_sdk::SdkError> {
//!     let credentials = Credentials::new("key", "c2VjcmV0", "passphrase");
//!     let client = ExchangeClient::new("https://api.exchange.coinbase.com", credentials);
//!
//!     let ticker = client.get_product_ticker("ETH-USD").await?;
//!     println!("ETH-USD: {}", ticker.price);
//!
//!     let mut pages = client.get_fills(Some("ETH-USD"));
//!     while let Some(page) = pages.next_page().await? {
//!         for fill in page {
//!             println!("{} {} @ {}", fill.side, fill.size, fill.price);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod format;
pub mod models;
pub mod pagination;

pub use auth::Credentials;
pub use client::{ExchangeClient, DEFAULT_PAGE_LIMIT};
pub use error::{SdkError, SdkResult};
pub use format::{format_float, is_str_zero, parse_f64, truncate, DEFAULT_ACCURACY};
pub use models::*;
pub use pagination::{Pages, CURSOR_HEADER};

//! Test utilities for the GDAX workspace
//!
//! [`MockExchange`] is an in-process stand-in for the exchange REST API. It
//! binds to a random local port, checks request signatures the same way the
//! real exchange does, and records every order placed or cancelled so tests can
//! assert on what the client sent.

pub mod fixtures;
pub mod server;

pub use fixtures::test_credentials;
pub use server::{MockExchange, MockState};

use crate::{MockExchange, MockState};
use gdax_sdk::{
    Account, Credentials, Fill, LedgerDetails, LedgerEntry, LedgerEntryKind, Order, OrderType,
    Product, ProductStats, Side, Ticker,
};

/// Secret used by every fixture: "test-exchange-secret" in base64
pub const TEST_SECRET: &str = "dGVzdC1leGNoYW5nZS1zZWNyZXQ=";

pub fn test_credentials() -> Credentials {
    Credentials::new("test-key", TEST_SECRET, "test-passphrase")
}

/// Product with the base/quote currencies taken from the id
pub fn product(id: &str) -> Product {
    let (base, quote) = id.split_once('-').unwrap_or((id, ""));
    Product {
        id: id.to_string(),
        base_currency: base.to_string(),
        quote_currency: quote.to_string(),
        base_min_size: Some("0.01".to_string()),
        base_max_size: Some("10000".to_string()),
        quote_increment: "0.01".to_string(),
        status: Some("online".to_string()),
    }
}

pub fn ticker(price: &str, bid: &str, ask: &str) -> Ticker {
    Ticker {
        trade_id: Some(4729088),
        price: price.to_string(),
        size: "0.19300000".to_string(),
        bid: bid.to_string(),
        ask: ask.to_string(),
        volume: "12041.66347852".to_string(),
        time: Some("2017-06-01T16:46:21.311000Z".to_string()),
    }
}

pub fn stats(open: &str, high: &str, low: &str) -> ProductStats {
    ProductStats {
        open: open.to_string(),
        high: high.to_string(),
        low: low.to_string(),
        volume: "12041.66347852".to_string(),
        last: None,
    }
}

pub fn account(id: &str, currency: &str, balance: &str, available: &str, hold: &str) -> Account {
    Account {
        id: id.to_string(),
        currency: currency.to_string(),
        balance: balance.to_string(),
        available: available.to_string(),
        hold: hold.to_string(),
        profile_id: Some("profile-1".to_string()),
    }
}

pub fn ledger_entry(
    id: &str,
    kind: LedgerEntryKind,
    amount: &str,
    balance: &str,
    details: LedgerDetails,
) -> LedgerEntry {
    LedgerEntry {
        id: id.to_string(),
        created_at: "2017-06-01T16:46:21.311000Z".to_string(),
        amount: amount.to_string(),
        balance: balance.to_string(),
        kind,
        details,
    }
}

pub fn transfer_details(transfer_type: &str) -> LedgerDetails {
    LedgerDetails {
        transfer_id: Some("transfer-1".to_string()),
        transfer_type: Some(transfer_type.to_string()),
        ..LedgerDetails::default()
    }
}

pub fn match_details(product_id: &str) -> LedgerDetails {
    LedgerDetails {
        order_id: Some("order-1".to_string()),
        trade_id: Some("74".to_string()),
        product_id: Some(product_id.to_string()),
        ..LedgerDetails::default()
    }
}

pub fn open_order(id: &str, product_id: &str, side: Side, price: &str, size: &str) -> Order {
    Order {
        id: id.to_string(),
        price: Some(price.to_string()),
        size: Some(size.to_string()),
        product_id: product_id.to_string(),
        side,
        order_type: OrderType::Limit,
        time_in_force: Some("GTC".to_string()),
        post_only: false,
        created_at: "2017-06-01T16:46:21.311000Z".to_string(),
        fill_fees: "0.0000000000000000".to_string(),
        filled_size: "0.00000000".to_string(),
        executed_value: "0.0000000000000000".to_string(),
        status: "open".to_string(),
        settled: false,
        stp: Some("dc".to_string()),
    }
}

pub fn fill(trade_id: u64, product_id: &str, side: Side, price: &str, size: &str, fee: &str) -> Fill {
    Fill {
        trade_id,
        product_id: product_id.to_string(),
        price: price.to_string(),
        size: size.to_string(),
        order_id: format!("order-{}", trade_id),
        created_at: "2017-06-01T16:46:21.311000Z".to_string(),
        liquidity: Some("T".to_string()),
        fee: fee.to_string(),
        settled: true,
        side,
    }
}

impl MockState {
    /// Two products, ETH-USD trading at 123.45, and USD/ETH accounts with history
    pub fn standard() -> Self {
        let mut state = MockState {
            products: vec![product("ETH-USD"), product("BTC-GBP")],
            ..MockState::default()
        };
        state
            .tickers
            .insert("ETH-USD".to_string(), ticker("123.45", "123.44", "123.46"));
        state
            .tickers
            .insert("BTC-GBP".to_string(), ticker("2000.00", "1999.50", "2000.50"));
        state
            .stats
            .insert("ETH-USD".to_string(), stats("120.00", "125.00", "119.00"));
        state
            .stats
            .insert("BTC-GBP".to_string(), stats("2100.00", "2150.00", "1990.00"));

        state.accounts = vec![
            account("acct-usd", "USD", "1000.5000000000000000", "900.5000000000000000", "100.0000000000000000"),
            account("acct-eth", "ETH", "2.5000000000000000", "2.5000000000000000", "0.0000000000000000"),
        ];
        state.ledgers.insert(
            "acct-usd".to_string(),
            vec![
                ledger_entry("1", LedgerEntryKind::Transfer, "1000.00", "1000.00", transfer_details("deposit")),
                ledger_entry("2", LedgerEntryKind::Match, "-123.45", "876.55", match_details("ETH-USD")),
                ledger_entry("3", LedgerEntryKind::Fee, "-0.37", "876.18", match_details("ETH-USD")),
            ],
        );
        state
    }
}

impl MockExchange {
    /// Start a mock exchange populated with [`MockState::standard`]
    pub async fn standard() -> anyhow::Result<Self> {
        MockExchange::start(MockState::standard(), test_credentials()).await
    }
}

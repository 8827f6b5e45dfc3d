/// Market data and account commands rendered end to end

mod utils;

use gdax_sdk::{SdkError, Side};
use gdax_test_utils::fixtures::{fill, open_order};
use gdax_test_utils::MockExchange;
use gdaxcli::{AssumeYes, CliError, Command, Session, SessionOptions};
use utils::session;

fn line_of(output: &str, needle: &str) -> usize {
    output
        .lines()
        .position(|line| line.contains(needle))
        .unwrap_or_else(|| panic!("{:?} not found in:\n{}", needle, output))
}

#[tokio::test]
async fn test_help_needs_no_exchange() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let output = session(&server).run(Command::Help).await.unwrap();
    assert!(output.contains("Usage"));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_products() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let output = session(&server).run(Command::Products).await.unwrap();

    assert_eq!(line_of(&output, "quote_increment"), 0);
    assert!(output.contains("ETH-USD"));
    assert!(output.contains("BTC-GBP"));
    assert_eq!(output.lines().count(), 3);
}

#[tokio::test]
async fn test_ticker_defaults_to_sorted_catalog() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let output = session(&server)
        .run(Command::Ticker { products: vec![] })
        .await
        .unwrap();

    assert!(line_of(&output, "BTC-GBP") < line_of(&output, "ETH-USD"));
    assert!(output.contains("24h_gain"));
    // products + 2 x (ticker + stats)
    assert_eq!(server.request_count(), 5);
}

#[tokio::test]
async fn test_ticker_for_one_product() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let output = session(&server)
        .run(Command::Ticker {
            products: vec!["eth-usd".to_string()],
        })
        .await
        .unwrap();

    let row = output.lines().nth(1).unwrap();
    assert!(row.contains("ETH-USD"));
    assert!(row.contains("123.45"));
    // 24h gain 123.45 - 120.00
    assert!(row.contains("3.4500"));
    assert!(!output.contains("BTC-GBP"));
}

#[tokio::test]
async fn test_ticker_unknown_product_is_exchange_error() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let err = session(&server)
        .run(Command::Ticker {
            products: vec!["doge-usd".to_string()],
        })
        .await
        .unwrap_err();

    assert!(err.is_unexpected());
    assert!(matches!(
        err,
        CliError::Exchange(SdkError::ApiError { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_balance_sorted_by_currency() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let output = session(&server).run(Command::Balance).await.unwrap();

    assert!(line_of(&output, "ETH") < line_of(&output, "USD"));
    let usd = output.lines().nth(line_of(&output, "USD")).unwrap();
    assert!(usd.contains("1000.5000"));
    assert!(usd.contains("900.5000"));
    assert!(usd.contains("100.0000"));
}

#[tokio::test]
async fn test_history_walks_every_page() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let session = Session::new(
        server.client().with_page_limit(1),
        SessionOptions::default(),
        Box::new(AssumeYes),
    );

    let output = session
        .run(Command::History {
            accounts: vec!["usd".to_string()],
        })
        .await
        .unwrap();

    assert!(output.starts_with("Account: USD\n"));
    assert!(output.contains("transfer (deposit)"));
    assert!(output.contains("-123.45"));
    assert!(output.contains("-0.37"));
    assert!(line_of(&output, "transfer") < line_of(&output, "fee"));
    // accounts + 3 single-entry pages
    assert_eq!(server.request_count(), 4);
}

#[tokio::test]
async fn test_history_sections() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let output = session(&server)
        .run(Command::History {
            accounts: vec!["eth".to_string(), "usd".to_string(), "xyz".to_string()],
        })
        .await
        .unwrap();

    assert!(output.starts_with("Account: ETH\nNo history\n\nAccount: USD\n"));
    assert!(!output.contains("XYZ"));

    let output = session(&server)
        .run(Command::History {
            accounts: vec!["xyz".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(output, "No history");
}

#[tokio::test]
async fn test_orders_empty() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let output = session(&server).run(Command::Orders).await.unwrap();
    assert_eq!(output, "No pending orders");
}

#[tokio::test]
async fn test_orders_across_pages() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    server.with_state(|state| {
        state.orders = vec![
            open_order("aaaaaa11-0000-0000-0000-000000000000", "ETH-USD", Side::Buy, "100.00", "1.0"),
            open_order("bbbbbb22-0000-0000-0000-000000000000", "ETH-USD", Side::Sell, "150.00", "2.0"),
            open_order("cccccc33-0000-0000-0000-000000000000", "BTC-GBP", Side::Buy, "1900.00", "0.5"),
        ];
    });
    let session = Session::new(
        server.client().with_page_limit(2),
        SessionOptions::default(),
        Box::new(AssumeYes),
    );

    let output = session.run(Command::Orders).await.unwrap();
    for short in ["aaaaaa", "bbbbbb", "cccccc"] {
        assert!(output.contains(short), "missing {} in\n{}", short, output);
    }
    assert!(!output.contains("aaaaaa11"));
    assert!(output.contains("300.0000"));
    assert_eq!(output.lines().count(), 4);
}

#[tokio::test]
async fn test_fills() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let output = session(&server)
        .run(Command::Fills { product: None })
        .await
        .unwrap();
    assert_eq!(output, "No fills");

    server.with_state(|state| {
        state.fills = vec![
            fill(1, "ETH-USD", Side::Buy, "100.00", "2.00", "0.30"),
            fill(2, "BTC-GBP", Side::Sell, "2000.00", "0.10", "0.0000"),
        ];
    });

    let output = session(&server)
        .run(Command::Fills {
            product: Some("eth-usd".to_string()),
        })
        .await
        .unwrap();
    assert!(output.contains("ETH-USD"));
    assert!(output.contains("200.0000"));
    assert!(!output.contains("BTC-GBP"));

    let output = session(&server)
        .run(Command::Fills { product: None })
        .await
        .unwrap();
    assert_eq!(output.lines().count(), 3);
}

/// Placing orders: price resolution, side checks and confirmation

mod utils;

use gdax_sdk::{OrderType, PlaceOrder, Side};
use gdax_test_utils::MockExchange;
use gdaxcli::session::DECLINED;
use gdaxcli::{CliError, Command, OrderRejection, Session, SessionOptions};
use utils::{order, session_with_prompt, words, ScriptedPrompt};

fn rejection(result: Result<String, CliError>) -> OrderRejection {
    match result {
        Err(CliError::InvalidOrder(rejection)) => rejection,
        other => panic!("expected an invalid order, got {:?}", other),
    }
}

#[tokio::test]
async fn test_limit_buy_below_market() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");

    let output = order(&server, &["limit", "buy", "eth-usd", ".25", "-1"])
        .await
        .expect("Failed to place order");
    assert!(output.starts_with("Placed order "));
    assert!(output.contains("122.45"));

    assert_eq!(
        server.placed_orders(),
        vec![PlaceOrder {
            order_type: OrderType::Limit,
            side: Side::Buy,
            product_id: "ETH-USD".to_string(),
            size: ".25".to_string(),
            price: Some("122.45".to_string()),
            stp: None,
        }]
    );
}

#[tokio::test]
async fn test_limit_sell_above_market() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");

    order(&server, &["limit", "sell", "ETH-USD", "1", "180"])
        .await
        .expect("Failed to place order");
    order(&server, &["limit", "sell", "ETH-USD", "1", "+.5"])
        .await
        .expect("Failed to place order");

    order(&server, &["limit", "sell", "ETH-USD", "1", "+0.55"])
        .await
        .expect("Failed to place order");

    let prices: Vec<Option<String>> = server.placed_orders().into_iter().map(|o| o.price).collect();
    assert_eq!(
        prices,
        vec![
            Some("180".to_string()),
            Some("123.95".to_string()),
            Some("124.00".to_string())
        ]
    );
}

#[tokio::test]
async fn test_buy_at_or_above_market_is_rejected() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");

    for price in ["125", "+1", "123.45"] {
        let result = order(&server, &["limit", "buy", "ETH-USD", "9.3", price]).await;
        assert!(
            matches!(rejection(result), OrderRejection::BuyAtOrAboveMarket { .. }),
            "price {}",
            price
        );
    }

    let result = order(&server, &["limit", "buy", "ETH-USD", "9.3", "+79228162514264337593543950335"]).await;
    assert_eq!(
        rejection(result),
        OrderRejection::InvalidPrice("+79228162514264337593543950335".to_string())
    );

    let result = order(&server, &["limit", "buy", "ETH-USD", "9.3", "125"]).await;
    assert_eq!(
        rejection(result).to_string(),
        "Buying higher than or equal to current price: 125 >= 123.45"
    );
    assert!(server.placed_orders().is_empty());
}

#[tokio::test]
async fn test_sell_at_or_below_market_is_rejected() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");

    // +0.001 and 123.459 are cut to 123.45, the market price itself
    for price in ["120", "123.43", "-.5", "+0.001", "123.459"] {
        let result = order(&server, &["limit", "sell", "ETH-USD", "9.3", price]).await;
        assert!(
            matches!(rejection(result), OrderRejection::SellAtOrBelowMarket { .. }),
            "price {}",
            price
        );
    }
    assert!(server.placed_orders().is_empty());
}

#[tokio::test]
async fn test_market_orders_carry_no_price() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");

    order(&server, &["market", "buy", "eth-usd", "0.1"])
        .await
        .expect("Failed to place order");
    order(&server, &["market", "sell", "btc-gbp", "5", "-2"])
        .await
        .expect("Failed to place order");

    let placed = server.placed_orders();
    assert_eq!(placed.len(), 2);
    assert!(placed.iter().all(|o| o.order_type == OrderType::Market));
    assert!(placed.iter().all(|o| o.price.is_none()));
    assert_eq!(placed[1].product_id, "BTC-GBP");
    assert_eq!(placed[1].side, Side::Sell);
}

#[tokio::test]
async fn test_stop_orders_are_not_implemented() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");

    let result = order(&server, &["stop", "sell", "eth-usd", "1", "100"]).await;
    assert!(matches!(result, Err(CliError::NotImplemented(_))));
    assert!(server.placed_orders().is_empty());
}

#[tokio::test]
async fn test_validation_happens_before_placement() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");

    let cases = [
        (vec!["fok", "buy", "eth-usd", "1", "100"], OrderRejection::UnknownOrderType("fok".to_string())),
        (vec!["limit", "short", "eth-usd", "1", "100"], OrderRejection::UnknownSide("short".to_string())),
        (vec!["limit", "buy", "doge-usd", "1", "100"], OrderRejection::UnknownProduct("doge-usd".to_string())),
        (vec!["limit", "buy", "eth-usd", "many", "100"], OrderRejection::InvalidSize("many".to_string())),
        (vec!["limit", "buy", "eth-usd", "1"], OrderRejection::MissingPrice(OrderType::Limit)),
        (vec!["limit", "buy", "eth-usd", "1", "~100"], OrderRejection::InvalidPrice("~100".to_string())),
    ];
    for (args, expected) in cases {
        assert_eq!(rejection(order(&server, &args).await), expected);
    }
    assert!(server.placed_orders().is_empty());
}

#[tokio::test]
async fn test_self_trade_prevention_is_forwarded() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let options = SessionOptions {
        self_trade_prevention: Some("dc".to_string()),
        ..SessionOptions::default()
    };
    let session = Session::new(server.client(), options, Box::new(gdaxcli::AssumeYes));

    let command = Command::from_order_args(&words(&["limit", "buy", "eth-usd", "1", "-2"])).unwrap();
    session.run(command).await.expect("Failed to place order");

    let placed = server.placed_orders();
    assert_eq!(placed[0].stp.as_deref(), Some("dc"));
    assert_eq!(placed[0].price.as_deref(), Some("121.45"));
    assert_eq!(server.open_orders()[0].stp.as_deref(), Some("dc"));
}

#[tokio::test]
async fn test_declined_confirmation_sends_nothing() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let prompt = ScriptedPrompt::new(false);
    let session = session_with_prompt(&server, prompt.clone());

    let command = Command::from_order_args(&words(&["limit", "buy", "eth-usd", ".25", "-1"])).unwrap();
    let output = session.run(command).await.expect("Declining is not an error");

    assert_eq!(output, DECLINED);
    assert!(server.placed_orders().is_empty());
    assert_eq!(prompt.questions(), vec!["Place limit buy .25 ETH-USD @ 122.45?".to_string()]);
}

#[tokio::test]
async fn test_confirmed_order_is_placed() {
    let server = MockExchange::standard().await.expect("Failed to start mock exchange");
    let prompt = ScriptedPrompt::new(true);
    let session = session_with_prompt(&server, prompt.clone());

    let command = Command::from_order_args(&words(&["market", "buy", "eth-usd", "0.5"])).unwrap();
    session.run(command).await.expect("Failed to place order");

    assert_eq!(server.placed_orders().len(), 1);
    assert_eq!(
        prompt.questions(),
        vec!["Place market buy 0.5 ETH-USD at market (~123.45)?".to_string()]
    );
}

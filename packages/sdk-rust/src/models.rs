//! Typed records for the exchange REST API
//!
//! Numeric fields are kept as the decimal strings the exchange sends, so that
//! callers can truncate them without a float round trip.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
    Stop,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
            OrderType::Stop => "stop",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerEntryKind {
    Transfer,
    Match,
    Fee,
    Rebate,
    Conversion,
    #[serde(other)]
    Other,
}

impl fmt::Display for LedgerEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LedgerEntryKind::Transfer => "transfer",
            LedgerEntryKind::Match => "match",
            LedgerEntryKind::Fee => "fee",
            LedgerEntryKind::Rebate => "rebate",
            LedgerEntryKind::Conversion => "conversion",
            LedgerEntryKind::Other => "other",
        };
        f.write_str(s)
    }
}

// ============================================================================
// MARKET DATA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub base_currency: String,
    pub quote_currency: String,
    #[serde(default)]
    pub base_min_size: Option<String>,
    #[serde(default)]
    pub base_max_size: Option<String>,
    pub quote_increment: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    #[serde(default)]
    pub trade_id: Option<u64>,
    pub price: String,
    pub size: String,
    pub bid: String,
    pub ask: String,
    pub volume: String,
    #[serde(default)]
    pub time: Option<String>,
}

/// 24 hour statistics for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductStats {
    pub open: String,
    pub high: String,
    pub low: String,
    pub volume: String,
    #[serde(default)]
    pub last: Option<String>,
}

// ============================================================================
// ACCOUNT DATA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub currency: String,
    pub balance: String,
    pub available: String,
    pub hold: String,
    #[serde(default)]
    pub profile_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerDetails {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub trade_id: Option<String>,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub transfer_id: Option<String>,
    #[serde(default)]
    pub transfer_type: Option<String>,
}

/// One line of an account's history (ledger)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    pub created_at: String,
    pub amount: String,
    pub balance: String,
    #[serde(rename = "type")]
    pub kind: LedgerEntryKind,
    #[serde(default)]
    pub details: LedgerDetails,
}

// ============================================================================
// ORDERS & FILLS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    pub product_id: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default)]
    pub time_in_force: Option<String>,
    #[serde(default)]
    pub post_only: bool,
    pub created_at: String,
    #[serde(default)]
    pub fill_fees: String,
    #[serde(default)]
    pub filled_size: String,
    #[serde(default)]
    pub executed_value: String,
    pub status: String,
    #[serde(default)]
    pub settled: bool,
    #[serde(default)]
    pub stp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub trade_id: u64,
    pub product_id: String,
    pub price: String,
    pub size: String,
    pub order_id: String,
    pub created_at: String,
    #[serde(default)]
    pub liquidity: Option<String>,
    pub fee: String,
    #[serde(default)]
    pub settled: bool,
    pub side: Side,
}

/// Body of `POST /orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrder {
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Side,
    pub product_id: String,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_order_omits_missing_price() {
        let order = PlaceOrder {
            order_type: OrderType::Market,
            side: Side::Buy,
            product_id: "ETH-USD".to_string(),
            size: "0.1".to_string(),
            price: None,
            stp: None,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "market",
                "side": "buy",
                "product_id": "ETH-USD",
                "size": "0.1",
            })
        );
    }

    #[test]
    fn test_ledger_entry_unknown_kind() {
        let entry: LedgerEntry = serde_json::from_value(serde_json::json!({
            "id": "1",
            "created_at": "2017-06-01T00:00:00Z",
            "amount": "-0.5",
            "balance": "10",
            "type": "something_new",
        }))
        .unwrap();
        assert_eq!(entry.kind, LedgerEntryKind::Other);
        assert_eq!(entry.details, LedgerDetails::default());
    }

    #[test]
    fn test_order_without_price() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "d0c5340b-6d6c-49d9-b567-48c4bfca13d2",
            "product_id": "BTC-USD",
            "side": "sell",
            "type": "market",
            "created_at": "2017-06-01T00:00:00Z",
            "status": "pending",
        }))
        .unwrap();
        assert_eq!(order.price, None);
        assert_eq!(order.order_type, OrderType::Market);
        assert!(!order.settled);
    }
}

//! Order validation and relative price resolution
//!
//! Prices are either absolute (`180.23`) or relative to the current market
//! price (`+5`, `-1.5`). All price arithmetic is exact decimal so a relative
//! limit never drifts from what the user typed.

use crate::command::OrderArgs;
use crate::error::{CliResult, OrderRejection};
use gdax_sdk::{truncate, OrderType, Side};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Fractional digits kept on a limit price
pub const PRICE_DIGITS: usize = 2;

/// An order that passed validation, ready to be priced and placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub order_type: OrderType,
    pub side: Side,
    pub product_id: String,
    pub size: String,
    /// Raw price token, absent for market orders
    pub price: Option<String>,
}

/// Absolute price to send plus its signed distance from the market
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrice {
    pub price: String,
    pub delta: Decimal,
}

/// Parse a plain decimal, accepting a bare leading dot (`.25`)
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let normalized = match s.strip_prefix('.') {
        Some(rest) => format!("0.{}", rest),
        None => s.to_string(),
    };
    Decimal::from_str(&normalized).ok()
}

pub fn parse_order_type(token: &str) -> Result<OrderType, OrderRejection> {
    match token {
        "market" => Ok(OrderType::Market),
        "limit" => Ok(OrderType::Limit),
        "stop" => Ok(OrderType::Stop),
        other => Err(OrderRejection::UnknownOrderType(other.to_string())),
    }
}

pub fn parse_side(token: &str) -> Result<Side, OrderRejection> {
    match token {
        "buy" => Ok(Side::Buy),
        "sell" => Ok(Side::Sell),
        other => Err(OrderRejection::UnknownSide(other.to_string())),
    }
}

/// Check the raw order arguments against the product catalog
///
/// The product is matched case-insensitively and returned upper-cased. The
/// price of a market order is ignored.
pub fn validate_order(args: &OrderArgs, product_ids: &[String]) -> CliResult<OrderRequest> {
    let order_type = parse_order_type(&args.order_type)?;
    let side = parse_side(&args.side)?;

    let product_id = args.product.to_uppercase();
    if !product_ids.iter().any(|id| *id == product_id) {
        return Err(OrderRejection::UnknownProduct(args.product.clone()).into());
    }

    if parse_decimal(&args.size).is_none() {
        return Err(OrderRejection::InvalidSize(args.size.clone()).into());
    }

    let price = match order_type {
        OrderType::Market => None,
        OrderType::Limit | OrderType::Stop => {
            let price = args
                .price
                .as_deref()
                .filter(|p| !p.is_empty())
                .ok_or(OrderRejection::MissingPrice(order_type))?;
            if !price.starts_with(|c: char| c.is_ascii_digit() || c == '+' || c == '-') {
                return Err(OrderRejection::InvalidPrice(price.to_string()).into());
            }
            Some(price.to_string())
        }
    };

    Ok(OrderRequest {
        order_type,
        side,
        product_id,
        size: args.size.clone(),
        price,
    })
}

/// Turn a price token into an absolute price given the current market price
pub fn resolve_price(token: &str, current: Decimal) -> Result<ResolvedPrice, OrderRejection> {
    let invalid = || OrderRejection::InvalidPrice(token.to_string());
    let first = token.chars().next().ok_or_else(invalid)?;

    if first.is_ascii_digit() {
        let value = parse_decimal(token).ok_or_else(invalid)?;
        return Ok(ResolvedPrice {
            price: truncate(token, PRICE_DIGITS).to_string(),
            delta: value - current,
        });
    }

    let magnitude = match first {
        '+' | '-' => parse_decimal(&token[1..]).ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };
    if magnitude.is_sign_negative() {
        return Err(invalid());
    }

    let delta = if first == '-' { -magnitude } else { magnitude };
    let absolute = current.checked_add(delta).ok_or_else(invalid)?.to_string();
    Ok(ResolvedPrice {
        price: truncate(&absolute, PRICE_DIGITS).to_string(),
        delta,
    })
}

/// A limit buy must sit below the market and a limit sell above it
///
/// The truncated price that would be sent is compared, not the token's delta.
pub fn check_limit_price(
    side: Side,
    resolved: &ResolvedPrice,
    current: Decimal,
) -> Result<(), OrderRejection> {
    let price = parse_decimal(&resolved.price)
        .ok_or_else(|| OrderRejection::InvalidPrice(resolved.price.clone()))?;
    match side {
        Side::Buy if price >= current => Err(OrderRejection::BuyAtOrAboveMarket {
            price: resolved.price.clone(),
            market: current.to_string(),
        }),
        Side::Sell if price <= current => {
            Err(OrderRejection::SellAtOrBelowMarket {
                price: resolved.price.clone(),
                market: current.to_string(),
            })
        }
        _ => Ok(()),
    }
}

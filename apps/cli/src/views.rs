//! One row builder per command
//!
//! Amounts that come from the exchange are truncated to the display accuracy,
//! never rounded. Values computed here (spreads, gains, notional sizes) are
//! formatted as fixed-point.

use crate::table::{Palette, Row};
use gdax_sdk::{
    format_float, is_str_zero, parse_f64, truncate, Account, Fill, LedgerEntry, LedgerEntryKind,
    Order, Product, ProductStats, Side, Ticker,
};

/// Characters of an order id shown in tables; enough to cancel by prefix
pub const SHORT_ID_LEN: usize = 6;

pub const NO_ORDERS: &str = "No pending orders";
pub const NO_FILLS: &str = "No fills";
pub const NO_HISTORY: &str = "No history";

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

pub fn product_row(product: &Product) -> Row {
    Row::new()
        .text("id", &product.id)
        .text("base_currency", &product.base_currency)
        .text("quote_currency", &product.quote_currency)
        .number("base_min_size", product.base_min_size.as_deref().unwrap_or(""))
        .number("base_max_size", product.base_max_size.as_deref().unwrap_or(""))
        .number("quote_increment", &product.quote_increment)
}

pub fn ticker_row(
    product_id: &str,
    ticker: &Ticker,
    stats: &ProductStats,
    palette: Palette,
    accuracy: usize,
) -> Row {
    let price = parse_f64(&ticker.price);
    let open = parse_f64(&stats.open);
    let gap = parse_f64(&ticker.ask) - parse_f64(&ticker.bid);
    let gain = price - open;
    let gain_perc = if open == 0.0 { 0.0 } else { gain / open * 100.0 };

    Row::new()
        .text("product_id", product_id)
        .number("price", truncate(&ticker.price, accuracy))
        .number("size", truncate(&ticker.size, accuracy))
        .number("bid", truncate(&ticker.bid, accuracy))
        .number("ask", truncate(&ticker.ask, accuracy))
        .number("gap", format_float(gap, accuracy))
        .number("24h_volume", truncate(&ticker.volume, accuracy))
        .number("24h_open", truncate(&stats.open, accuracy))
        .number("24h_high", truncate(&stats.high, accuracy))
        .number("24h_low", truncate(&stats.low, accuracy))
        .number(
            "24h_gain",
            palette.colorize(&format_float(gain, accuracy), gain >= 0.0),
        )
        .number(
            "perc",
            palette.colorize(&format_float(gain_perc, 2), gain_perc >= 0.0),
        )
}

/// Accounts sorted by currency
pub fn balance_rows(accounts: &[Account], palette: Palette, accuracy: usize) -> Vec<Row> {
    let mut accounts: Vec<&Account> = accounts.iter().collect();
    accounts.sort_by(|a, b| a.currency.cmp(&b.currency));

    accounts
        .into_iter()
        .map(|account| {
            let hold = truncate(&account.hold, accuracy);
            let hold = if is_str_zero(&account.hold) {
                hold.to_string()
            } else {
                palette.red(hold)
            };
            Row::new()
                .text("currency", &account.currency)
                .number("balance", truncate(&account.balance, accuracy))
                .number("available", truncate(&account.available, accuracy))
                .number("hold", hold)
        })
        .collect()
}

pub fn history_row(entry: &LedgerEntry, palette: Palette, accuracy: usize) -> Row {
    let amount = parse_f64(&entry.amount);
    let (kind, product_id, good) = match entry.kind {
        LedgerEntryKind::Transfer => {
            let transfer_type = entry.details.transfer_type.as_deref().unwrap_or("unknown");
            (
                format!("transfer ({})", transfer_type),
                "",
                transfer_type == "deposit",
            )
        }
        LedgerEntryKind::Match => (
            entry.kind.to_string(),
            entry.details.product_id.as_deref().unwrap_or(""),
            amount >= 0.0,
        ),
        LedgerEntryKind::Fee => (entry.kind.to_string(), "", false),
        LedgerEntryKind::Rebate => (entry.kind.to_string(), "", true),
        LedgerEntryKind::Conversion | LedgerEntryKind::Other => {
            (entry.kind.to_string(), "", amount >= 0.0)
        }
    };

    Row::new()
        .text("type", palette.colorize(&kind, good))
        .number(
            "amount",
            palette.colorize(truncate(&entry.amount, accuracy), good),
        )
        .number("balance", truncate(&entry.balance, accuracy))
        .text("product_id", product_id)
        .text("created_at", &entry.created_at)
}

pub fn order_row(order: &Order, palette: Palette, accuracy: usize) -> Row {
    let price = order.price.as_deref().unwrap_or("");
    let size = order.size.as_deref().unwrap_or("");
    let size_usd = parse_f64(size) * parse_f64(price);

    let fill_fees = truncate(&order.fill_fees, accuracy);
    let fill_fees = if is_str_zero(&order.fill_fees) {
        fill_fees.to_string()
    } else {
        palette.red(fill_fees)
    };
    let settled = if order.settled {
        "yes".to_string()
    } else {
        palette.red("no")
    };

    Row::new()
        .text("id", short_id(&order.id))
        .text("product_id", &order.product_id)
        .text("side", palette.colorize(order.side.as_str(), order.side == Side::Buy))
        .text("type", order.order_type.as_str())
        .number("price", truncate(price, accuracy))
        .number("size", truncate(size, accuracy))
        .number("size_usd", format_float(size_usd, accuracy))
        .number("filled_size", truncate(&order.filled_size, accuracy))
        .number("fill_fees", fill_fees)
        .text("status", palette.colorize_by(&order.status, |s| s == "open"))
        .text("time_in_force", order.time_in_force.as_deref().unwrap_or(""))
        .text("settled", settled)
        .text("stp", order.stp.as_deref().unwrap_or(""))
        .text("created_at", &order.created_at)
}

pub fn fill_row(fill: &Fill, palette: Palette, accuracy: usize) -> Row {
    let size_usd = parse_f64(&fill.size) * parse_f64(&fill.price);
    let fee = truncate(&fill.fee, accuracy);
    let fee = if is_str_zero(&fill.fee) {
        fee.to_string()
    } else {
        palette.red(fee)
    };

    let settled = if fill.settled {
        "yes".to_string()
    } else {
        palette.red("no")
    };

    Row::new()
        .text("product_id", &fill.product_id)
        .text("side", palette.colorize(fill.side.as_str(), fill.side == Side::Buy))
        .number("price", truncate(&fill.price, accuracy))
        .number("size", truncate(&fill.size, accuracy))
        .number("size_usd", format_float(size_usd, accuracy))
        .number("fee", fee)
        .text("settled", settled)
        .text("created_at", &fill.created_at)
}

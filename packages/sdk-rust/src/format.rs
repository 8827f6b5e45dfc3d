//! Formatting utilities for the decimal strings returned by the exchange
//!
//! Balances are truncated, never rounded: rounding 0.1111115 up to 0.111112
//! would show more than the account holds and an "everything" sell would be
//! rejected.

/// Default number of fractional digits used for display
pub const DEFAULT_ACCURACY: usize = 4;

/// Truncate a decimal string to `digits` fractional digits without rounding
///
/// Strings without a decimal point, or with fewer fractional digits than
/// requested, come back unchanged. No zero padding is added. With
/// `digits == 0` the integer part is returned without the trailing dot.
///
/// # Example
/// ```
/// use gdax_sdk::truncate;
/// assert_eq!(truncate("1234.5678", 2), "1234.56");
/// assert_eq!(truncate("1234.5678", 4), "1234.5678");
/// assert_eq!(truncate("1234", 2), "1234");
/// assert_eq!(truncate("1234.5678", 0), "1234");
/// ```
pub fn truncate(s: &str, digits: usize) -> &str {
    match s.find('.') {
        Some(dot) if digits == 0 => &s[..dot],
        Some(dot) => {
            let end = dot.saturating_add(digits).saturating_add(1).min(s.len());
            &s[..end]
        }
        None => s,
    }
}

/// Format a value as fixed-point with `accuracy` fractional digits
///
/// # Example
/// ```
/// use gdax_sdk::format_float;
/// assert_eq!(format_float(1.5, 4), "1.5000");
/// assert_eq!(format_float(-0.12345, 2), "-0.12");
/// ```
pub fn format_float(value: f64, accuracy: usize) -> String {
    format!("{:.prec$}", value, prec = accuracy)
}

/// Parse a decimal string, treating garbage as zero
///
/// Only used for display arithmetic such as spreads and notional values.
pub fn parse_f64(s: &str) -> f64 {
    s.trim().parse().unwrap_or(0.0)
}

/// Returns true if every digit in `s` is zero
///
/// # Example
/// ```
/// use gdax_sdk::is_str_zero;
/// assert!(is_str_zero("0.0000000000000000"));
/// assert!(!is_str_zero("0.0000000100000000"));
/// ```
pub fn is_str_zero(s: &str) -> bool {
    s.chars().filter(|c| c.is_ascii_digit()).all(|c| c == '0')
}

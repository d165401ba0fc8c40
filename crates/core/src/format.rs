//! Display projections for domain values.
//!
//! Every function here is total: malformed input produces a fixed fallback
//! string or zero, never an error or a panic.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::types::cart::CartItem;
use crate::types::price::{CURRENCY_SYMBOL, Price};
use crate::types::product::Product;
use crate::types::status::OrderStatus;

/// Shown in place of a date that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

/// Format an amount as `Rs. 1,234`.
///
/// Rounds half up to a whole unit and groups thousands with commas.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    // Near the upper bound there is no fractional part left to round.
    let rounded = amount
        .checked_add(Decimal::new(5, 1))
        .map_or_else(|| amount.trunc(), |shifted| shifted.floor());
    let units = rounded.to_i128().unwrap_or_default();
    let sign = if units < 0 { "-" } else { "" };
    format!(
        "{CURRENCY_SYMBOL} {sign}{}",
        group_thousands(&units.unsigned_abs().to_string())
    )
}

/// Format an untyped JSON value as a price.
///
/// Anything that is not a finite JSON number formats as zero.
#[must_use]
pub fn format_price_value(value: &serde_json::Value) -> String {
    let amount = value
        .as_f64()
        .and_then(Decimal::from_f64)
        .unwrap_or_default();
    format_price(amount)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a backend timestamp or date as `Mon D, YYYY`.
///
/// Accepts RFC 3339, naive ISO date-times (with `T` or a space) and plain
/// `YYYY-MM-DD` dates. Anything else yields [`INVALID_DATE`].
#[must_use]
pub fn format_date(input: &str) -> String {
    parse_date(input.trim()).map_or_else(|| INVALID_DATE.to_string(), format_naive_date)
}

/// Format a calendar date as `Mon D, YYYY`.
#[must_use]
pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Sum of `price * quantity` over all items.
///
/// Items missing a product or a quantity contribute zero.
#[must_use]
pub fn calculate_cart_total(items: &[CartItem]) -> Price {
    items.iter().map(CartItem::subtotal).sum()
}

/// Sum of quantities over all items, missing quantities counting as zero.
#[must_use]
pub fn calculate_cart_items_count(items: &[CartItem]) -> u64 {
    items
        .iter()
        .map(|item| u64::from(item.quantity.unwrap_or(0)))
        .sum()
}

/// Display label for a backend order status string.
///
/// Known statuses are capitalized, unknown ones pass through unchanged and
/// an empty status reads `Unknown`.
#[must_use]
pub fn format_order_status(status: &str) -> String {
    OrderStatus::parse(status).label().to_string()
}

/// Stock label for a product card, `Unknown` when there is no product.
#[must_use]
pub fn stock_label(product: Option<&Product>) -> &'static str {
    product.map_or("Unknown", |p| p.stock_status().label())
}

/// Cut `text` to `max_chars` characters, appending `...` when shortened.
#[must_use]
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", text.get(..idx).unwrap_or(text)),
        None => text.to_string(),
    }
}

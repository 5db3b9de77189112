//! Money helpers using rust_decimal for precision
//!
//! Piece rates are stored as JSON numbers but held as `Decimal` in memory,
//! so pay totals add up exactly no matter how many lines are summed.
//! Rounding happens only when an amount is rendered.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
pub const DECIMAL_PLACES: u32 = 2;

/// Pay for a piece count at a per-piece rate (exact, unrounded)
#[inline]
pub fn line_amount(pieces: i64, rate: Decimal) -> Decimal {
    Decimal::from(pieces) * rate
}

/// Round to 2 decimal places, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount with exactly two decimals, e.g. `125.00`
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(DECIMAL_PLACES);
    rounded.to_string()
}

/// Render an amount with thousands separators, e.g. `12,345.50`
pub fn format_amount_grouped(value: Decimal) -> String {
    let plain = format_amount(value);
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Render a piece count with thousands separators, e.g. `1,250`
pub fn format_count_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

//! Money display helpers.
//!
//! Amounts stay `Decimal` at full precision everywhere. Rounding to two
//! places happens here, at display time only.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a monetary amount: two decimal places, grouped thousands, symbol prefix.
///
/// `format_amount(dec!(-1234.5), "$")` gives `-$1,234.50`.
#[must_use]
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let rounded = round_for_display(amount);
    let digits = format!("{:.2}", rounded.abs());
    format!("{}{symbol}{}", sign(rounded), group_digits(&digits))
}

/// Formats a non-monetary quantity: grouped thousands, no symbol, no trailing zeros.
#[must_use]
pub fn format_plain(amount: Decimal) -> String {
    let rounded = round_for_display(amount);
    let digits = rounded.abs().normalize().to_string();
    format!("{}{}", sign(rounded), group_digits(&digits))
}

/// Chooses currency or plain formatting for a chart value.
#[must_use]
pub fn display_value(amount: Decimal, is_monetary: bool, symbol: &str) -> String {
    if is_monetary {
        format_amount(amount, symbol)
    } else {
        format_plain(amount)
    }
}

fn round_for_display(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn sign(rounded: Decimal) -> &'static str {
    if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    }
}

fn group_digits(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}

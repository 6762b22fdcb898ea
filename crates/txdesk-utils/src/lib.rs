//! Display helpers for amounts and numbers

use rust_decimal::{Decimal, RoundingStrategy};
use txdesk_config::{CurrencyConfig, SymbolPosition};

/// Format a number with thousands separators
///
/// Works on anything whose `to_string()` is an optionally signed run of
/// digits, e.g. integers.
pub fn format_number<T: ToString>(n: T, separator: &str) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let mut result = String::with_capacity(s.len() + s.len() / 3 * separator.len());
    result.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }
    result
}

/// Round to `places` decimals (half away from zero) and group thousands
pub fn format_decimal(value: Decimal, places: u32, thousands_sep: &str, decimal_sep: &str) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", places as usize, rounded.abs());

    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&format_number(integer, thousands_sep));
    if let Some(fraction) = fraction {
        out.push_str(decimal_sep);
        out.push_str(fraction);
    }
    out
}

/// Format an amount for display using the configured currency
pub fn format_currency(value: Decimal, currency: &CurrencyConfig) -> String {
    let rounded = value.round_dp_with_strategy(currency.decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let number = format_decimal(
        rounded.abs(),
        currency.decimal_places,
        &currency.thousands_separator,
        &currency.decimal_separator,
    );
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    match currency.symbol_position {
        SymbolPosition::Before => format!("{}{}{}", sign, currency.symbol, number),
        SymbolPosition::After => format!("{}{} {}", sign, number, currency.symbol),
    }
}

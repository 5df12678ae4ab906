//! Display formatting for money and percentages.

use crate::config::DisplayConfig;
use rust_decimal::Decimal;

/// Format a money value, e.g. `Rp 1,234,500.00`.
pub fn format_currency(value: Decimal, display: &DisplayConfig) -> String {
    let dp = display.decimal_places as usize;
    let rounded = value.round_dp(display.decimal_places).abs();
    let text = format!("{:.*}", dp, rounded);

    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut amount = group_digits(int_part, display.thousands_separator);
    if let Some(frac) = frac_part {
        amount.push('.');
        amount.push_str(frac);
    }

    let sign = if value.round_dp(display.decimal_places).is_sign_negative()
        && !rounded.is_zero()
    {
        "-"
    } else {
        ""
    };

    if display.currency_symbol.is_empty() {
        format!("{sign}{amount}")
    } else {
        format!("{sign}{} {amount}", display.currency_symbol)
    }
}

/// Format a value that is already in percent, e.g. `18.63%`.
pub fn format_percent(value: Decimal, decimals: u32) -> String {
    format!("{:.*}%", decimals as usize, value.round_dp(decimals))
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

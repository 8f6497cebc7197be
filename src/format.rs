/// presentation formatting for amounts and percentages
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// locale-style currency layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: Option<char>,
    pub decimal_separator: char,
    pub precision: u32,
    /// "1.234,56 €" instead of "€1.234,56"
    pub symbol_after: bool,
}

impl CurrencyFormat {
    pub fn us() -> Self {
        Self {
            symbol: "$".to_string(),
            thousands_separator: Some(','),
            decimal_separator: '.',
            precision: 2,
            symbol_after: false,
        }
    }

    pub fn euro() -> Self {
        Self {
            symbol: "€".to_string(),
            thousands_separator: Some('.'),
            decimal_separator: ',',
            precision: 2,
            symbol_after: true,
        }
    }

    pub fn format(&self, amount: Money) -> String {
        format_currency(amount, self)
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::us()
    }
}

/// format an amount, rounding half away from zero
pub fn format_currency(amount: Money, format: &CurrencyFormat) -> String {
    let rounded = round_half_away(amount.as_decimal(), format.precision);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format_number(
        rounded.abs(),
        format.precision,
        format.thousands_separator,
        format.decimal_separator,
    );
    let sign = if negative { "-" } else { "" };

    if format.symbol_after {
        format!("{sign}{digits} {}", format.symbol)
    } else {
        format!("{sign}{}{digits}", format.symbol)
    }
}

/// percentage value (53.7 for 53.7%) with a trailing percent sign
pub fn format_percent(value: Decimal, precision: u32) -> String {
    format!("{}%", format_number(value, precision, None, '.'))
}

pub fn format_number(
    value: Decimal,
    precision: u32,
    thousands: Option<char>,
    decimal_separator: char,
) -> String {
    let rounded = round_half_away(value, precision);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", precision as usize, rounded.abs());

    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + whole.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    match thousands {
        Some(separator) => out.push_str(&group_digits(whole, separator)),
        None => out.push_str(whole),
    }
    if let Some(fraction) = fraction {
        out.push(decimal_separator);
        out.push_str(fraction);
    }
    out
}

fn round_half_away(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

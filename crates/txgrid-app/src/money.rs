// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("invalid amount")]
    Invalid,
    #[error("amount out of range")]
    OutOfRange,
}

/// Parses a signed amount such as `-1,234.5` or `$12` into cents.
pub fn parse_amount_cents(input: &str) -> Result<i64, MoneyError> {
    let clean = input.trim().replace(',', "");
    let (negative, rest) = match clean.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, clean.as_str()),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest);
    if rest.is_empty() {
        return Err(MoneyError::Invalid);
    }

    let parts = rest.split('.').collect::<Vec<_>>();
    if parts.len() > 2 {
        return Err(MoneyError::Invalid);
    }

    let whole = parse_digits(parts[0], parts.len() == 2)?;
    let mut frac = 0i64;
    if parts.len() == 2 {
        if parts[1].len() > 2 {
            return Err(MoneyError::Invalid);
        }
        frac = parse_digits(parts[1], false)?;
        if parts[1].len() == 1 {
            frac *= 10;
        }
    }

    let cents = whole
        .checked_mul(100)
        .and_then(|value| value.checked_add(frac))
        .ok_or(MoneyError::OutOfRange)?;
    Ok(if negative { -cents } else { cents })
}

/// Converts a wire amount (a JSON number with at most two decimals) to cents.
pub fn amount_to_cents(amount: f64) -> Result<i64, MoneyError> {
    if !amount.is_finite() {
        return Err(MoneyError::Invalid);
    }
    let cents = (amount * 100.0).round();
    if cents.abs() >= 9.0e15 {
        return Err(MoneyError::OutOfRange);
    }
    Ok(cents as i64)
}

pub fn cents_to_amount(cents: i64) -> f64 {
    cents as f64 / 100.0
}

pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!(
        "{sign}{}.{:02}",
        comma_format(magnitude / 100),
        magnitude % 100
    )
}

fn parse_digits(input: &str, allow_empty: bool) -> Result<i64, MoneyError> {
    if input.is_empty() {
        if allow_empty {
            return Ok(0);
        }
        return Err(MoneyError::Invalid);
    }
    if !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(MoneyError::Invalid);
    }
    input.parse::<i64>().map_err(|_| MoneyError::OutOfRange)
}

fn comma_format(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{MoneyError, amount_to_cents, format_amount, parse_amount_cents};
    use std::collections::BTreeMap;

    #[test]
    fn parse_amount_cents_accepts_signed_and_grouped_values() {
        let cases = BTreeMap::from([
            ("100", 10_000),
            ("100.5", 10_050),
            ("-100.05", -10_005),
            ("$1,234.56", 123_456),
            ("-$3", -300),
            (".75", 75),
            (" 0.99 ", 99),
        ]);
        for (input, expected) in cases {
            assert_eq!(parse_amount_cents(input), Ok(expected), "input {input}");
        }
    }

    #[test]
    fn parse_amount_cents_rejects_garbage() {
        for input in ["", "-", "12.345", "abc", "1.2.3", "1.", "--5"] {
            assert_eq!(
                parse_amount_cents(input),
                Err(MoneyError::Invalid),
                "input {input}"
            );
        }
    }

    #[test]
    fn wire_amounts_round_to_cents() {
        assert_eq!(amount_to_cents(12.34), Ok(1_234));
        assert_eq!(amount_to_cents(-999.99), Ok(-99_999));
        assert_eq!(amount_to_cents(0.1 + 0.2), Ok(30));
        assert_eq!(amount_to_cents(f64::NAN), Err(MoneyError::Invalid));
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(0), "0.00");
        assert_eq!(format_amount(5), "0.05");
        assert_eq!(format_amount(-123_456), "-1,234.56");
        assert_eq!(format_amount(100_000_000), "1,000,000.00");
    }
}

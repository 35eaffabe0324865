//! Exact conversions between whole tokens and smallest units
//!
//! All arithmetic is integer; nothing here ever goes through `f64`.

use crate::error::TokenError;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const SOL_DECIMALS: u8 = 9;

/// `amount × 10^decimals`, checked against the `u64` token amount range.
pub fn smallest_units(amount: u64, decimals: u8) -> Result<u64, TokenError> {
    let overflow = || TokenError::AmountOverflow { amount, decimals };

    let scale = 10u128.checked_pow(u32::from(decimals)).ok_or_else(overflow)?;
    let raw = u128::from(amount).checked_mul(scale).ok_or_else(overflow)?;
    u64::try_from(raw).map_err(|_| overflow())
}

/// Render a raw amount as a decimal string, trimming trailing zeros.
pub fn format_units(raw: u64, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }

    let digits = format!("{:0>width$}", raw, width = usize::from(decimals) + 1);
    let (whole, fraction) = digits.split_at(digits.len() - usize::from(decimals));
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Parse a decimal string such as `"1.5"` into raw units.
pub fn parse_ui_amount(value: &str, decimals: u8) -> Result<u64, TokenError> {
    let invalid = || TokenError::InvalidAmount(value.to_string());
    let trimmed = value.trim();

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if fraction.len() > usize::from(decimals) {
        return Err(TokenError::InvalidAmount(format!(
            "{} has more than {} decimal places",
            value, decimals
        )));
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let padded = format!("{:0<width$}", fraction, width = usize::from(decimals));
    let fraction: u64 = if padded.is_empty() {
        0
    } else {
        padded.parse().map_err(|_| invalid())?
    };

    smallest_units(whole, decimals)?
        .checked_add(fraction)
        .ok_or_else(invalid)
}

/// Lamports as SOL with all nine decimals, e.g. `2.000000000`
pub fn format_sol(lamports: u64) -> String {
    format!(
        "{}.{:09}",
        lamports / LAMPORTS_PER_SOL,
        lamports % LAMPORTS_PER_SOL
    )
}

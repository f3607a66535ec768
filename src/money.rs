use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::CurrencySettings;
use crate::error::{PayoutError, Result};

/// Add up `values`, failing instead of panicking past `Decimal::MAX`
pub fn checked_sum<I>(values: I) -> Result<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or(PayoutError::AmountOverflow)
}

/// Format an amount with thousands separators, e.g. "205,000 FCFA"
pub fn format_money(value: Decimal, currency: &CurrencySettings) -> String {
    format!("{} {}", format_grouped(value, currency.decimals), currency.symbol)
}

/// Round to `decimals` places and group the whole part by thousands
pub fn format_grouped(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded.abs());
    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.insert(0, '-');
    }
    if let Some(frac) = frac {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

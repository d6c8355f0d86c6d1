//! Dollar formatting for the messages shown to API clients.

use std::{borrow::Borrow, sync::OnceLock};

use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Format `amount` as dollars and cents with thousands separators, e.g. "$1,234.50".
///
/// The amount is rounded to the nearest cent, with halves rounded away from zero.
/// Accepts both `Decimal` and `&Decimal` so it can be called directly on
/// borrowed struct fields.
pub fn format_currency(amount: impl Borrow<Decimal>) -> String {
    let amount = amount
        .borrow()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let magnitude = amount.abs();
    let dollars = magnitude.trunc();
    let cents = ((magnitude - dollars) * Decimal::ONE_HUNDRED)
        .to_u8()
        .unwrap_or_default();

    format!("{}{}.{cents:02}", sign(amount), format_dollars(dollars))
}

/// Format `amount` as whole dollars with thousands separators, e.g. "$10,000".
pub fn format_currency_rounded(amount: impl Borrow<Decimal>) -> String {
    let amount = amount
        .borrow()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    format!("{}{}", sign(amount), format_dollars(amount.abs()))
}

fn sign(amount: Decimal) -> &'static str {
    if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    }
}

/// Format a non-negative whole number of dollars.
fn format_dollars(dollars: Decimal) -> String {
    static DOLLAR_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let formatter = DOLLAR_FMT.get_or_init(|| match Formatter::currency("$") {
        Ok(formatter) => Some(formatter.precision(Precision::Decimals(0))),
        Err(error) => {
            tracing::error!("could not create currency formatter: {error:?}");
            None
        }
    });

    match (formatter, dollars.to_f64()) {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        (Some(_), _) if dollars.is_zero() => "$0".to_owned(),
        (Some(formatter), Some(value)) => formatter.fmt_string(value),
        _ => format!("${dollars}"),
    }
}

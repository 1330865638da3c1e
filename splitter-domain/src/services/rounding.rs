//! Cent rounding for balance maps.
//!
//! Every balance is rounded on its own, half away from zero. Nothing is
//! redistributed afterwards, so a member's rounded balance is always their exact
//! balance rounded. The price is a small drift in the total: with `n` balances
//! the rounded map sums to at most `n * 0.005` away from zero, e.g. 100 paid by
//! one member and split between six others rounds to a total of -0.02.

use crate::model::{BalanceMap, Money};
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of the currency's atomic unit.
pub const CENT_SCALE: u32 = 2;

/// 0.005 -> 0.01, -0.005 -> -0.01.
pub fn round_half_away_from_zero(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds every exact balance to cents independently. Key order is preserved.
pub fn round_balances<'a>(exact: &BalanceMap<'a>) -> BalanceMap<'a> {
    let rounded: BalanceMap<'a> = exact
        .iter()
        .map(|(member, balance)| (member, balance.round_to_cents()))
        .collect();

    let drift = rounded.total();
    if !drift.is_settled() {
        tracing::debug!(
            member_count = rounded.len(),
            drift = %drift,
            "Rounded balances drift beyond one cent"
        );
    }
    rounded
}

/// Largest distance from zero the total of `member_count` independently rounded
/// balances can reach.
pub fn max_rounding_drift(member_count: usize) -> Money {
    let half_cent = Money::new(5, CENT_SCALE + 1);
    Money::from_decimal(half_cent.as_decimal() * Decimal::from(member_count))
}

// Shared math helpers for the custody ledger contracts

use cosmwasm_std::{StdError, StdResult, Uint128};

/// Apply a fixed rate to an amount, rounding down.
/// Intermediate product is computed in 256 bits, so large balances don't overflow.
pub fn apply_rate(amount: Uint128, numerator: u64, denominator: u64) -> StdResult<Uint128> {
    amount
        .checked_multiply_ratio(numerator, denominator)
        .map_err(|err| StdError::generic_err(format!("rate {numerator}/{denominator}: {err}")))
}

/// Check if a full period has passed since `since`
pub fn period_elapsed(now: u64, since: u64, period: u64) -> bool {
    match since.checked_add(period) {
        Some(due) => now >= due,
        None => false,
    }
}

/// Seconds left until `since + period`, or None once it has elapsed
pub fn time_remaining(now: u64, since: u64, period: u64) -> Option<u64> {
    if period_elapsed(now, since, period) {
        return None;
    }
    Some(since.saturating_add(period).saturating_sub(now))
}

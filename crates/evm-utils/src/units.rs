use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::U256;

/// Decimals of the native currency.
pub const ETHER_DECIMALS: u32 = 18;

const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

fn pow10(exp: u32) -> U256 {
    (0..exp).fold(U256::from(1u64), |acc, _| acc * U256::from(10u64))
}

/// Convert a decimal ether amount into minor units.
///
/// Negative amounts and amounts with more than 18 fractional digits are rejected.
pub fn parse_ether(amount: Decimal) -> crate::Result<U256> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(crate::Error::Amount(format!("negative amount `{amount}`")));
    }
    let amount = amount.normalize();
    let scale = amount.scale();
    if scale > ETHER_DECIMALS {
        return Err(crate::Error::Amount(format!(
            "`{amount}` has more than {ETHER_DECIMALS} decimal places"
        )));
    }
    let mantissa = u128::try_from(amount.mantissa().unsigned_abs())
        .map_err(|_| crate::Error::Amount(format!("`{amount}` is out of range")))?;
    U256::from(mantissa)
        .checked_mul(pow10(ETHER_DECIMALS - scale))
        .ok_or_else(|| crate::Error::Amount(format!("`{amount}` is out of range")))
}

/// Parse a decimal string such as `"25"` or `"0.5"` into minor units.
pub fn parse_ether_str(amount: &str) -> crate::Result<U256> {
    let amount = Decimal::from_str(amount.trim())
        .map_err(|err| crate::Error::Amount(format!("`{amount}`: {err}")))?;
    parse_ether(amount)
}

/// Format minor units as an exact decimal ether string without trailing zeros.
pub fn format_ether(value: U256) -> String {
    let unit = U256::from(WEI_PER_ETHER);
    let whole = value / unit;
    let frac = value % unit;
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac = format!("{:0>18}", frac.to_string());
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

/// Convert minor units into a [`Decimal`] ether amount.
///
/// Returns `None` if the amount does not fit into a [`Decimal`].
pub fn to_decimal_ether(value: U256) -> Option<Decimal> {
    Decimal::from_str(&format_ether(value)).ok()
}

/// Format minor units rounded to `dp` decimal places, e.g. `"12.50"`.
pub fn format_ether_rounded(value: U256, dp: u32) -> String {
    match to_decimal_ether(value) {
        Some(amount) => {
            let rounded =
                amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.prec$}", prec = dp as usize)
        }
        None => format_ether(value),
    }
}

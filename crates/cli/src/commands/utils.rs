use fandraft_sdk::{
    evm_utils::{Chain, U256},
    types::format_amount,
};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Where a view reads its data from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Source {
    /// The draft contract.
    #[default]
    Ledger,
    /// The mock REST API.
    Api,
}

/// Ask for confirmation unless `yes` is set.
pub(crate) fn confirm(prompt: impl Into<String>, yes: bool) -> eyre::Result<bool> {
    if yes {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    if !confirmed {
        tracing::info!("Cancelled");
    }
    Ok(confirmed)
}

/// Format a unix timestamp as RFC 3339, falling back to the raw number.
pub(crate) fn format_timestamp(ts: u64) -> String {
    i64::try_from(ts)
        .ok()
        .and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok())
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| ts.to_string())
}

/// Format minor units in the native currency of `chain`, e.g. `"25.00 CHZ"`.
pub(crate) fn format_native(value: U256, chain: &Chain) -> String {
    format!("{} {}", format_amount(value), chain.params().currency_symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps() {
        assert_eq!(format_timestamp(0), "1970-01-01T00:00:00Z");
        assert_eq!(format_timestamp(u64::MAX), u64::MAX.to_string());
    }

    #[test]
    fn native_amounts() {
        let fee = U256::from(25_000_000_000_000_000_000u128);
        assert_eq!(format_native(fee, &Chain::ChilizSpicy), "25.00 CHZ");
    }
}

use fandraft_sdk::{
    client::now_unix,
    evm_utils::{Address, U256},
    ops::{
        actions::{check_resolvable, draft_duration_seconds, fee_amount},
        ActionOps, RegistryOps,
    },
};
use rust_decimal::Decimal;

use crate::config::DisplayOptions;

use super::utils::{confirm, format_native};

/// Owner-only commands.
///
/// Every subcommand checks that the signing account is the contract owner
/// before doing anything else.
#[derive(Debug, clap::Args)]
pub struct Admin {
    /// Skip confirmation prompts.
    #[arg(long, global = true)]
    yes: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Create a draft.
    Create {
        name: String,
        /// Duration in hours, between 1 and 168.
        #[arg(long, default_value_t = 24)]
        hours: u64,
    },
    /// Resolve an expired draft.
    Resolve {
        id: u64,
        /// Winner addresses, in rank order.
        #[arg(long = "winner", required = true)]
        winners: Vec<Address>,
        /// Scores, one per winner.
        #[arg(long = "score", required = true)]
        scores: Vec<u64>,
    },
    /// Change the entry fee, in whole tokens.
    SetFee { fee: Decimal },
    /// Withdraw the platform revenue.
    Withdraw,
    /// Display the entry fee, platform revenue and contract balance.
    Revenue,
}

impl super::Command for Admin {
    fn is_client_required(&self) -> bool {
        true
    }

    fn is_signer_required(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let client = ctx.client()?;
        let owner = client.require_owner().await?;
        tracing::debug!(%owner, "owner verified");

        let (action, hash) = match &self.command {
            Command::Create { name, hours } => {
                draft_duration_seconds(name, *hours)?;
                if !confirm(
                    format!("Create draft \"{}\" lasting {hours}h?", name.trim()),
                    self.yes,
                )? {
                    return Ok(());
                }
                ("create draft", client.create_draft(name, *hours).await?)
            }
            Command::Resolve {
                id,
                winners,
                scores,
            } => {
                let draft = client.draft(*id).await?;
                check_resolvable(&draft, now_unix())?;
                let listed = winners
                    .iter()
                    .zip(scores)
                    .map(|(winner, score)| format!("{} ({score})", winner.short()))
                    .collect::<Vec<_>>()
                    .join(", ");
                if !confirm(
                    format!(
                        "Resolve {} with a pool of {} to {listed}?",
                        draft.display_name(),
                        format_native(draft.total_pool, client.chain())
                    ),
                    self.yes,
                )? {
                    return Ok(());
                }
                let scores = scores.iter().map(|s| U256::from(*s)).collect::<Vec<_>>();
                ("resolve draft", client.resolve_draft(*id, winners, &scores).await?)
            }
            Command::SetFee { fee } => {
                let amount = fee_amount(*fee)?;
                let current = client.entry_fee().await?;
                if !confirm(
                    format!(
                        "Change the entry fee from {} to {}?",
                        format_native(current, client.chain()),
                        format_native(amount, client.chain())
                    ),
                    self.yes,
                )? {
                    return Ok(());
                }
                ("change entry fee", client.change_entry_fee(*fee).await?)
            }
            Command::Withdraw => {
                let revenue = client.platform_revenue().await?;
                if revenue.is_zero() {
                    tracing::info!("no revenue to withdraw");
                    return Ok(());
                }
                if !confirm(
                    format!("Withdraw {}?", format_native(revenue, client.chain())),
                    self.yes,
                )? {
                    return Ok(());
                }
                ("withdraw revenue", client.withdraw_revenue().await?)
            }
            Command::Revenue => {
                let fee = client.entry_fee().await?;
                let revenue = client.platform_revenue().await?;
                let balance = client.contract_balance().await?;
                println!(
                    "{}",
                    client.output().display_many(
                        [serde_json::json!({
                            "fee": format_native(fee, client.chain()),
                            "revenue": format_native(revenue, client.chain()),
                            "balance": format_native(balance, client.chain()),
                        })],
                        DisplayOptions::table_projection([
                            ("fee", "Entry Fee"),
                            ("revenue", "Platform Revenue"),
                            ("balance", "Contract Balance"),
                        ]),
                    )?
                );
                return Ok(());
            }
        };
        client.display_transaction(action, &hash)?;
        Ok(())
    }
}

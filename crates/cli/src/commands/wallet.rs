use fandraft_sdk::{evm_utils::Address, ops::WalletOps};

use crate::config::DisplayOptions;

use super::utils::format_native;

/// Wallet session commands.
#[derive(Debug, clap::Args)]
pub struct Wallet {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Request account access and switch the wallet to the configured chain.
    Connect,
    /// Display the configured account.
    Account,
    /// Display the native balance of an address.
    Balance {
        /// Address to query. Defaults to the configured account.
        address: Option<Address>,
    },
    /// Check that the endpoint serves the configured chain.
    Network,
}

impl super::Command for Wallet {
    fn is_client_required(&self) -> bool {
        true
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let client = ctx.client()?;
        let output = client.output();

        match &self.command {
            Command::Connect => {
                let mut session = ctx.config().create_client()?;
                let account = session.connect().await?;
                let chain = session.chain().params();
                println!(
                    "{}",
                    output.display_many(
                        [serde_json::json!({
                            "account": account.to_string(),
                            "chain_id": chain.chain_id,
                            "chain": chain.name,
                        })],
                        DisplayOptions::table_projection([
                            ("account", "Account"),
                            ("chain_id", "Chain Id"),
                            ("chain", "Chain"),
                        ]),
                    )?
                );
                if ctx.config().account().is_none() {
                    tracing::info!(
                        "set `account = \"{account}\"` in {} to skip the wallet request",
                        ctx.config_path().display()
                    );
                }
            }
            Command::Account => {
                let account = client.require_account()?;
                println!(
                    "{}",
                    output.display_value_with_label("account", account.to_string())?
                );
            }
            Command::Balance { address } => {
                let address = match address {
                    Some(address) => *address,
                    None => client.require_account()?,
                };
                let balance = client.balance(&address).await?;
                println!(
                    "{}",
                    output.display_many(
                        [serde_json::json!({
                            "address": address.to_string(),
                            "balance": format_native(balance, client.chain()),
                            "wei": balance.to_string(),
                        })],
                        DisplayOptions::table_projection([
                            ("address", "Address"),
                            ("balance", "Balance"),
                        ]),
                    )?
                );
            }
            Command::Network => {
                let chain_id = client.check_network().await?;
                println!(
                    "{}",
                    output.display_value_with_label("chain_id", chain_id)?
                );
            }
        }
        Ok(())
    }
}

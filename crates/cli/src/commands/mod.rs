use std::{ops::Deref, path::Path};

use admin::Admin;
use drafts::Drafts;
use enum_dispatch::enum_dispatch;
use eyre::OptionExt;
use fandraft_sdk::{
    evm_utils::{client_traits::HttpRpcSender, TxHash},
    ops::WalletOps,
    Client,
};
use init_config::InitConfig;
use leaderboard::Leaderboard;
use players::Players;
use serve::Serve;
use stats::Stats;
use wallet::Wallet;

use crate::config::{Config, DisplayOptions, OutputFormat};

mod admin;
mod drafts;
mod init_config;
mod leaderboard;
mod players;
mod serve;
mod stats;
mod wallet;

/// Utils for command implementations.
pub mod utils;

/// Commands.
#[enum_dispatch(Command)]
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Initialize config file.
    InitConfig(InitConfig),
    /// Wallet session commands.
    Wallet(Wallet),
    /// Draft commands.
    Drafts(Drafts),
    /// Display the leaderboard.
    Leaderboard(Leaderboard),
    /// Display dashboard statistics.
    Stats(Stats),
    /// Display the player catalog.
    Players(Players),
    /// Owner-only commands.
    Admin(Admin),
    /// Run the mock REST API.
    Serve(Serve),
}

#[enum_dispatch]
pub(crate) trait Command {
    fn is_client_required(&self) -> bool {
        false
    }

    /// Whether a signing account must be available before executing.
    fn is_signer_required(&self) -> bool {
        false
    }

    async fn execute(&self, ctx: Context<'_>) -> eyre::Result<()>;
}

pub(crate) struct Context<'a> {
    config_path: &'a Path,
    config: &'a Config,
    client: Option<&'a CommandClient>,
    _verbose: bool,
}

impl<'a> Context<'a> {
    pub(super) fn new(
        config_path: &'a Path,
        config: &'a Config,
        client: Option<&'a CommandClient>,
        verbose: bool,
    ) -> Self {
        Self {
            config_path,
            config,
            client,
            _verbose: verbose,
        }
    }

    pub(crate) fn config_path(&self) -> &Path {
        self.config_path
    }

    pub(crate) fn config(&self) -> &Config {
        self.config
    }

    pub(crate) fn client(&self) -> eyre::Result<&CommandClient> {
        self.client.ok_or_eyre("client is not provided")
    }

    pub(crate) fn _verbose(&self) -> bool {
        self._verbose
    }
}

pub(crate) struct CommandClient {
    client: Client<HttpRpcSender>,
    output_format: OutputFormat,
}

impl CommandClient {
    /// Create the client from `config`.
    ///
    /// With `signer` set, an unconfigured account is requested from the
    /// wallet, and a configured one is checked against the chain.
    pub(crate) async fn new(config: &Config, signer: bool) -> eyre::Result<Self> {
        let mut client = config.create_client()?;
        if signer {
            if client.account().is_some() {
                client.ensure_chain().await?;
            } else {
                client.connect().await?;
            }
        }
        Ok(Self {
            client,
            output_format: config.output(),
        })
    }

    pub(crate) fn output(&self) -> OutputFormat {
        self.output_format
    }

    /// Print the hash of a confirmed transaction.
    pub(crate) fn display_transaction(&self, action: &str, hash: &TxHash) -> eyre::Result<()> {
        let out = self.output_format.display_many(
            [serde_json::json!({
                "action": action,
                "hash": hash.to_string(),
                "status": "confirmed",
            })],
            DisplayOptions::table_projection([
                ("action", "Action"),
                ("hash", "Transaction"),
                ("status", "Status"),
            ]),
        )?;
        println!("{out}");
        Ok(())
    }
}

impl Deref for CommandClient {
    type Target = Client<HttpRpcSender>;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

use std::pin::pin;

use fandraft_sdk::{
    client::now_unix,
    contract::ResolutionAbi,
    evm_utils::Address,
    ops::{actions::check_joinable, ActionOps, DashboardOps, RegistryOps},
    types::{time_left, Draft, DraftStatus, PrizeSplit},
    RosterSelector,
};
use futures_util::StreamExt;

use crate::config::DisplayOptions;

use super::{
    utils::{confirm, format_native, format_timestamp},
    CommandClient,
};

/// Draft commands.
#[derive(Debug, clap::Args)]
pub struct Drafts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// List active drafts.
    List {
        /// Keep refreshing the list.
        #[arg(long)]
        watch: bool,
        /// Refresh interval of `--watch`.
        #[arg(long, default_value = "30s")]
        interval: humantime::Duration,
    },
    /// Show a draft with its participants and winners.
    Show { id: u64 },
    /// Names of every draft ever created, by id.
    Names,
    /// Join a draft with a complete roster of 11 players.
    Join {
        id: u64,
        /// Player ids from the catalog: 1 GK, 4 DEF, 3 MID and 3 FWD.
        #[arg(long, short, value_delimiter = ',', num_args = 1.., required = true)]
        players: Vec<u64>,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Drafts an address has entered, newest first.
    History {
        /// Defaults to the configured account.
        #[arg(long)]
        address: Option<Address>,
    },
}

impl super::Command for Drafts {
    fn is_client_required(&self) -> bool {
        true
    }

    fn is_signer_required(&self) -> bool {
        matches!(self.command, Command::Join { .. })
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let client = ctx.client()?;
        let output = client.output();

        match &self.command {
            Command::List { watch, interval } => {
                if !watch {
                    let drafts = client.active_drafts_cached().await?;
                    println!("{}", display_drafts(client, &drafts).await?);
                    return Ok(());
                }
                let mut updates = pin!(client.watch_active_drafts((*interval).into()));
                loop {
                    tokio::select! {
                        update = updates.next() => match update {
                            Some(Ok(drafts)) => println!("{}", display_drafts(client, &drafts).await?),
                            Some(Err(err)) => tracing::warn!(%err, "failed to refresh drafts"),
                            None => break,
                        },
                        _ = tokio::signal::ctrl_c() => break,
                    }
                }
            }
            Command::Show { id } => {
                let details = client.draft_details(*id).await?;
                let draft = &details.draft;
                let now = now_unix();
                let joined = client
                    .account()
                    .is_some_and(|account| details.has_joined(account));
                println!(
                    "{}",
                    output.display_many(
                        [serde_json::json!({
                            "id": draft.id,
                            "name": draft.display_name(),
                            "pool": format_native(draft.total_pool, client.chain()),
                            "deadline": format_timestamp(draft.deadline),
                            "time_left": time_left(draft.deadline, now),
                            "active": draft.is_active,
                            "status": DraftStatus::of(draft, joined, now).as_ref(),
                            "participants": details.participants.len(),
                        })],
                        DisplayOptions::table_projection([
                            ("id", "Id"),
                            ("name", "Name"),
                            ("pool", "Prize Pool"),
                            ("deadline", "Deadline"),
                            ("time_left", "Time Left"),
                            ("status", "Status"),
                            ("participants", "Participants"),
                        ]),
                    )?
                );
                if client.contract().resolution() == ResolutionAbi::TopThree {
                    let shares = PrizeSplit::shares(draft.total_pool);
                    println!(
                        "{}",
                        output.display_many(
                            PrizeSplit::PERCENTAGES.iter().zip(shares).enumerate().map(
                                |(idx, (pct, share))| {
                                    serde_json::json!({
                                        "rank": idx + 1,
                                        "percent": pct,
                                        "share": format_native(share, client.chain()),
                                    })
                                }
                            ),
                            DisplayOptions::table_projection([
                                ("rank", "Rank"),
                                ("percent", "%"),
                                ("share", "Prize"),
                            ]),
                        )?
                    );
                }
                println!(
                    "{}",
                    output.display_many(
                        details.participants.iter().map(|participant| {
                            serde_json::json!({
                                "address": participant.to_string(),
                                "winner": details.winners.contains(participant),
                            })
                        }),
                        DisplayOptions::table_projection([
                            ("address", "Participant"),
                            ("winner", "Winner"),
                        ])
                        .empty_message("No participants yet"),
                    )?
                );
                if let Some(account) = client.account().filter(|_| joined) {
                    match client.player_selection(*id, account).await {
                        Ok(selection) => {
                            let catalog = match ctx.config().api_client() {
                                Ok(api) => api.players().await.unwrap_or_else(|err| {
                                    tracing::warn!(%err, "failed to fetch the player catalog");
                                    Vec::new()
                                }),
                                Err(_) => Vec::new(),
                            };
                            println!(
                                "{}",
                                output.display_many(
                                    selection.iter().map(|player_id| {
                                        let player = catalog.iter().find(|p| p.id == *player_id);
                                        serde_json::json!({
                                            "id": player_id,
                                            "name": player.map(|p| p.name.as_str()).unwrap_or("-"),
                                            "position": player.map(|p| p.position.as_ref()).unwrap_or("-"),
                                            "team": player.map(|p| p.team.as_str()).unwrap_or("-"),
                                        })
                                    }),
                                    DisplayOptions::table_projection([
                                        ("id", "Player"),
                                        ("name", "Name"),
                                        ("position", "Position"),
                                        ("team", "Team"),
                                    ])
                                    .empty_message("No roster recorded"),
                                )?
                            );
                        }
                        Err(err) => tracing::warn!(%err, id, "failed to fetch your roster"),
                    }
                }
            }
            Command::Names => {
                let names = client.all_draft_names().await?;
                println!(
                    "{}",
                    output.display_many(
                        names.iter().enumerate().map(|(idx, name)| {
                            serde_json::json!({ "id": idx + 1, "name": name })
                        }),
                        DisplayOptions::table_projection([("id", "Id"), ("name", "Name")])
                            .empty_message("No drafts yet"),
                    )?
                );
            }
            Command::Join { id, players, yes } => {
                let catalog = ctx.config().api_client()?.players().await?;
                let roster =
                    RosterSelector::from_catalog(&catalog, players.iter().copied())?.to_submission()?;
                let draft = client.draft(*id).await?;
                check_joinable(&draft, now_unix())?;
                let fee = client.entry_fee().await?;
                let prompt = format!(
                    "Join {} paying {}?",
                    draft.display_name(),
                    format_native(fee, client.chain())
                );
                if !confirm(prompt, *yes)? {
                    return Ok(());
                }
                let hash = client.join_draft(*id, &roster, Some(fee)).await?;
                client.display_transaction("join draft", &hash)?;
            }
            Command::History { address } => {
                let address = match address {
                    Some(address) => *address,
                    None => client.require_account()?,
                };
                let history = client.user_history(&address).await?;
                println!(
                    "{}",
                    output.display_many(
                        history.iter().map(|entry| {
                            serde_json::json!({
                                "id": entry.draft_id,
                                "name": entry.name.clone().unwrap_or_else(|| format!("Draft #{}", entry.draft_id)),
                                "pool": format_native(entry.total_pool, client.chain()),
                                "deadline": format_timestamp(entry.deadline),
                                "state": if entry.is_active { "active" } else { "ended" },
                                "won": entry.has_won,
                                "participants": entry.participant_count,
                            })
                        }),
                        DisplayOptions::table_projection([
                            ("id", "Id"),
                            ("name", "Name"),
                            ("pool", "Prize Pool"),
                            ("deadline", "Deadline"),
                            ("state", "State"),
                            ("won", "Won"),
                            ("participants", "Participants"),
                        ])
                        .empty_message(format!("{} has not joined any draft", address.short())),
                    )?
                );
            }
        }
        Ok(())
    }
}

async fn display_drafts(client: &CommandClient, drafts: &[Draft]) -> eyre::Result<String> {
    let output = client.output();
    let now = now_unix();
    let mut rows = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let joined = match client.account() {
            Some(account) => match client.participants(draft.id).await {
                Ok(participants) => participants.contains(account),
                Err(err) => {
                    tracing::warn!(%err, id = draft.id, "failed to fetch participants");
                    false
                }
            },
            None => false,
        };
        rows.push(serde_json::json!({
            "id": draft.id,
            "name": draft.display_name(),
            "pool": format_native(draft.total_pool, client.chain()),
            "time_left": time_left(draft.deadline, now),
            "status": DraftStatus::of(draft, joined, now).as_ref(),
        }));
    }
    output.display_many(
        rows,
        DisplayOptions::table_projection([
            ("id", "Id"),
            ("name", "Name"),
            ("pool", "Prize Pool"),
            ("time_left", "Time Left"),
            ("status", "Status"),
        ])
        .empty_message("No active drafts"),
    )
}

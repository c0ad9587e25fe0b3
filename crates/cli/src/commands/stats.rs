use std::pin::pin;

use fandraft_sdk::ops::{DashboardOps, LeaderboardOps};
use futures_util::StreamExt;

use crate::config::DisplayOptions;

use super::utils::{format_native, Source};

/// Display dashboard statistics.
#[derive(Debug, clap::Args)]
pub struct Stats {
    /// Read from the ledger or from the API.
    #[arg(long, value_enum, default_value_t)]
    source: Source,
    /// Keep printing the number of distinct participants.
    #[arg(long)]
    watch_participants: bool,
    /// Refresh interval of `--watch-participants`.
    #[arg(long, default_value = "60s")]
    interval: humantime::Duration,
}

impl super::Command for Stats {
    fn is_client_required(&self) -> bool {
        self.source == Source::Ledger
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let output = ctx.config().output();
        match self.source {
            Source::Ledger => {
                let client = ctx.client()?;
                if self.watch_participants {
                    let mut counts = pin!(client.watch_unique_participants(self.interval.into()));
                    loop {
                        tokio::select! {
                            count = counts.next() => match count {
                                Some(Ok(count)) => println!("{}", output.display_value_with_label("participants", count)?),
                                Some(Err(err)) => tracing::warn!(%err, "failed to count participants"),
                                None => break,
                            },
                            _ = tokio::signal::ctrl_c() => break,
                        }
                    }
                    return Ok(());
                }
                let stats = client.dashboard_stats().await?;
                println!(
                    "{}",
                    output.display_many(
                        [serde_json::json!({
                            "active_drafts": stats.active_drafts,
                            "total_pool": format_native(stats.total_active_pool, client.chain()),
                            "your_wins": stats.user_wins,
                            "revenue": format_native(stats.platform_revenue, client.chain()),
                            "participants": stats.unique_participants,
                            "owner": stats.is_owner,
                        })],
                        DisplayOptions::table_projection([
                            ("active_drafts", "Active Drafts"),
                            ("total_pool", "Total Prize Pool"),
                            ("your_wins", "Your Wins"),
                            ("revenue", "Platform Revenue"),
                            ("participants", "Participants"),
                            ("owner", "Owner"),
                        ]),
                    )?
                );
                if let Some(account) = client.account() {
                    let player = client.player_stats(account).await;
                    println!(
                        "{}",
                        output.display_many(
                            [serde_json::json!({
                                "games": player.total_games,
                                "wins": player.wins,
                                "winnings": format_native(player.total_winnings, client.chain()),
                                "win_rate": player.win_rate,
                            })],
                            DisplayOptions::table_projection([
                                ("games", "Your Games"),
                                ("wins", "Wins"),
                                ("winnings", "Winnings"),
                                ("win_rate", "Win Rate %"),
                            ]),
                        )?
                    );
                }
            }
            Source::Api => {
                if self.watch_participants {
                    eyre::bail!("`--watch-participants` is only available with `--source ledger`");
                }
                let stats = ctx.config().api_client()?.stats().await?;
                println!(
                    "{}",
                    output.display_many(
                        [stats],
                        DisplayOptions::table_projection([
                            ("activeDrafts", "Active Drafts"),
                            ("totalPrizePool", "Total Prize Pool"),
                            ("totalPlayers", "Players"),
                        ]),
                    )?
                );
            }
        }
        Ok(())
    }
}

use fandraft_sdk::{ops::LeaderboardOps, types::win_rate};

use crate::config::DisplayOptions;

use super::utils::Source;

/// Display the leaderboard.
#[derive(Debug, clap::Args)]
pub struct Leaderboard {
    /// Derive the ranking from the ledger, or read the API's table.
    #[arg(long, value_enum, default_value_t)]
    source: Source,
}

impl super::Command for Leaderboard {
    fn is_client_required(&self) -> bool {
        self.source == Source::Ledger
    }

    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let output = ctx.config().output();
        let rows = match self.source {
            Source::Ledger => {
                let client = ctx.client()?;
                client
                    .leaderboard()
                    .await?
                    .into_iter()
                    .enumerate()
                    .map(|(idx, entry)| {
                        serde_json::json!({
                            "rank": idx + 1,
                            "address": entry.address.to_string(),
                            "wins": entry.wins,
                            "earnings": entry.approximate_earnings.to_string(),
                            "games": entry.games_played,
                            "win_rate": format!("{}%", win_rate(entry.wins, entry.games_played)),
                        })
                    })
                    .collect::<Vec<_>>()
            }
            Source::Api => ctx
                .config()
                .api_client()?
                .leaderboard()
                .await?
                .into_iter()
                .enumerate()
                .map(|(idx, row)| {
                    serde_json::json!({
                        "rank": idx + 1,
                        "address": row.user_address,
                        "wins": row.total_wins,
                        "earnings": row.total_earnings,
                        "games": row.games_played,
                        "win_rate": format!("{}%", win_rate(row.total_wins, row.games_played)),
                    })
                })
                .collect(),
        };
        println!(
            "{}",
            output.display_many(
                rows,
                DisplayOptions::table_projection([
                    ("rank", "#"),
                    ("address", "Address"),
                    ("wins", "Wins"),
                    ("earnings", "Earnings"),
                    ("games", "Games"),
                    ("win_rate", "Win Rate"),
                ])
                .empty_message("No winners yet"),
            )?
        );
        Ok(())
    }
}

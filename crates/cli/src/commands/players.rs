use fandraft_sdk::types::Position;

use crate::config::DisplayOptions;

/// Display the player catalog served by the API.
#[derive(Debug, clap::Args)]
pub struct Players {
    /// Only players of this position.
    #[arg(long, short, value_enum)]
    position: Option<Position>,
}

impl super::Command for Players {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let api = ctx.config().api_client()?;
        let players = match self.position {
            Some(position) => api.players_by_position(position).await?,
            None => api.players().await?,
        };
        println!(
            "{}",
            ctx.config().output().display_many(
                players,
                DisplayOptions::table_projection([
                    ("id", "Id"),
                    ("name", "Name"),
                    ("team", "Team"),
                    ("position", "Position"),
                    ("points", "Points"),
                ])
                .empty_message("No players"),
            )?
        );
        Ok(())
    }
}

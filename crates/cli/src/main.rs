use std::path::PathBuf;

use clap::Parser;
use commands::{Command, CommandClient, Commands, Context};
use config::Config;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

mod commands;
mod config;

/// Command-line dashboard for FanDraft.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the config file.
    #[arg(long, short, env = "FANDRAFT_CONFIG")]
    config: Option<PathBuf>,
    /// Print more details.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(flatten)]
    overrides: Config,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config_path(&self) -> eyre::Result<PathBuf> {
        match &self.config {
            Some(path) => config::expand_path(path),
            None => config::default_config_path(),
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config_path()?;
    let config = Config::load(&config_path, &cli.overrides)?;
    tracing::debug!(path = %config_path.display(), ?config, "config loaded");

    let client = if cli.command.is_client_required() {
        Some(CommandClient::new(&config, cli.command.is_signer_required()).await?)
    } else {
        None
    };

    cli.command
        .execute(Context::new(
            &config_path,
            &config,
            client.as_ref(),
            cli.verbose,
        ))
        .await
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn client_and_signer_requirements() {
        let parse = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("fandraft").chain(args.iter().copied()))
                .expect("valid arguments")
                .command
        };

        let list = parse(&["drafts", "list"]);
        assert!(list.is_client_required());
        assert!(!list.is_signer_required());

        let names = parse(&["drafts", "names"]);
        assert!(names.is_client_required());
        assert!(!names.is_signer_required());

        let join = parse(&["drafts", "join", "3", "--players", "1,3,4,5,6,8,9,10,12,13,14"]);
        assert!(join.is_signer_required());

        let admin = parse(&["admin", "set-fee", "30", "--yes"]);
        assert!(admin.is_signer_required());

        let players = parse(&["players", "--position", "gk"]);
        assert!(!players.is_client_required());

        let leaderboard = parse(&["leaderboard", "--source", "api"]);
        assert!(!leaderboard.is_client_required());
        assert!(parse(&["leaderboard"]).is_client_required());
    }

    #[test]
    fn global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fandraft",
            "stats",
            "--output",
            "json",
            "--resolution",
            "top-three",
        ])
        .unwrap();
        let text = toml::to_string(&cli.overrides).unwrap();
        assert!(text.contains("output = \"json\""));
        assert!(text.contains("resolution = \"top-three\""));
    }
}

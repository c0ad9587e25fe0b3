use std::fs;

use crate::config::Config;

/// Write a default config file.
#[derive(Debug, clap::Args)]
pub struct InitConfig {
    /// Overwrite an existing file.
    #[arg(long, short)]
    force: bool,
}

impl super::Command for InitConfig {
    async fn execute(&self, ctx: super::Context<'_>) -> eyre::Result<()> {
        let path = ctx.config_path();
        if path.exists() && !self.force {
            eyre::bail!("{} already exists, pass `--force` to overwrite", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(&Config::template())?)?;
        tracing::info!("config written to {}", path.display());
        Ok(())
    }
}

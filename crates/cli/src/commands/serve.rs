/// Run the mock REST API until Ctrl-C.
#[derive(Debug, clap::Args)]
pub struct Serve {
    /// Listen address.
    #[arg(long, default_value = fandraft_mock_api::DEFAULT_ADDR)]
    addr: String,
}

impl super::Command for Serve {
    async fn execute(&self, _ctx: super::Context<'_>) -> eyre::Result<()> {
        fandraft_mock_api::serve(&self.addr).await?;
        Ok(())
    }
}

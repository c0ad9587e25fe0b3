use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use eyre::OptionExt;
use fandraft_sdk::{
    api::ApiClient,
    evm_utils::{
        client_traits::{ConfirmationConfig, HttpRpcSender},
        Address, Chain, ChainParams,
    },
    Client, ClientOptions, ResolutionAbi,
};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use indexmap::IndexMap;
use prettytable::{format::consts::FORMAT_CLEAN, Cell, Row, Table};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DisplayFromStr};
use url::Url;

/// Prefix of the environment variables read into [`Config`].
pub(crate) const ENV_PREFIX: &str = "FANDRAFT_";

/// Default base URL of the mock API.
pub(crate) const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/";

const DEFAULT_CONFIG_FILE: &str = "fandraft/config.toml";

/// Returns the default config path, `$XDG_CONFIG_HOME/fandraft/config.toml`.
pub(crate) fn default_config_path() -> eyre::Result<PathBuf> {
    use etcetera::BaseStrategy;

    let strategy = etcetera::choose_base_strategy()?;
    Ok(strategy.config_dir().join(DEFAULT_CONFIG_FILE))
}

/// Expand `~` and environment variables in a user supplied path.
pub(crate) fn expand_path(path: &Path) -> eyre::Result<PathBuf> {
    let path = path.to_str().ok_or_eyre("config path is not valid UTF-8")?;
    Ok(PathBuf::from(shellexpand::full(path)?.into_owned()))
}

/// Command-line options shared by all commands.
///
/// The same structure is read from the config file and from `FANDRAFT_*`
/// environment variables; command-line flags take precedence.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, clap::Args)]
pub(crate) struct Config {
    /// Output format.
    #[arg(long, short, value_enum, global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output: Option<OutputFormat>,
    /// Chain preset.
    #[arg(long, global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chain: Option<String>,
    /// RPC endpoint, overriding the one of the chain.
    #[arg(long, short = 'u', global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rpc_url: Option<Url>,
    /// Address of the draft contract.
    #[arg(long, global = true)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    contract: Option<Address>,
    /// Resolution ABI of the deployed contract.
    #[arg(long, value_enum, global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolution: Option<ResolutionAbi>,
    /// Account used for signing. Requested from the wallet if not set.
    #[arg(long, global = true)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<Address>,
    /// Base URL of the mock API.
    #[arg(long, global = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_url: Option<Url>,
    /// Interval between transaction receipt polls.
    #[arg(long, global = true)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmation_interval: Option<humantime::Duration>,
    /// Give up waiting for a receipt after this long.
    #[arg(long, global = true)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmation_timeout: Option<humantime::Duration>,
    /// Custom chain, only read from the config file.
    #[arg(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_chain: Option<ChainParams>,
}

impl Config {
    /// Load the config at `path`, then `FANDRAFT_*` variables, then `overrides`.
    ///
    /// A missing file is not an error.
    pub(crate) fn load(path: &Path, overrides: &Self) -> eyre::Result<Self> {
        let config = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
            .merge(Serialized::defaults(overrides))
            .extract()?;
        Ok(config)
    }

    /// The config written by `init-config`.
    pub(crate) fn template() -> Self {
        Self {
            output: Some(OutputFormat::Table),
            chain: Some(Chain::default().to_string()),
            resolution: Some(ResolutionAbi::default()),
            api_url: Url::parse(DEFAULT_API_URL).ok(),
            confirmation_interval: Some(Duration::from_secs(2).into()),
            ..Default::default()
        }
    }

    pub(crate) fn output(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }

    /// The chain to use. A custom chain wins over the preset, and `rpc_url`
    /// replaces the endpoint of either.
    pub(crate) fn chain(&self) -> eyre::Result<Chain> {
        let chain = match (&self.custom_chain, &self.chain) {
            (Some(params), _) => Chain::Custom(params.clone()),
            (None, Some(name)) => name.parse()?,
            (None, None) => Chain::default(),
        };
        Ok(match &self.rpc_url {
            Some(url) => chain.with_rpc_url(url.clone()),
            None => chain,
        })
    }

    pub(crate) fn contract(&self) -> eyre::Result<Address> {
        self.contract
            .ok_or_eyre("contract address is not configured, set `contract` or pass `--contract`")
    }

    pub(crate) fn account(&self) -> Option<&Address> {
        self.account.as_ref()
    }

    pub(crate) fn confirmation(&self) -> ConfirmationConfig {
        let mut config = ConfirmationConfig::default();
        if let Some(interval) = self.confirmation_interval {
            config.poll_interval = interval.into();
        }
        config.timeout = self.confirmation_timeout.map(Into::into);
        config
    }

    pub(crate) fn create_client(&self) -> eyre::Result<Client<HttpRpcSender>> {
        let options = ClientOptions::builder()
            .resolution(self.resolution.unwrap_or_default())
            .chain(self.chain()?)
            .account(self.account)
            .confirmation(self.confirmation())
            .build();
        Ok(Client::new_with_options(self.contract()?, options))
    }

    pub(crate) fn api_client(&self) -> eyre::Result<ApiClient> {
        let url = self
            .api_url
            .as_ref()
            .map(Url::as_str)
            .unwrap_or(DEFAULT_API_URL);
        Ok(ApiClient::try_new(url)?)
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum OutputFormat {
    /// Plain table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// How items are rendered as a table.
#[derive(Debug, Default)]
pub(crate) struct DisplayOptions {
    projection: IndexMap<String, String>,
    empty_message: Option<String>,
}

impl DisplayOptions {
    /// Render the given `(key, header)` columns in order.
    pub(crate) fn table_projection(
        columns: impl IntoIterator<Item = (impl ToString, impl ToString)>,
    ) -> Self {
        Self {
            projection: columns
                .into_iter()
                .map(|(key, header)| (key.to_string(), header.to_string()))
                .collect(),
            empty_message: None,
        }
    }

    /// Text printed in table mode when there is nothing to show.
    pub(crate) fn empty_message(mut self, message: impl ToString) -> Self {
        self.empty_message = Some(message.to_string());
        self
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => (if *b { "yes" } else { "no" }).to_string(),
        Some(other) => other.to_string(),
    }
}

impl OutputFormat {
    /// Render a list of items.
    pub(crate) fn display_many(
        &self,
        items: impl IntoIterator<Item = impl Serialize>,
        options: DisplayOptions,
    ) -> eyre::Result<String> {
        let items = items
            .into_iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        match self {
            Self::Json => Ok(serde_json::to_string_pretty(&items)?),
            Self::Table => {
                if items.is_empty() {
                    if let Some(message) = options.empty_message {
                        return Ok(message);
                    }
                }
                let projection = if options.projection.is_empty() {
                    items
                        .first()
                        .and_then(Value::as_object)
                        .map(|object| object.keys().map(|key| (key.clone(), key.clone())).collect())
                        .unwrap_or_default()
                } else {
                    options.projection
                };
                let mut table = Table::new();
                table.set_format(*FORMAT_CLEAN);
                table.set_titles(Row::new(
                    projection.values().map(|header| Cell::new(header)).collect(),
                ));
                for item in &items {
                    table.add_row(Row::new(
                        projection
                            .keys()
                            .map(|key| Cell::new(&cell_text(item.get(key))))
                            .collect(),
                    ));
                }
                Ok(table.to_string())
            }
        }
    }

    /// Render a single labelled value.
    pub(crate) fn display_value_with_label(
        &self,
        label: &str,
        value: impl Serialize,
    ) -> eyre::Result<String> {
        let value = serde_json::to_value(value)?;
        match self {
            Self::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({ label: value }))?),
            Self::Table => Ok(format!("{label}: {}", cell_text(Some(&value)))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn file_env_and_flags_are_layered() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                contract = "0x00000000000000000000000000000000000000dd"
                resolution = "top-three"
                output = "json"
                confirmation_interval = "500ms"
                "#,
            )?;
            jail.set_env("FANDRAFT_OUTPUT", "table");
            jail.set_env(
                "FANDRAFT_ACCOUNT",
                "0x00000000000000000000000000000000000000a1",
            );

            let overrides = Config {
                resolution: Some(ResolutionAbi::SingleWinner),
                ..Default::default()
            };
            let config = Config::load(Path::new("config.toml"), &overrides)
                .map_err(|err| err.to_string())?;

            assert_eq!(config.output(), OutputFormat::Table);
            assert_eq!(config.resolution, Some(ResolutionAbi::SingleWinner));
            assert_eq!(
                config.contract().unwrap(),
                "0x00000000000000000000000000000000000000dd".parse::<Address>().unwrap()
            );
            assert!(config.account().is_some());
            assert_eq!(
                config.confirmation().poll_interval,
                Duration::from_millis(500)
            );
            assert!(config.confirmation().timeout.is_none());
            Ok(())
        });
    }

    #[test]
    fn missing_file_uses_defaults() {
        figment::Jail::expect_with(|_| {
            let config = Config::load(Path::new("absent.toml"), &Config::default())
                .map_err(|err| err.to_string())?;
            assert_eq!(config.output(), OutputFormat::Table);
            assert_eq!(config.chain().unwrap(), Chain::ChilizSpicy);
            assert!(config.contract().is_err());
            Ok(())
        });
    }

    #[test]
    fn rpc_url_turns_preset_into_custom_chain() {
        let config = Config {
            rpc_url: Some(Url::parse("http://127.0.0.1:8545").unwrap()),
            ..Default::default()
        };
        let chain = config.chain().unwrap();
        assert_eq!(chain.chain_id(), 88890);
        assert_eq!(chain.url(), "http://127.0.0.1:8545/");
    }

    #[test]
    fn template_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::template()).unwrap();
        assert!(text.contains("resolution = \"single-winner\""));
        assert!(!text.contains("contract"));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.output(), OutputFormat::Table);
    }

    #[test]
    fn table_follows_projection() {
        let out = OutputFormat::Table
            .display_many(
                [json!({"id": 1, "name": "Cup", "active": true, "extra": "hidden"})],
                DisplayOptions::table_projection([("id", "Id"), ("name", "Name"), ("active", "Active")]),
            )
            .unwrap();
        assert!(out.contains("Name"));
        assert!(out.contains("Cup"));
        assert!(out.contains("yes"));
        assert!(!out.contains("hidden"));

        let empty = OutputFormat::Table
            .display_many(
                Vec::<Value>::new(),
                DisplayOptions::table_projection([("id", "Id")]).empty_message("nothing"),
            )
            .unwrap();
        assert_eq!(empty, "nothing");

        let json = OutputFormat::Json
            .display_many([json!({"id": 1})], DisplayOptions::default())
            .unwrap();
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), json!([{"id": 1}]));
    }
}

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

const CHILIZ_SPICY_RPC: &str = "https://spicy-rpc.chiliz.com/";
const CHILIZ_SPICY_EXPLORER: &str = "https://testnet.chiliscan.com/";

/// Parameters describing an EVM chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChainParams {
    /// Chain id.
    pub chain_id: u64,
    /// Human readable name.
    pub name: String,
    /// Native currency name.
    pub currency_name: String,
    /// Native currency symbol.
    pub currency_symbol: String,
    /// Native currency decimals.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// RPC endpoint.
    pub rpc_url: Url,
    /// Block explorer.
    #[serde(default)]
    pub explorer_url: Option<Url>,
}

fn default_decimals() -> u8 {
    18
}

impl ChainParams {
    /// Chain id as a `0x`-prefixed hex string.
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }

    /// Build the `wallet_addEthereumChain` parameter (EIP-3085).
    pub fn to_add_chain_parameter(&self) -> AddEthereumChainParameter {
        AddEthereumChainParameter {
            chain_id: self.chain_id_hex(),
            chain_name: self.name.clone(),
            native_currency: NativeCurrency {
                name: self.currency_name.clone(),
                symbol: self.currency_symbol.clone(),
                decimals: self.decimals,
            },
            rpc_urls: vec![self.rpc_url.to_string()],
            block_explorer_urls: self
                .explorer_url
                .iter()
                .map(|url| url.to_string())
                .collect(),
        }
    }
}

/// Native currency descriptor of EIP-3085.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Name.
    pub name: String,
    /// Symbol.
    pub symbol: String,
    /// Decimals.
    pub decimals: u8,
}

/// Parameter of `wallet_addEthereumChain` (EIP-3085).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEthereumChainParameter {
    /// Hex chain id.
    pub chain_id: String,
    /// Chain name.
    pub chain_name: String,
    /// Native currency.
    pub native_currency: NativeCurrency,
    /// RPC endpoints.
    pub rpc_urls: Vec<String>,
    /// Explorer urls.
    pub block_explorer_urls: Vec<String>,
}

/// Chain the client talks to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Chain {
    /// Chiliz Spicy testnet.
    #[default]
    ChilizSpicy,
    /// User supplied chain.
    Custom(ChainParams),
}

impl Chain {
    /// Returns the chain parameters.
    pub fn params(&self) -> ChainParams {
        match self {
            Self::ChilizSpicy => ChainParams {
                chain_id: 0x15b3a,
                name: "Chiliz Testnet".to_string(),
                currency_name: "CHZ".to_string(),
                currency_symbol: "CHZ".to_string(),
                decimals: 18,
                rpc_url: Url::parse(CHILIZ_SPICY_RPC).expect("must be a valid url"),
                explorer_url: Some(Url::parse(CHILIZ_SPICY_EXPLORER).expect("must be a valid url")),
            },
            Self::Custom(params) => params.clone(),
        }
    }

    /// Chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::ChilizSpicy => 0x15b3a,
            Self::Custom(params) => params.chain_id,
        }
    }

    /// RPC endpoint.
    pub fn url(&self) -> String {
        match self {
            Self::ChilizSpicy => CHILIZ_SPICY_RPC.to_string(),
            Self::Custom(params) => params.rpc_url.to_string(),
        }
    }

    /// Replace the RPC endpoint, turning a preset into a custom chain.
    pub fn with_rpc_url(self, rpc_url: Url) -> Self {
        let mut params = self.params();
        params.rpc_url = rpc_url;
        Self::Custom(params)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChilizSpicy => f.write_str("chiliz-spicy"),
            Self::Custom(params) => write!(f, "{}", params.rpc_url),
        }
    }
}

impl FromStr for Chain {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chiliz-spicy" | "spicy" | "chiliz" => Ok(Self::ChilizSpicy),
            _ => Err(crate::Error::ParseChain(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chiliz_add_chain_parameter() {
        let param = Chain::ChilizSpicy.params().to_add_chain_parameter();
        assert_eq!(param.chain_id, "0x15b3a");
        assert_eq!(param.native_currency.symbol, "CHZ");
        assert_eq!(param.native_currency.decimals, 18);
        assert_eq!(param.rpc_urls, vec![CHILIZ_SPICY_RPC.to_string()]);
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["chainName"], "Chiliz Testnet");
        assert_eq!(json["blockExplorerUrls"][0], CHILIZ_SPICY_EXPLORER);
    }

    #[test]
    fn parse_chain() {
        assert_eq!("spicy".parse::<Chain>().unwrap(), Chain::ChilizSpicy);
        assert!("mainnet-beta".parse::<Chain>().is_err());
        let custom = Chain::ChilizSpicy.with_rpc_url("http://127.0.0.1:8545".parse().unwrap());
        assert_eq!(custom.chain_id(), 88890);
        assert_eq!(custom.url(), "http://127.0.0.1:8545/");
    }
}

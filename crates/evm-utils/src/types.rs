use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use ruint::aliases::U256;

/// A 20-byte account address.
///
/// Parsing accepts any hex casing, and equality is byte-wise, so two
/// addresses that differ only in checksum casing compare equal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0; 20]);

    /// Returns whether this is the zero address.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Abbreviated form, e.g. `0x742d...5f9e`.
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = strip_hex_prefix(trimmed)
            .ok_or_else(|| crate::Error::InvalidAddress(s.to_string()))?;
        if digits.len() != 40 {
            return Err(crate::Error::InvalidAddress(s.to_string()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| crate::Error::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A 32-byte word, used for transaction hashes and log topics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct H256(pub [u8; 32]);

/// Transaction hash.
pub type TxHash = H256;

impl H256 {
    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl FromStr for H256 {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s.trim()).unwrap_or(s);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for H256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for H256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Arbitrary byte data, hex-encoded on the wire.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    /// Returns the inner slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Consumes into the inner vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl FromStr for Bytes {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = strip_hex_prefix(s.trim()).unwrap_or(s);
        Ok(Self(hex::decode(digits)?))
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn strip_hex_prefix(s: &str) -> Option<&str> {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
}

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_quantity(s: &str) -> crate::Result<U256> {
    let digits =
        strip_hex_prefix(s.trim()).ok_or_else(|| crate::Error::InvalidQuantity(s.to_string()))?;
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).map_err(|_| crate::Error::InvalidQuantity(s.to_string()))
}

/// Format a quantity as minimal `0x`-prefixed hex.
pub fn format_quantity(value: U256) -> String {
    format!("0x{value:x}")
}

/// Serde helpers for JSON-RPC quantities.
pub mod quantity {
    use super::*;

    /// `U256` quantity.
    pub mod u256_hex {
        use super::*;

        /// Serialize.
        pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&format_quantity(*value))
        }

        /// Deserialize.
        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
            let s = String::deserialize(deserializer)?;
            parse_quantity(&s).map_err(serde::de::Error::custom)
        }
    }

    /// Optional `U256` quantity.
    pub mod u256_hex_opt {
        use super::*;

        /// Serialize.
        pub fn serialize<S: Serializer>(
            value: &Option<U256>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_some(&format_quantity(*value)),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<U256>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| parse_quantity(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }

    /// `u64` quantity.
    pub mod u64_hex {
        use super::*;

        /// Serialize.
        pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&format!("{value:#x}"))
        }

        /// Deserialize.
        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
            let s = String::deserialize(deserializer)?;
            let value = parse_quantity(&s).map_err(serde::de::Error::custom)?;
            u64::try_from(value).map_err(serde::de::Error::custom)
        }
    }

    /// Optional `u64` quantity.
    pub mod u64_hex_opt {
        use super::*;

        /// Serialize.
        pub fn serialize<S: Serializer>(
            value: &Option<u64>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_some(&format!("{value:#x}")),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<u64>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| {
                    let value = parse_quantity(&s).map_err(serde::de::Error::custom)?;
                    u64::try_from(value).map_err(serde::de::Error::custom)
                })
                .transpose()
        }
    }
}

/// Block selector for read calls.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    /// Latest block.
    #[default]
    Latest,
    /// A specific block number.
    Number(u64),
}

impl Serialize for BlockId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Latest => serializer.serialize_str("latest"),
            Self::Number(number) => serializer.serialize_str(&format!("{number:#x}")),
        }
    }
}

/// Read-only call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    /// Caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Contract.
    pub to: Address,
    /// Calldata.
    #[serde(rename = "data")]
    pub input: Bytes,
}

/// Transaction submitted to the wallet for signing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Signing account.
    pub from: Address,
    /// Contract.
    pub to: Address,
    /// Calldata.
    pub data: Bytes,
    /// Attached value in minor units.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "quantity::u256_hex_opt",
        default
    )]
    pub value: Option<U256>,
}

/// Event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    /// Emitting contract.
    pub address: Address,
    /// Indexed topics.
    pub topics: Vec<H256>,
    /// Non-indexed data.
    pub data: Bytes,
    /// Block number.
    #[serde(default, with = "quantity::u64_hex_opt")]
    pub block_number: Option<u64>,
    /// Transaction hash.
    #[serde(default)]
    pub transaction_hash: Option<TxHash>,
}

/// Transaction receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Transaction hash.
    pub transaction_hash: TxHash,
    /// Inclusion block.
    #[serde(default, with = "quantity::u64_hex_opt")]
    pub block_number: Option<u64>,
    /// `1` for success and `0` for revert.
    #[serde(default, with = "quantity::u64_hex_opt")]
    pub status: Option<u64>,
    /// Emitted logs.
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    /// Returns whether the transaction reverted.
    pub fn is_reverted(&self) -> bool {
        self.status == Some(0)
    }
}

/// Filter for `eth_getLogs`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    /// First block.
    pub from_block: BlockId,
    /// Last block.
    pub to_block: BlockId,
    /// Emitting contract.
    pub address: Address,
    /// Topic filters; `None` matches anything.
    pub topics: Vec<Option<H256>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parsing_ignores_case() {
        let lower: Address = "0x742d35cc6634c0532925a3b8d8f89c7c7b265f9e"
            .parse()
            .unwrap();
        let mixed: Address = "0x742d35Cc6634C0532925a3b8d8f89c7C7b265f9e"
            .parse()
            .unwrap();
        assert_eq!(lower, mixed);
        assert_eq!(lower.to_string(), "0x742d35cc6634c0532925a3b8d8f89c7c7b265f9e");
        assert_eq!(lower.short(), "0x742d...5f9e");
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        for input in [
            "",
            "742d35cc6634c0532925a3b8d8f89c7c7b265f9e",
            "0x742d35cc",
            "0x8ba1f109551bD432803012645Hac136c22C3B8C2",
            "0xabcdef123456789abcdef123456789abcdef123456",
        ] {
            assert!(input.parse::<Address>().is_err(), "{input} should not parse");
        }
    }

    #[test]
    fn quantities() {
        assert_eq!(parse_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(parse_quantity("0x").unwrap(), U256::ZERO);
        assert_eq!(parse_quantity("0x1b").unwrap(), U256::from(27u64));
        assert!(parse_quantity("27").is_err());
        assert_eq!(format_quantity(U256::from(255u64)), "0xff");
        assert_eq!(format_quantity(U256::ZERO), "0x0");
    }

    #[test]
    fn receipt_status() {
        let receipt: TransactionReceipt = serde_json::from_value(serde_json::json!({
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "blockNumber": "0x10",
            "status": "0x0",
            "logs": [],
        }))
        .unwrap();
        assert!(receipt.is_reverted());
        assert_eq!(receipt.block_number, Some(16));
    }

    #[test]
    fn transaction_request_encodes_value_as_quantity() {
        let request = TransactionRequest {
            from: Address([1; 20]),
            to: Address([2; 20]),
            data: Bytes(vec![0xde, 0xad]),
            value: Some(U256::from(1_000u64)),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["value"], "0x3e8");
        assert_eq!(json["data"], "0xdead");
    }
}

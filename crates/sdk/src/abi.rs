//! Solidity ABI encoding for the value types used by the draft contract.

use fandraft_evm_utils::{keccak256, Address, Bytes, U256};

const WORD: usize = 32;

/// Function selector.
pub type Selector = [u8; 4];

/// Compute the selector of a canonical function signature,
/// e.g. `getDraft(uint256)`.
pub fn selector(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

/// A value to encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `uint256`.
    Uint(U256),
    /// `address`.
    Address(Address),
    /// `bool`.
    Bool(bool),
    /// `string`.
    String(String),
    /// `uint256[]`.
    UintArray(Vec<U256>),
    /// `address[]`.
    AddressArray(Vec<Address>),
    /// `string[]`.
    StringArray(Vec<String>),
}

impl From<u64> for Token {
    fn from(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }
}

impl From<U256> for Token {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<Address> for Token {
    fn from(value: Address) -> Self {
        Self::Address(value)
    }
}

impl Token {
    fn is_dynamic(&self) -> bool {
        matches!(
            self,
            Self::String(_) | Self::UintArray(_) | Self::AddressArray(_) | Self::StringArray(_)
        )
    }

    fn head_word(&self) -> [u8; WORD] {
        match self {
            Self::Uint(value) => uint_word(*value),
            Self::Address(address) => address_word(address),
            Self::Bool(value) => uint_word(U256::from(u64::from(*value))),
            Self::String(_)
            | Self::UintArray(_)
            | Self::AddressArray(_)
            | Self::StringArray(_) => {
                unreachable!("dynamic tokens are encoded in the tail")
            }
        }
    }

    fn encode_tail(&self, out: &mut Vec<u8>) {
        match self {
            Self::String(value) => encode_string(value, out),
            Self::UintArray(values) => {
                out.extend_from_slice(&len_word(values.len()));
                for value in values {
                    out.extend_from_slice(&uint_word(*value));
                }
            }
            Self::AddressArray(addresses) => {
                out.extend_from_slice(&len_word(addresses.len()));
                for address in addresses {
                    out.extend_from_slice(&address_word(address));
                }
            }
            Self::StringArray(values) => {
                out.extend_from_slice(&len_word(values.len()));
                // Offsets are relative to the first offset word.
                let offsets_len = values.len() * WORD;
                let mut strings = Vec::new();
                for value in values {
                    out.extend_from_slice(&len_word(offsets_len + strings.len()));
                    encode_string(value, &mut strings);
                }
                out.extend(strings);
            }
            Self::Uint(_) | Self::Address(_) | Self::Bool(_) => {}
        }
    }
}

fn encode_string(value: &str, out: &mut Vec<u8>) {
    let bytes = value.as_bytes();
    out.extend_from_slice(&len_word(bytes.len()));
    out.extend_from_slice(bytes);
    let padding = (WORD - bytes.len() % WORD) % WORD;
    out.extend(std::iter::repeat(0).take(padding));
}

fn uint_word(value: U256) -> [u8; WORD] {
    value.to_be_bytes::<WORD>()
}

fn len_word(len: usize) -> [u8; WORD] {
    uint_word(U256::from(len as u64))
}

fn address_word(address: &Address) -> [u8; WORD] {
    let mut word = [0; WORD];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Encode a tuple of tokens.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    let head_len = tokens.len() * WORD;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&len_word(head_len + tail.len()));
            token.encode_tail(&mut tail);
        } else {
            head.extend_from_slice(&token.head_word());
        }
    }
    head.extend(tail);
    head
}

/// Encode a function call: selector followed by the encoded arguments.
pub fn encode_call(signature: &str, tokens: &[Token]) -> Bytes {
    let mut data = selector(signature).to_vec();
    data.extend(encode(tokens));
    data.into()
}

/// Decoder over ABI-encoded return data or log data.
///
/// Every accessor takes the index of the value in the head of the tuple.
/// Out-of-range reads, offsets or lengths are rejected instead of truncated.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    data: &'a [u8],
}

impl<'a> Decoder<'a> {
    /// Create a decoder.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Require at least `count` head words.
    pub fn expect_words(&self, count: usize) -> crate::Result<()> {
        let required = count
            .checked_mul(WORD)
            .ok_or_else(|| crate::Error::abi("length overflow"))?;
        if self.data.len() < required {
            return Err(crate::Error::abi(format!(
                "return data too short: expected at least {required} bytes, got {}",
                self.data.len()
            )));
        }
        Ok(())
    }

    fn word_at(&self, pos: usize) -> crate::Result<&'a [u8]> {
        let end = pos
            .checked_add(WORD)
            .ok_or_else(|| crate::Error::abi("offset overflow"))?;
        self.data.get(pos..end).ok_or_else(|| {
            crate::Error::abi(format!(
                "read of word at {pos} is out of range ({} bytes)",
                self.data.len()
            ))
        })
    }

    fn usize_at(&self, pos: usize) -> crate::Result<usize> {
        let value = U256::from_be_slice(self.word_at(pos)?);
        u64::try_from(value)
            .ok()
            .and_then(|value| usize::try_from(value).ok())
            .filter(|value| *value <= self.data.len())
            .ok_or_else(|| crate::Error::abi(format!("offset or length {value} is out of range")))
    }

    fn head(&self, index: usize) -> crate::Result<usize> {
        index
            .checked_mul(WORD)
            .ok_or_else(|| crate::Error::abi("index overflow"))
    }

    /// Decode `uint256`.
    pub fn uint(&self, index: usize) -> crate::Result<U256> {
        Ok(U256::from_be_slice(self.word_at(self.head(index)?)?))
    }

    /// Decode `uint256` that must fit in a `u64`.
    pub fn u64(&self, index: usize) -> crate::Result<u64> {
        let value = self.uint(index)?;
        u64::try_from(value).map_err(|_| crate::Error::abi(format!("{value} does not fit in u64")))
    }

    /// Decode `bool`. Anything other than 0 or 1 is rejected.
    pub fn bool(&self, index: usize) -> crate::Result<bool> {
        decode_bool(self.word_at(self.head(index)?)?)
    }

    /// Decode `address`. Non-zero padding is rejected.
    pub fn address(&self, index: usize) -> crate::Result<Address> {
        decode_address(self.word_at(self.head(index)?)?)
    }

    /// Position and length of a dynamic value whose offset is in head word `index`.
    fn dynamic(&self, index: usize, elem_size: usize) -> crate::Result<(usize, usize)> {
        let offset = self.usize_at(self.head(index)?)?;
        self.sequence(offset, elem_size)
    }

    /// Position and length of a length-prefixed sequence at `offset`.
    fn sequence(&self, offset: usize, elem_size: usize) -> crate::Result<(usize, usize)> {
        let len = self.usize_at(offset)?;
        let start = offset + WORD;
        let end = len
            .checked_mul(elem_size)
            .and_then(|size| size.checked_add(start))
            .ok_or_else(|| crate::Error::abi("length overflow"))?;
        if end > self.data.len() {
            return Err(crate::Error::abi(format!(
                "dynamic value of {len} elements at {offset} exceeds data length {}",
                self.data.len()
            )));
        }
        Ok((start, len))
    }

    fn string_at(&self, offset: usize) -> crate::Result<String> {
        let (start, len) = self.sequence(offset, 1)?;
        String::from_utf8(self.data[start..start + len].to_vec())
            .map_err(|err| crate::Error::abi(format!("invalid utf-8 string: {err}")))
    }

    /// Decode `string`.
    pub fn string(&self, index: usize) -> crate::Result<String> {
        let offset = self.usize_at(self.head(index)?)?;
        self.string_at(offset)
    }

    /// Decode `uint256[]`.
    pub fn uint_array(&self, index: usize) -> crate::Result<Vec<U256>> {
        let (start, len) = self.dynamic(index, WORD)?;
        (0..len)
            .map(|i| Ok(U256::from_be_slice(self.word_at(start + i * WORD)?)))
            .collect()
    }

    /// Decode `address[]`.
    pub fn address_array(&self, index: usize) -> crate::Result<Vec<Address>> {
        let (start, len) = self.dynamic(index, WORD)?;
        (0..len)
            .map(|i| decode_address(self.word_at(start + i * WORD)?))
            .collect()
    }

    /// Decode `string[]`.
    pub fn string_array(&self, index: usize) -> crate::Result<Vec<String>> {
        let (start, len) = self.dynamic(index, WORD)?;
        (0..len)
            .map(|i| {
                let relative = self.usize_at(start + i * WORD)?;
                let offset = start
                    .checked_add(relative)
                    .ok_or_else(|| crate::Error::abi("offset overflow"))?;
                self.string_at(offset)
            })
            .collect()
    }
}

fn decode_bool(word: &[u8]) -> crate::Result<bool> {
    let (padding, last) = word.split_at(WORD - 1);
    match (padding.iter().all(|b| *b == 0), last[0]) {
        (true, 0) => Ok(false),
        (true, 1) => Ok(true),
        _ => Err(crate::Error::abi(format!(
            "invalid bool word 0x{}",
            hex::encode(word)
        ))),
    }
}

fn decode_address(word: &[u8]) -> crate::Result<Address> {
    let (padding, address) = word.split_at(12);
    if padding.iter().any(|b| *b != 0) {
        return Err(crate::Error::abi(format!(
            "address word has dirty padding: 0x{}",
            hex::encode(word)
        )));
    }
    let mut bytes = [0; 20];
    bytes.copy_from_slice(address);
    Ok(Address(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(hex_words: &[&str]) -> Vec<u8> {
        hex_words
            .iter()
            .flat_map(|word| {
                let bytes = hex::decode(word).unwrap();
                let mut padded = vec![0; WORD - bytes.len()];
                padded.extend(bytes);
                padded
            })
            .collect()
    }

    #[test]
    fn well_known_selectors() {
        assert_eq!(selector("owner()"), [0x8d, 0xa5, 0xcb, 0x5b]);
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn encode_static_and_dynamic_arguments() {
        let encoded = encode(&[
            Token::from(7u64),
            Token::UintArray(vec![U256::from(1u64), U256::from(2u64)]),
        ]);
        assert_eq!(encoded, words(&["07", "40", "02", "01", "02"]));

        let encoded = encode(&[Token::String("abc".to_string()), Token::from(3600u64)]);
        let mut expected = words(&["40", "0e10", "03"]);
        let mut abc = b"abc".to_vec();
        abc.resize(WORD, 0);
        expected.extend(abc);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn decode_what_was_encoded() {
        let alice: Address = "0x00000000000000000000000000000000000a11ce".parse().unwrap();
        let data = encode(&[
            Token::Bool(true),
            Token::AddressArray(vec![alice, Address::ZERO]),
            Token::String("Weekend Warriors".to_string()),
        ]);
        let decoder = Decoder::new(&data);
        assert!(decoder.bool(0).unwrap());
        assert_eq!(decoder.address_array(1).unwrap(), vec![alice, Address::ZERO]);
        assert_eq!(decoder.string(2).unwrap(), "Weekend Warriors");
    }

    #[test]
    fn decode_string_array() {
        // ["ab", "c"]
        let mut data = words(&["20", "02", "40", "80", "02"]);
        let mut ab = b"ab".to_vec();
        ab.resize(WORD, 0);
        data.extend(ab);
        data.extend(words(&["01"]));
        let mut c = b"c".to_vec();
        c.resize(WORD, 0);
        data.extend(c);
        let names = vec!["ab".to_string(), "c".to_string()];
        assert_eq!(Decoder::new(&data).string_array(0).unwrap(), names);
        assert_eq!(encode(&[Token::StringArray(names)]), data);
    }

    #[test]
    fn reject_malformed_data() {
        let short = vec![0u8; 31];
        assert!(Decoder::new(&short).uint(0).is_err());
        assert!(Decoder::new(&short).expect_words(1).is_err());

        let not_bool = words(&["02"]);
        assert!(Decoder::new(&not_bool).bool(0).is_err());

        let dirty_address = words(&["ff0000000000000000000000000000000000000000000001"]);
        assert!(Decoder::new(&dirty_address).address(0).is_err());

        let bad_offset = words(&["0400"]);
        assert!(Decoder::new(&bad_offset).uint_array(0).is_err());

        let huge_length = words(&["20", "ffffffff"]);
        assert!(Decoder::new(&huge_length).address_array(0).is_err());

        let big = words(&["010000000000000000"]);
        assert!(Decoder::new(&big).u64(0).is_err());
    }
}

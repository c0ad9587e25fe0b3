#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

use fandraft_sdk::{
    abi::{encode, selector, Decoder, Selector, Token},
    client::now_unix,
    evm_utils::{
        client_traits::{ConfirmationConfig, RpcSender, RpcTransportStats},
        error::RpcErrorObject,
        types::parse_quantity,
        Address, Bytes, Chain, Error, Result as RpcResult, RpcRequest, U256,
    },
    types::{Player, PlayerStats, Position},
    Client, ClientOptions, CompleteRoster, ResolutionAbi, RosterSelector,
};
use serde_json::{json, Value};

pub const OWNER: &str = "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6";

pub fn address(byte: u8) -> Address {
    Address([byte; 20])
}

pub fn owner() -> Address {
    OWNER.parse().unwrap()
}

#[derive(Debug, Clone)]
pub struct LedgerDraft {
    pub name: String,
    pub is_active: bool,
    pub total_pool: U256,
    pub deadline: u64,
    pub participants: Vec<Address>,
    pub winners: Vec<Address>,
}

impl LedgerDraft {
    pub fn open(name: &str, hours: u64) -> Self {
        Self {
            name: name.to_string(),
            is_active: true,
            total_pool: U256::ZERO,
            deadline: now_unix() + hours * 3600,
            participants: Vec::new(),
            winners: Vec::new(),
        }
    }

    pub fn expired(name: &str) -> Self {
        Self {
            deadline: now_unix() - 60,
            ..Self::open(name, 0)
        }
    }

    pub fn resolved(name: &str, winner: Address) -> Self {
        Self {
            is_active: false,
            winners: vec![winner],
            ..Self::expired(name)
        }
    }

    pub fn with_participants(mut self, participants: &[Address]) -> Self {
        self.participants = participants.to_vec();
        self
    }
}

/// In-memory draft registry speaking JSON-RPC.
#[derive(Debug)]
pub struct Ledger {
    pub owner: Address,
    pub entry_fee: U256,
    pub platform_revenue: U256,
    pub drafts: Vec<LedgerDraft>,
    pub wins: HashMap<Address, u64>,
    pub stats: HashMap<Address, PlayerStats>,
    pub selections: HashMap<(u64, Address), Vec<u64>>,
    pub failing_drafts: HashSet<u64>,
    /// Addresses whose `totalWins` and `getLeaderboard` calls revert.
    pub failing_addresses: HashSet<Address>,
    pub accounts: Vec<Address>,
    pub chain_id: u64,
    pub wallet: bool,
    pub chain_known: bool,
    pub revert_next: bool,
    pub logs: Vec<Value>,
    pub calls: Vec<Selector>,
    pub requests: Vec<RpcRequest>,
    pub sent: Vec<(Selector, Option<U256>)>,
    pub receipts: HashMap<String, bool>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            owner: owner(),
            entry_fee: U256::from(25u64),
            platform_revenue: U256::ZERO,
            drafts: Vec::new(),
            wins: HashMap::new(),
            stats: HashMap::new(),
            selections: HashMap::new(),
            failing_drafts: HashSet::new(),
            failing_addresses: HashSet::new(),
            accounts: Vec::new(),
            chain_id: Chain::default().chain_id(),
            wallet: true,
            chain_known: true,
            revert_next: false,
            logs: Vec::new(),
            calls: Vec::new(),
            requests: Vec::new(),
            sent: Vec::new(),
            receipts: HashMap::new(),
        }
    }
}

impl Ledger {
    pub fn call_count(&self, signature: &str) -> usize {
        let selector = selector(signature);
        self.calls.iter().filter(|s| **s == selector).count()
    }

    /// Number of `eth_sendTransaction` requests, reverted ones included.
    pub fn transactions(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| **r == RpcRequest::SendTransaction)
            .count()
    }

    fn draft(&self, id: u64) -> RpcResult<&LedgerDraft> {
        if self.failing_drafts.contains(&id) {
            return Err(reverted("draft unavailable"));
        }
        id.checked_sub(1)
            .and_then(|index| self.drafts.get(index as usize))
            .ok_or_else(|| reverted("Draft does not exist"))
    }

    fn user(&self, address: Address) -> RpcResult<Address> {
        if self.failing_addresses.contains(&address) {
            return Err(reverted("user unavailable"));
        }
        Ok(address)
    }

    fn draft_mut(&mut self, id: u64) -> RpcResult<&mut LedgerDraft> {
        id.checked_sub(1)
            .and_then(|index| self.drafts.get_mut(index as usize))
            .ok_or_else(|| reverted("Draft does not exist"))
    }

    fn answer_call(&mut self, data: &[u8]) -> RpcResult<Vec<u8>> {
        let (sel, args) = split_call(data)?;
        self.calls.push(sel);
        let args = Decoder::new(args);
        let id = || args.u64(0).map_err(Error::custom);
        let tokens = if sel == selector("owner()") {
            vec![Token::Address(self.owner)]
        } else if sel == selector("draftCounter()") {
            vec![Token::from(self.drafts.len() as u64)]
        } else if sel == selector("entryFee()") {
            vec![Token::Uint(self.entry_fee)]
        } else if sel == selector("platformRevenue()") {
            vec![Token::Uint(self.platform_revenue)]
        } else if sel == selector("getDraft(uint256)") {
            let id = id()?;
            let draft = self.draft(id)?;
            vec![
                Token::from(id),
                Token::Bool(draft.is_active),
                Token::Uint(draft.total_pool),
                Token::from(draft.deadline),
            ]
        } else if sel == selector("getDraftName(uint256)") {
            vec![Token::String(self.draft(id()?)?.name.clone())]
        } else if sel == selector("getParticipants(uint256)") {
            vec![Token::AddressArray(self.draft(id()?)?.participants.clone())]
        } else if sel == selector("getDraftWinner(uint256)") {
            let draft = self.draft(id()?)?;
            vec![Token::Address(
                draft.winners.first().copied().unwrap_or(Address::ZERO),
            )]
        } else if sel == selector("getDraftWinners(uint256)") {
            let mut winners = self.draft(id()?)?.winners.clone();
            winners.resize(3, Address::ZERO);
            vec![Token::AddressArray(winners)]
        } else if sel == selector("getAllDraftNames()") {
            vec![Token::StringArray(
                self.drafts.iter().map(|draft| draft.name.clone()).collect(),
            )]
        } else if sel == selector("getPlayerSelection(uint256,address)") {
            let id = id()?;
            self.draft(id)?;
            let user = args.address(1).map_err(Error::custom)?;
            let ids = self.selections.get(&(id, user)).cloned().unwrap_or_default();
            vec![Token::UintArray(ids.into_iter().map(U256::from).collect())]
        } else if sel == selector("totalWins(address)") {
            let user = self.user(args.address(0).map_err(Error::custom)?)?;
            vec![Token::from(self.wins.get(&user).copied().unwrap_or_default())]
        } else if sel == selector("getLeaderboard(address)") {
            let user = self.user(args.address(0).map_err(Error::custom)?)?;
            let stats = self.stats.get(&user).cloned().unwrap_or_default();
            vec![
                Token::from(stats.total_games),
                Token::from(stats.wins),
                Token::Uint(stats.total_winnings),
                Token::from(stats.win_rate),
            ]
        } else {
            return Err(reverted("unknown selector"));
        };
        Ok(encode(&tokens))
    }

    fn apply(&mut self, from: Address, data: &[u8], value: Option<U256>) -> RpcResult<()> {
        let (sel, args) = split_call(data)?;
        self.sent.push((sel, value));
        let args = Decoder::new(args);
        if sel == selector("joinDraft(uint256,uint256[])") {
            let id = args.u64(0).map_err(Error::custom)?;
            let players = args
                .uint_array(1)
                .map_err(Error::custom)?
                .into_iter()
                .map(|id| id.to::<u64>())
                .collect();
            let fee = value.unwrap_or_default();
            let draft = self.draft_mut(id)?;
            draft.participants.push(from);
            draft.total_pool += fee;
            self.selections.insert((id, from), players);
        } else if sel == selector("createDraft(string,uint256)") {
            let name = args.string(0).map_err(Error::custom)?;
            let seconds = args.u64(1).map_err(Error::custom)?;
            self.drafts.push(LedgerDraft {
                name,
                is_active: true,
                total_pool: U256::ZERO,
                deadline: now_unix() + seconds,
                participants: Vec::new(),
                winners: Vec::new(),
            });
        } else if sel == selector("resolveDraft(uint256,address,uint256)") {
            let id = args.u64(0).map_err(Error::custom)?;
            let winner = args.address(1).map_err(Error::custom)?;
            let draft = self.draft_mut(id)?;
            draft.is_active = false;
            draft.winners = vec![winner];
            *self.wins.entry(winner).or_default() += 1;
        } else if sel == selector("changeEntryFee(uint256)") {
            self.entry_fee = args.uint(0).map_err(Error::custom)?;
        } else if sel == selector("withdrawRevenue()") {
            self.platform_revenue = U256::ZERO;
        } else {
            return Err(reverted("unknown selector"));
        }
        Ok(())
    }

    fn handle(&mut self, request: RpcRequest, params: Value) -> RpcResult<Value> {
        self.requests.push(request);
        match request {
            RpcRequest::Call => {
                let data: Bytes = params[0]["data"]
                    .as_str()
                    .ok_or_else(|| Error::custom("missing calldata"))?
                    .parse()?;
                let output = self.answer_call(data.as_slice())?;
                Ok(json!(Bytes::from(output).to_string()))
            }
            RpcRequest::SendTransaction => {
                let tx = &params[0];
                let from: Address = serde_json::from_value(tx["from"].clone())?;
                let data: Bytes = serde_json::from_value(tx["data"].clone())?;
                let value = match tx["value"].as_str() {
                    Some(value) => Some(parse_quantity(value)?),
                    None => None,
                };
                let hash = format!("0x{:064x}", self.receipts.len() + 1);
                let success = !std::mem::take(&mut self.revert_next);
                if success {
                    self.apply(from, data.as_slice(), value)?;
                }
                self.receipts.insert(hash.clone(), success);
                Ok(json!(hash))
            }
            RpcRequest::GetTransactionReceipt => {
                let hash = params[0].as_str().unwrap_or_default().to_string();
                Ok(match self.receipts.get(&hash) {
                    Some(success) => json!({
                        "transactionHash": hash,
                        "blockNumber": "0x10",
                        "status": if *success { "0x1" } else { "0x0" },
                        "logs": [],
                    }),
                    None => Value::Null,
                })
            }
            RpcRequest::GetLogs => Ok(Value::Array(self.logs.clone())),
            RpcRequest::GetBalance => Ok(json!("0xde0b6b3a7640000")),
            RpcRequest::ChainId => Ok(json!(format!("{:#x}", self.chain_id))),
            RpcRequest::Accounts => Ok(json!(self.accounts)),
            RpcRequest::RequestAccounts if self.wallet => Ok(json!(self.accounts)),
            RpcRequest::SwitchEthereumChain if self.wallet => {
                if !self.chain_known {
                    return Err(rpc_error(4902, "Unrecognized chain ID"));
                }
                Ok(Value::Null)
            }
            RpcRequest::AddEthereumChain if self.wallet => {
                self.chain_known = true;
                Ok(Value::Null)
            }
            _ => Err(rpc_error(-32601, "Method not found")),
        }
    }
}

fn rpc_error(code: i64, message: &str) -> Error {
    RpcErrorObject {
        code,
        message: message.to_string(),
        data: None,
    }
    .into()
}

fn reverted(reason: &str) -> Error {
    rpc_error(3, &format!("execution reverted: {reason}"))
}

fn split_call(data: &[u8]) -> RpcResult<(Selector, &[u8])> {
    if data.len() < 4 {
        return Err(reverted("missing selector"));
    }
    let mut sel = [0; 4];
    sel.copy_from_slice(&data[..4]);
    Ok((sel, &data[4..]))
}

/// Shared handle so tests can inspect and mutate the ledger behind a client.
#[derive(Debug, Clone, Default)]
pub struct MockLedger(pub Arc<Mutex<Ledger>>);

impl MockLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self(Arc::new(Mutex::new(ledger)))
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut Ledger) -> T) -> T {
        f(&mut self.0.lock().unwrap())
    }
}

impl RpcSender for MockLedger {
    async fn send(
        &self,
        request: RpcRequest,
        params: Value,
    ) -> RpcResult<Value> {
        self.with(|ledger| ledger.handle(request, params))
    }

    fn get_transport_stats(&self) -> RpcTransportStats {
        Default::default()
    }

    fn url(&self) -> String {
        "memory://ledger".to_string()
    }
}

pub fn client_with(
    ledger: &MockLedger,
    resolution: ResolutionAbi,
    account: Option<Address>,
) -> Client<MockLedger> {
    let options = ClientOptions::builder()
        .resolution(resolution)
        .account(account)
        .confirmation(ConfirmationConfig {
            poll_interval: Duration::from_millis(5),
            timeout: Some(Duration::from_secs(5)),
        })
        .build();
    Client::new_with_sender(ledger.clone(), Address([0xdd; 20]), options)
}

pub fn client(ledger: &MockLedger, account: Option<Address>) -> Client<MockLedger> {
    client_with(ledger, ResolutionAbi::SingleWinner, account)
}

pub fn catalog() -> Vec<Player> {
    let positions = [
        (Position::Goalkeeper, 2),
        (Position::Defender, 5),
        (Position::Midfielder, 4),
        (Position::Forward, 4),
    ];
    let mut id = 0;
    let mut players = Vec::new();
    for (position, count) in positions {
        for _ in 0..count {
            id += 1;
            players.push(Player {
                id,
                name: format!("Player {id}"),
                team: "Test FC".to_string(),
                position,
                points: 0,
                image_url: None,
            });
        }
    }
    players
}

/// 1 GK, 4 DEF, 3 MID and 3 FWD from [`catalog`].
pub fn roster() -> CompleteRoster {
    let ids = [1, 3, 4, 5, 6, 8, 9, 10, 12, 13, 14];
    RosterSelector::from_catalog(&catalog(), ids)
        .unwrap()
        .to_submission()
        .unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

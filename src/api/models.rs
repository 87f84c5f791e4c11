use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;

use crate::blockchain::{Block, Ledger, PreviousHash, ProofOfWork};
use crate::config::NodeConfig;
use crate::network::{ConsensusResolver, HttpPeerClient, NodeSet};
use crate::transaction::{Amount, Transaction};

/// Node state shared by all handlers: ledger, peers and mining settings.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub nodes: Mutex<NodeSet>,
    pub resolver: ConsensusResolver<HttpPeerClient>,
    pub pow: ProofOfWork,
    /// Raised to abort in-flight proof searches; reset when mining starts.
    pub mining_cancel: AtomicBool,
    pub node_id: String,
    pub mining_reward: u64,
}

impl AppState {
    pub fn new(config: &NodeConfig) -> Result<Self, reqwest::Error> {
        let pow = match config.pow_max_attempts {
            Some(max) => ProofOfWork::new().with_max_attempts(max),
            None => ProofOfWork::new(),
        };
        Ok(Self {
            ledger: Mutex::new(Ledger::new()),
            nodes: Mutex::new(NodeSet::new()),
            resolver: ConsensusResolver::new(HttpPeerClient::new(config.peer_timeout)?),
            pow,
            mining_cancel: AtomicBool::new(false),
            node_id: config.node_id.clone(),
            mining_reward: config.mining_reward,
        })
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub length: usize,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: PreviousHash,
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub message: &'static str,
}

/* ---------- TX API Models ---------- */

/// Fields are optional so that an absent one is reported as
/// "Missing values" rather than a generic parse error.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<Amount>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [Transaction],
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    #[serde(default)]
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub total: usize,
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_chain: Option<Vec<Block>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Vec<Block>>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub height: usize,
    pub pending_transactions: usize,
    pub peers: usize,
    pub tip_hash: String,
    pub tip_proof: u64,
    pub node_id: String,
}

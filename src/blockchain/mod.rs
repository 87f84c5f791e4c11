pub mod block;
pub mod codec;
pub mod model;
pub mod pow;
pub mod validator;

#[cfg(test)]
pub mod testutil;

pub use block::{Block, PreviousHash};
pub use model::Ledger;
pub use pow::ProofOfWork;
pub use validator::ChainValidator;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` of the genesis block. Not the hash of anything.
pub const GENESIS_PREVIOUS_HASH: u64 = 1;

/// Required hex prefix of `sha256("{last_proof}{proof}")`.
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Sender recorded on mining reward transactions.
pub const REWARD_SENDER: &str = "0";

/// Default reward paid to the mining node per block.
pub const DEFAULT_MINING_REWARD: u64 = 1;

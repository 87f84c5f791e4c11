use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::GENESIS_PREVIOUS_HASH;
use crate::transaction::Transaction;

/// Link to the preceding block. Genesis carries a bare integer sentinel,
/// every other block the hex digest of its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreviousHash {
    Sentinel(u64),
    Digest(String),
}

impl PreviousHash {
    pub fn genesis() -> Self {
        PreviousHash::Sentinel(GENESIS_PREVIOUS_HASH)
    }

    /// True only for a digest link equal to `digest`.
    pub fn links_to(&self, digest: &str) -> bool {
        matches!(self, PreviousHash::Digest(d) if d == digest)
    }
}

/// A sealed block. Immutable once appended to a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // seconds since the Unix epoch
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: PreviousHash,
}

impl Block {
    /// Build a block stamped with the current wall-clock time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: PreviousHash,
    ) -> Self {
        Self {
            index,
            timestamp: now_secs(),
            transactions,
            proof,
            previous_hash,
        }
    }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::{Block, PreviousHash};
    use crate::blockchain::codec;
    use crate::transaction::Transaction;

    #[test]
    fn genesis_link_serializes_as_bare_integer() {
        let json = serde_json::to_string(&PreviousHash::genesis()).unwrap();
        assert_eq!(json, "1");

        let back: PreviousHash = serde_json::from_str("1").unwrap();
        assert_eq!(back, PreviousHash::genesis());
    }

    #[test]
    fn digest_link_round_trips_from_peer_json() {
        let back: PreviousHash = serde_json::from_str(r#""abc123""#).unwrap();
        assert!(back.links_to("abc123"));
        assert!(!back.links_to("abc124"));
        assert!(!PreviousHash::genesis().links_to("1"));
    }

    #[test]
    fn new_block_is_stamped_with_current_time() {
        let b = Block::new(
            2,
            vec![Transaction::new("A", "B", 10.into())],
            35293,
            PreviousHash::Digest("prev".into()),
        );
        assert!(b.timestamp > 1_600_000_000.0);
        assert_eq!(b.transactions.len(), 1);
    }

    #[test]
    fn mutation_changes_hash() {
        let mut b = Block::new(
            2,
            vec![Transaction::new("A", "B", 10.into())],
            35293,
            PreviousHash::Digest("prev".into()),
        );
        let old_hash = codec::hash(&b);

        b.transactions[0].amount = 11.into();

        assert_ne!(old_hash, codec::hash(&b));
    }
}

use std::sync::Mutex;

use futures_util::future::join_all;
use log::{debug, info, warn};

use super::{ChainSnapshot, ChainSource};
use crate::blockchain::{Block, ChainValidator, Ledger};
use crate::error::PeerError;

/// Longest-valid-chain conflict resolution against a set of peers.
pub struct ConsensusResolver<S> {
    source: S,
}

impl<S: ChainSource> ConsensusResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Query every peer and adopt the longest valid chain if it is strictly
    /// longer than ours. Returns true when the local chain was replaced.
    ///
    /// Peers are queried and their chains validated with no lock held; the
    /// ledger lock is taken only to read the starting length and, at the
    /// end, to compare against the current length and swap.
    pub async fn resolve(&self, ledger: &Mutex<Ledger>, peers: &[String]) -> bool {
        let responses = join_all(peers.iter().map(|peer| self.source.fetch_chain(peer))).await;

        let snapshots: Vec<ChainSnapshot> = peers
            .iter()
            .zip(responses)
            .filter_map(|(peer, res)| match res.and_then(|snap| well_formed(peer, snap)) {
                Ok(snap) => Some(snap),
                Err(e) => {
                    warn!("CONSENSUS - skipping peer: {e}");
                    None
                }
            })
            .collect();

        let local_length = ledger.lock().expect("mutex poisoned").len();
        match Self::select(local_length, snapshots) {
            Some(chain) => Self::adopt(ledger, chain),
            None => {
                debug!("CONSENSUS - local chain ({local_length} blocks) is authoritative");
                false
            }
        }
    }

    /// Swap in an already validated chain unless the local one has caught up
    /// with it in the meantime.
    fn adopt(ledger: &Mutex<Ledger>, chain: Vec<Block>) -> bool {
        let mut ledger = ledger.lock().expect("mutex poisoned");
        if chain.len() <= ledger.len() {
            debug!(
                "CONSENSUS - local chain grew to {} blocks, keeping it over peer chain of {}",
                ledger.len(),
                chain.len()
            );
            return false;
        }
        info!(
            "CONSENSUS - adopting peer chain ({} blocks, ours {})",
            chain.len(),
            ledger.len()
        );
        ledger.replace_chain(chain);
        true
    }

    /// The reduction itself: starting from `local_length`, keep the first
    /// valid chain that is strictly longer than the best seen so far.
    pub fn select(
        local_length: usize,
        snapshots: impl IntoIterator<Item = ChainSnapshot>,
    ) -> Option<Vec<Block>> {
        let mut best_length = local_length;
        let mut best_chain = None;

        for snap in snapshots {
            if snap.length <= best_length {
                continue;
            }
            if !ChainValidator::is_valid(&snap.chain) {
                warn!("CONSENSUS - rejecting invalid chain of length {}", snap.length);
                continue;
            }
            best_length = snap.length;
            best_chain = Some(snap.chain);
        }

        best_chain
    }
}

/// A snapshot whose reported length disagrees with its blocks is malformed.
fn well_formed(peer: &str, snap: ChainSnapshot) -> Result<ChainSnapshot, PeerError> {
    if snap.length != snap.chain.len() {
        return Err(PeerError::LengthMismatch {
            peer: peer.to_string(),
            reported: snap.length,
            actual: snap.chain.len(),
        });
    }
    Ok(snap)
}

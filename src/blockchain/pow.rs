use std::sync::atomic::{AtomicBool, Ordering};

use super::{DIFFICULTY_PREFIX, codec};
use crate::error::PowError;

/// How often the search loop looks at the cancellation flag.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Proof-of-Work puzzle: find `p'` such that `sha256("{p}{p'}")` starts
/// with four hex zeros, where `p` is the previous block's proof.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProofOfWork {
    max_attempts: Option<u64>,
}

impl ProofOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop a [`search`](Self::search) after this many candidates.
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Unbounded search starting at 0. Returns the first valid proof.
    pub fn solve(last_proof: u64) -> u64 {
        let mut proof = 0u64;
        while !Self::is_valid(last_proof, proof) {
            proof += 1;
        }
        proof
    }

    /// Same search as [`solve`](Self::solve), but gives up when `cancel` is
    /// raised or the attempt cutoff is reached.
    pub fn search(&self, last_proof: u64, cancel: &AtomicBool) -> Result<u64, PowError> {
        let mut proof = 0u64;
        loop {
            if self.max_attempts.is_some_and(|max| proof >= max) {
                return Err(PowError::Exhausted { attempts: proof });
            }
            if proof % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
                return Err(PowError::Cancelled { attempts: proof });
            }
            if Self::is_valid(last_proof, proof) {
                return Ok(proof);
            }
            proof += 1;
        }
    }

    /// Difficulty predicate. The decimal concatenation without separator and
    /// the four-zero prefix must match every other node bit for bit.
    pub fn is_valid(last_proof: u64, proof: u64) -> bool {
        let guess = format!("{last_proof}{proof}");
        codec::sha256_hex(guess.as_bytes()).starts_with(DIFFICULTY_PREFIX)
    }
}

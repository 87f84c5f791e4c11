use log::debug;

use super::{Block, ProofOfWork, codec};

pub struct ChainValidator;

impl ChainValidator {
    /// Check hash linkage and proof pairs of a detached chain.
    ///
    /// Genesis is taken as given. A chain of one block is valid; an empty
    /// chain is not, since there is nothing to build on. The tip's body is
    /// not sealed by any successor, so only its link and proof are checked.
    pub fn is_valid(chain: &[Block]) -> bool {
        if chain.is_empty() {
            return false;
        }

        for pair in chain.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);

            let prev_hash = codec::hash(prev);
            if !cur.previous_hash.links_to(&prev_hash) {
                debug!(
                    "block #{} does not link to #{} (expected {})",
                    cur.index, prev.index, prev_hash
                );
                return false;
            }

            if !ProofOfWork::is_valid(prev.proof, cur.proof) {
                debug!(
                    "block #{} carries invalid proof {} over {}",
                    cur.index, cur.proof, prev.proof
                );
                return false;
            }
        }

        true
    }
}

use super::{Block, Ledger, ProofOfWork};

/// Ledger with `extra_blocks` mined on top of genesis, one transaction each.
pub fn mined_ledger(extra_blocks: usize) -> Ledger {
    let mut ledger = Ledger::new();
    for i in 0..extra_blocks {
        ledger.new_transaction("A", "B", (i as u64 + 1).into());
        mine(&mut ledger);
    }
    ledger
}

pub fn mined_chain(extra_blocks: usize) -> Vec<Block> {
    mined_ledger(extra_blocks).chain().to_vec()
}

pub fn mine(ledger: &mut Ledger) -> Block {
    let last_proof = ledger.tip().expect("genesis").proof;
    let proof = ProofOfWork::solve(last_proof);
    ledger.forge(proof).expect("genesis")
}

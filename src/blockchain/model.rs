use log::info;

use super::{Block, ChainValidator, GENESIS_PROOF, PreviousHash, codec};
use crate::error::LedgerError;
use crate::transaction::{Amount, Transaction};

/// In-memory chain plus the buffer of transactions waiting to be mined.
///
/// The ledger itself does no locking; the node wraps it in a single mutex
/// so that building a block from the buffer, appending it and clearing the
/// buffer happen as one step.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a ledger holding only the genesis block.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            pending: Vec::new(),
        };
        ledger.new_block(GENESIS_PROOF, PreviousHash::genesis());
        ledger
    }

    /// Seal the whole pending buffer into a new block and append it.
    pub fn new_block(&mut self, proof: u64, previous_hash: PreviousHash) -> Block {
        let index = self.chain.len() as u64 + 1;
        let transactions = std::mem::take(&mut self.pending);
        let block = Block::new(index, transactions, proof, previous_hash);
        self.chain.push(block.clone());
        block
    }

    /// Seal a block on top of the current tip with an already solved proof.
    pub fn forge(&mut self, proof: u64) -> Result<Block, LedgerError> {
        let previous_hash = codec::hash(self.tip()?);
        Ok(self.new_block(proof, PreviousHash::Digest(previous_hash)))
    }

    /// Buffer a transaction. Returns the index of the block that will hold it.
    pub fn new_transaction(
        &mut self,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        amount: Amount,
    ) -> u64 {
        self.pending.push(Transaction::new(sender, recipient, amount));
        self.next_index()
    }

    /// Return the last block in the chain.
    pub fn tip(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    pub fn next_index(&self) -> u64 {
        self.tip().map(|b| b.index).unwrap_or(0) + 1
    }

    /// Swap in a chain adopted from a peer. The old chain and the pending
    /// buffer are dropped; no merge is attempted.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        info!(
            "LEDGER - replacing chain of {} blocks with {} blocks (dropping {} pending txs)",
            self.chain.len(),
            chain.len(),
            self.pending.len()
        );
        self.chain = chain;
        self.pending.clear();
    }

    /// Validate our own chain with the same rules applied to peers.
    pub fn is_valid(&self) -> bool {
        ChainValidator::is_valid(&self.chain)
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }
}

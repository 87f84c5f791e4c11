use actix_web::{HttpResponse, get, post, route, web};
use log::{debug, info, warn};
use std::sync::atomic::Ordering;
use std::time::Instant;

use super::models::{AppState, CancelResponse, ChainResponse, MineResponse, ValidateResponse};
use crate::blockchain::{Block, REWARD_SENDER, codec};
use crate::error::ApiError;

/// Get the full blockchain. This is also what peers fetch during resolution.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> HttpResponse {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        length: ledger.len(),
        chain: ledger.chain(),
    })
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> HttpResponse {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: ledger.is_valid(),
        length: ledger.len(),
    })
}

/// Mine a new block from the pending buffer:
/// - Solve PoW over the tip's proof on the blocking pool (no lock held)
/// - Re-check that the tip did not move meanwhile
/// - Inject the reward transaction and seal
#[route("/mine/", method = "GET", method = "POST")]
pub async fn mine_block(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let (last_proof, tip_hash) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        let tip = ledger.tip()?;
        (tip.proof, codec::hash(tip))
    };

    state.mining_cancel.store(false, Ordering::SeqCst);
    let worker = state.clone();
    let t0 = Instant::now();
    let proof = web::block(move || worker.pow.search(last_proof, &worker.mining_cancel))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    debug!(
        "MINER - proof {} over {} found in {:?}",
        proof,
        last_proof,
        t0.elapsed()
    );

    let block = seal_mined_block(&state, &tip_hash, proof)?;
    info!(
        "MINER - sealed block #{} (proof={}, txs={})",
        block.index,
        block.proof,
        block.transactions.len()
    );

    Ok(HttpResponse::Ok().json(MineResponse {
        message: "New Block Forged",
        index: block.index,
        transactions: block.transactions,
        proof: block.proof,
        previous_hash: block.previous_hash,
    }))
}

/// Raise the cancellation flag for proof searches in flight.
#[post("/mine/cancel/")]
pub async fn cancel_mining(state: web::Data<AppState>) -> HttpResponse {
    state.mining_cancel.store(true, Ordering::SeqCst);
    info!("MINER - cancellation requested");
    HttpResponse::Ok().json(CancelResponse {
        message: "Mining cancellation requested",
    })
}

/// Append a block for `proof` if the tip is still the one it was solved
/// against. The reward is only paid once the block is accepted.
fn seal_mined_block(state: &AppState, tip_hash: &str, proof: u64) -> Result<Block, ApiError> {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    if codec::hash(ledger.tip()?) != tip_hash {
        warn!("MINER - stale proof {}: tip moved while searching", proof);
        return Err(ApiError::StaleTip);
    }
    ledger.new_transaction(REWARD_SENDER, &state.node_id, state.mining_reward.into());
    Ok(ledger.forge(proof)?)
}

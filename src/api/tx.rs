use actix_web::{HttpResponse, get, post, web};
use log::debug;

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};
use crate::error::ApiError;
use crate::transaction::amount_in_range;

/// Buffer a transaction for the next mined block. Amounts and parties are
/// not checked beyond being present and well typed.
#[post("/transactions/new/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> Result<HttpResponse, ApiError> {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();
    let (Some(sender), Some(recipient), Some(amount)) = (sender, recipient, amount) else {
        return Err(ApiError::BadRequest("Missing values".into()));
    };
    if !amount_in_range(&amount) {
        return Err(ApiError::BadRequest(format!("Amount {amount} is out of range")));
    }

    let index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.new_transaction(sender, recipient, amount)
    };
    debug!("POST /transactions/new/ - queued for block #{}", index);

    Ok(HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    }))
}

/// Transactions waiting to be mined.
#[get("/transactions/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> HttpResponse {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(PendingResponse {
        size: ledger.pending().len(),
        transactions: ledger.pending(),
    })
}

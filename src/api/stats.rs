use actix_web::{HttpResponse, get, web};

use super::models::{AppState, StatsResponse};
use crate::blockchain::codec;
use crate::error::ApiError;

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    // Snapshot the ledger first, then the peer count (short, separate locks)
    let (height, pending_transactions, tip_hash, tip_proof) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        let tip = ledger.tip()?;
        (
            ledger.len(),
            ledger.pending().len(),
            codec::hash(tip),
            tip.proof,
        )
    };
    let peers = state.nodes.lock().expect("mutex poisoned").len();

    Ok(HttpResponse::Ok().json(StatsResponse {
        height,
        pending_transactions,
        peers,
        tip_hash,
        tip_proof,
        node_id: state.node_id.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::Value;

    use crate::api::{AppState, init_routes};
    use crate::blockchain::codec;
    use crate::config::NodeConfig;

    #[actix_web::test]
    async fn stats_describe_tip_and_buffers() {
        let state = web::Data::new(AppState::new(&NodeConfig::default()).unwrap());
        let genesis_hash = {
            let mut ledger = state.ledger.lock().unwrap();
            ledger.new_transaction("A", "B", 3.into());
            codec::hash(ledger.tip().unwrap())
        };
        state.nodes.lock().unwrap().register("peer:5000").unwrap();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/stats/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["height"], 1);
        assert_eq!(body["pending_transactions"], 1);
        assert_eq!(body["peers"], 1);
        assert_eq!(body["tip_hash"], genesis_hash.as_str());
        assert_eq!(body["tip_proof"], 100);
        assert_eq!(body["node_id"], state.node_id.as_str());
    }

    #[actix_web::test]
    async fn health_is_plain_text() {
        let state = web::Data::new(AppState::new(&NodeConfig::default()).unwrap());
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/health/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}

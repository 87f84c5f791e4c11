use actix_web::{HttpResponse, get, post, web};
use log::info;

use super::models::{
    AppState, NodesResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse,
};
use crate::error::ApiError;

/// Register peer nodes. Every address must be valid or none is added.
#[post("/nodes/register/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> Result<HttpResponse, ApiError> {
    if body.nodes.is_empty() {
        return Err(ApiError::BadRequest("Error: Please supply a valid list of nodes".into()));
    }

    let total_nodes = {
        let mut nodes = state.nodes.lock().expect("mutex poisoned");
        let added = nodes.register_all(&body.nodes)?;
        info!("NODES - registered {:?} ({} known)", added, nodes.len());
        nodes.to_vec()
    };

    Ok(HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added",
        total_nodes,
    }))
}

#[get("/nodes/")]
pub async fn list_nodes(state: web::Data<AppState>) -> HttpResponse {
    let nodes = state.nodes.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(NodesResponse {
        total: nodes.len(),
        nodes: nodes.to_vec(),
    })
}

/// Run conflict resolution against every registered peer.
#[get("/nodes/resolve/")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> HttpResponse {
    let peers = state.nodes.lock().expect("mutex poisoned").to_vec();
    let replaced = state.resolver.resolve(&state.ledger, &peers).await;
    let chain = state.ledger.lock().expect("mutex poisoned").chain().to_vec();

    let resp = if replaced {
        ResolveResponse {
            message: "Our chain was replaced",
            new_chain: Some(chain),
            chain: None,
        }
    } else {
        ResolveResponse {
            message: "Our chain is authoritative",
            new_chain: None,
            chain: Some(chain),
        }
    };
    HttpResponse::Ok().json(resp)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};

    use crate::api::{AppState, init_routes};
    use crate::config::NodeConfig;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(&NodeConfig::default()).unwrap())
    }

    #[actix_web::test]
    async fn register_normalizes_and_deduplicates() {
        let state = state();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/nodes/register/")
            .set_json(json!({
                "nodes": ["http://192.168.0.5:5000", "192.168.0.5:5000", "node-b:5001"]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;

        assert_eq!(body["message"], "New nodes have been added");
        assert_eq!(body["total_nodes"], json!(["192.168.0.5:5000", "node-b:5001"]));

        let req = test::TestRequest::get().uri("/api/v1/nodes/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 2);
    }

    #[actix_web::test]
    async fn register_without_nodes_is_rejected() {
        let app = test::init_service(App::new().app_data(state()).configure(init_routes)).await;

        for payload in [json!({}), json!({"nodes": []})] {
            let req = test::TestRequest::post()
                .uri("/api/v1/nodes/register/")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn register_with_invalid_address_adds_nothing() {
        let state = state();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/nodes/register/")
            .set_json(json!({"nodes": ["a:5000", "http://"]}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(state.nodes.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn resolve_without_peers_keeps_local_chain() {
        let app = test::init_service(App::new().app_data(state()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/nodes/resolve/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["message"], "Our chain is authoritative");
        assert_eq!(body["chain"].as_array().map(Vec::len), Some(1));
        assert!(body.get("new_chain").is_none());
    }

    #[actix_web::test]
    async fn resolve_skips_unreachable_peer() {
        let state = state();
        state.nodes.lock().unwrap().register("127.0.0.1:9").unwrap();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/nodes/resolve/").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(state.ledger.lock().unwrap().len(), 1);
    }
}

mod chain;
mod health;
pub mod models;
mod nodes;
mod stats;
mod tx;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

use crate::error::ApiError;

pub fn init_routes(cfg: &mut ServiceConfig) {
    let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("invalid request body: {err}")).into()
    });

    cfg.service(
        web::scope("/api/v1")
            .app_data(json_cfg)
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(chain::mine_block)
            .service(chain::cancel_mining)
            .service(tx::post_transaction)
            .service(tx::get_pending)
            .service(nodes::register_nodes)
            .service(nodes::list_nodes)
            .service(nodes::resolve_conflicts)
            .service(stats::get_stats),
    );
}

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all LRL endpoints.
pub fn build_router(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        .route("/v1/health", get(handler::health))
        .route("/v1/info", get(handler::info))
        .route(
            "/v1/properties",
            get(handler::list_properties).post(handler::register_property),
        )
        .route("/v1/properties/:id", get(handler::get_property))
        .route("/v1/properties/:id/verify", post(handler::verify_property))
        .route(
            "/v1/properties/:id/transfer",
            post(handler::transfer_ownership),
        )
        .route("/v1/properties/:id/history", get(handler::property_history))
        .route(
            "/v1/properties/:id/advisory",
            get(handler::property_advisory),
        )
        .route("/v1/transactions", get(handler::all_transactions))
        .route(
            "/v1/transactions/:reference",
            get(handler::transaction_by_ref),
        )
        .route(
            "/v1/addresses/:address/properties",
            get(handler::owner_properties),
        )
        .route(
            "/v1/addresses/:address/transactions",
            get(handler::address_transactions),
        )
        .route(
            "/v1/profiles/:address",
            get(handler::get_profile).put(handler::put_profile),
        )
        .route("/v1/documents", post(handler::upload_document))
        .route("/v1/documents/:reference", get(handler::get_document))
        .route("/v1/stats", get(handler::stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

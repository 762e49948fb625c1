use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{sellers, token},
    AppState,
};

// Collection routes answer with and without the trailing slash.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/seller",
            post(sellers::create_seller).get(sellers::list_sellers),
        )
        .route(
            "/api/v1/seller/",
            post(sellers::create_seller).get(sellers::list_sellers),
        )
        .route(
            "/api/v1/seller/:seller_id",
            get(sellers::get_seller)
                .put(sellers::update_seller)
                .delete(sellers::delete_seller),
        )
        .route("/api/v1/token", post(token::issue_token))
        .route("/api/v1/token/", post(token::issue_token))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Account CRUD endpoints.
//!
//! # Routes
//! ```text
//! POST   /accounts        {owner, currency}         → 201
//! GET    /accounts/{id}                             → 302
//! GET    /accounts        ?page_id=&page_size=      → 302
//! PUT    /accounts        {id, balance}             → 302
//! DELETE /accounts/{id}                             → 200
//! ```

pub mod handlers;
pub mod requests;

use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::http::server::AppState;
use crate::observability::metrics::track_metrics;
use self::handlers::*;

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts",
            get(list_accounts).post(create_account).put(update_account),
        )
        .route("/accounts/{id}", get(get_account).delete(delete_account))
        .route("/health", get(health))
        .route_layer(middleware::from_fn(track_metrics))
}

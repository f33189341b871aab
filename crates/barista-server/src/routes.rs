//! Route table for the drinks API.

use axum::http::{Method, header};
use axum::routing::{delete, get, patch, post};
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error;
use crate::handlers;
use crate::middleware::auth::{Permission, authorize};
use crate::state::AppState;

/// Build the API router.
///
/// `GET /drinks` is public; every other route is wrapped in a permission
/// guard. The delete guard takes its permission from configuration, the rest
/// are fixed.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/drinks", get(handlers::list_drinks))
        .route(
            "/drinks",
            post(handlers::create_drink).route_layer(middleware::from_fn_with_state(
                (state.clone(), Permission::new("post:drinks")),
                authorize,
            )),
        )
        .route(
            "/drinks-detail",
            get(handlers::drinks_detail).route_layer(middleware::from_fn_with_state(
                (state.clone(), Permission::new("get:drinks-detail")),
                authorize,
            )),
        )
        .route(
            "/drinks/{id}",
            patch(handlers::update_drink).route_layer(middleware::from_fn_with_state(
                (state.clone(), Permission::new("patch:drinks")),
                authorize,
            )),
        )
        .route(
            "/drinks/{id}",
            delete(handlers::delete_drink).route_layer(middleware::from_fn_with_state(
                (state.clone(), Permission::new(state.delete_permission())),
                authorize,
            )),
        )
        .fallback(error::not_found)
        .method_not_allowed_fallback(error::method_not_allowed)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;

use crate::middleware::logging::log_request;
use crate::server::extract::AppState;
use crate::server::handlers;

/// Build the axum router with all image endpoints.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_size_bytes();

    Router::new()
        .route(
            "/images",
            get(handlers::list_images).post(handlers::upload_image),
        )
        .route(
            "/image/:file_name",
            get(handlers::fetch_image)
                .patch(handlers::modify_image)
                .delete(handlers::delete_image),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

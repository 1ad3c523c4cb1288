pub mod middleware;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::api::middleware::require_token;
use crate::service::image::{
    get_image_handler, get_latest_handler, list_images_handler, serve_index, upload_handler,
};
use crate::utils::state::AppState;

/// Uploads are buffered in memory; this bounds a single capture frame.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/latest", get(get_latest_handler))
        .route("/images", get(list_images_handler))
        .route("/images/{name}", get(get_image_handler))
        .route(
            "/upload",
            post(upload_handler).layer(axum::middleware::from_fn_with_state(
                state.clone(),
                require_token,
            )),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

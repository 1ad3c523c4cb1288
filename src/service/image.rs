use crate::error::AppError;
use crate::storage::paths::is_image_name;
use crate::utils::state::AppState;
use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{Response, StatusCode, header};
use axum::response::{Html, IntoResponse};
use serde::Serialize;
use std::sync::Arc;
use tokio::io;
use tokio_util::io::ReaderStream;

/// Listing cap for `GET /images`.
const MAX_LISTING: usize = 10;

#[derive(Serialize)]
pub struct UploadResponse {
    pub filename: String,
}

#[derive(Serialize)]
pub struct ImageListResponse {
    pub images: Vec<ImageItem>,
}

#[derive(Serialize)]
pub struct ImageItem {
    pub name: String,
    pub size: u64,
}

/// Handles `POST /upload`.
///
/// Accepts the raw image bytes, generates the next canonical filename
/// and stores the payload atomically. Auth is enforced by middleware
/// before this handler runs. An empty body is rejected without touching
/// the filesystem.
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    if body.is_empty() {
        return Err(AppError::EmptyBody);
    }

    let filename = state.next_image_name();
    state.storage.write_image(&filename, &body).await?;
    tracing::info!(filename = %filename, bytes = body.len(), "stored image");

    Ok(Json(UploadResponse { filename }))
}

/// Handles `GET /latest`.
///
/// The naming scheme sorts by creation time, so the lexicographically
/// last entry is the newest image.
pub async fn get_latest_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let entries = state.storage.list_images().await?;
    let Some(entry) = entries.last() else {
        return Err(AppError::NoImages);
    };
    serve_image(&state, &entry.name).await
}

/// Handles `GET /images`.
///
/// Returns up to ten entries, newest first. A snapshot taken at call
/// time; an empty directory yields an empty list, never an error.
pub async fn list_images_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let mut entries = state.storage.list_images().await?;
    entries.reverse();
    entries.truncate(MAX_LISTING);

    let images = entries
        .into_iter()
        .map(|entry| ImageItem {
            name: entry.name,
            size: entry.size,
        })
        .collect();
    Ok(Json(ImageListResponse { images }))
}

/// Handles `GET /images/{name}`.
pub async fn get_image_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !is_image_name(&name) {
        return Err(AppError::NameInvalid(name));
    }
    serve_image(&state, &name).await
}

/// Handles `GET /`.
pub async fn serve_index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

async fn serve_image(state: &AppState, name: &str) -> Result<Response<Body>, AppError> {
    let file = state.storage.read_image(name).await.map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            AppError::ImageUnknown(name.to_string())
        } else {
            AppError::Storage(err)
        }
    })?;
    let content_length = file.metadata().await?.len();
    let body = Body::from_stream(ReaderStream::new(file));

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(header::CONTENT_LENGTH, content_length)
        .body(body)
        .unwrap())
}

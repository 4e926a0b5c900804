use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use mime_guess::from_path;
use rust_embed::RustEmbed;
use std::path::PathBuf;

#[derive(RustEmbed)]
#[folder = "frontend"]
pub struct Assets;

/// Serve the dashboard from the static directory or embedded assets
pub async fn serve_static(uri: Uri, static_dir: Option<String>) -> Response {
    let path = uri.path().trim_start_matches('/');

    // Unknown API routes should not fall through to the dashboard
    if path == "api" || path.starts_with("api/") {
        return (StatusCode::NOT_FOUND, "404 Not Found").into_response();
    }

    if let Some(ref dir) = static_dir {
        if !path.split('/').any(|segment| segment == "..") {
            let file = if path.is_empty() { "index.html" } else { path };
            let file_path = PathBuf::from(dir).join(file);
            if let Ok(content) = tokio::fs::read(&file_path).await {
                let mime_type = from_path(&file_path).first_or_octet_stream();
                return (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, mime_type.as_ref().to_string())],
                    content,
                )
                    .into_response();
            }
        }
    }

    serve_embedded(path)
}

fn serve_embedded(path: &str) -> Response {
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(content) => {
            let mime = from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => {
            // Paths without an extension get the dashboard itself
            if !path.contains('.') {
                if let Some(index) = Assets::get("index.html") {
                    return (
                        StatusCode::OK,
                        [(header::CONTENT_TYPE, "text/html".to_string())],
                        index.data.into_owned(),
                    )
                        .into_response();
                }
            }
            (StatusCode::NOT_FOUND, "404 Not Found").into_response()
        }
    }
}

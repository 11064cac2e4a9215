use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

const ENTRY_DOCUMENT: &str = "/index.html";

/// Serves the single-page application out of a directory on disk.
#[derive(Debug, Clone)]
pub(crate) struct AssetRoot {
    root: PathBuf,
}

/// Maps a request path onto the file that answers it: the entry document for
/// the root and for client-side routes, the path itself for `/api/` and
/// `/static/`.
pub(crate) fn rewrite_path(path: &str) -> &str {
    if path.is_empty() || path == "/" {
        return ENTRY_DOCUMENT;
    }
    if path.starts_with("/api/") || path.starts_with("/static/") {
        return path;
    }
    ENTRY_DOCUMENT
}

impl AssetRoot {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Percent-decodes the path, then accepts only plain relative components,
    /// so nothing outside the root can be addressed.
    fn locate(&self, request_path: &str) -> Option<PathBuf> {
        let decoded = urlencoding::decode(request_path).ok()?;
        let relative = Path::new(decoded.trim_start_matches('/'));
        let mut components = relative.components().peekable();
        components.peek()?;
        if components.any(|component| !matches!(component, Component::Normal(_))) {
            return None;
        }
        Some(self.root.join(relative))
    }

    pub(crate) async fn respond(&self, method: &Method, path: &str) -> Response {
        if method == Method::OPTIONS {
            return StatusCode::NO_CONTENT.into_response();
        }
        if method != Method::GET && method != Method::HEAD {
            return StatusCode::METHOD_NOT_ALLOWED.into_response();
        }

        let Some(file) = self.locate(rewrite_path(path)) else {
            return not_found();
        };

        match tokio::fs::metadata(&file).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return not_found(),
            Err(err) if err.kind() == ErrorKind::NotFound => return not_found(),
            Err(err) => return read_failure(&file, err),
        }

        match tokio::fs::read(&file).await {
            Ok(bytes) => {
                let mime = mime_guess::from_path(&file).first_or_octet_stream();
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, mime.essence_str().to_string())],
                    bytes,
                )
                    .into_response()
            }
            Err(err) if err.kind() == ErrorKind::NotFound => not_found(),
            Err(err) => read_failure(&file, err),
        }
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn read_failure(file: &Path, err: std::io::Error) -> Response {
    warn!(file = %file.display(), error = %err, "failed to read static asset");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// JSON body rendered with two-space indentation and an explicit length.
#[derive(Debug, Clone)]
pub struct PrettyJson<T>(pub StatusCode, pub T);

impl<T> PrettyJson<T> {
    pub fn ok(value: T) -> Self {
        Self(StatusCode::OK, value)
    }
}

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        let PrettyJson(status, value) = self;
        match serde_json::to_vec_pretty(&value) {
            Ok(body) => {
                let length = HeaderValue::from(body.len());
                (
                    status,
                    [
                        (
                            header::CONTENT_TYPE,
                            HeaderValue::from_static(JSON_CONTENT_TYPE),
                        ),
                        (header::CONTENT_LENGTH, length),
                    ],
                    body,
                )
                    .into_response()
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response body");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

//! HTML fragments for browser callers of the dual-mode endpoints.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::error::ApiError;

/// A status line wrapped in a `<div>`.
pub fn fragment(status: StatusCode, class: &str, message: &str) -> Response {
    (
        status,
        Html(format!(r#"<div class="{class}">{}</div>"#, escape(message))),
    )
        .into_response()
}

/// An error rendered as a fragment with the status the JSON API would use.
pub fn error_fragment(err: ApiError) -> Response {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!(kind = %err.0.kind, error = %err.0, "Internal server error");
    }
    fragment(status, "alert alert-error", &err.public_message())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

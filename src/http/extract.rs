//! Request extractors.

use axum::extract::FromRequest;

use crate::http::error::ApiError;

/// `axum::Json` whose rejections render as an [`ApiError`] body instead of
/// axum's plain-text responses. An oversized body stays a 413; every other
/// rejection becomes a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Parse a raw `{id}` path segment. Only the canonical decimal form names a
/// row (no `+` sign, no leading zeros); callers turn `None` into their
/// resource's 404.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| id.to_string() == raw)
}

//! `If-Match` header parsing.

use axum::http::header::IF_MATCH;
use axum::http::HeaderMap;

use crate::service::ServiceError;

/// Read the expected version from a request's `If-Match` header.
///
/// Accepts a bare decimal (`3`), the quoted entity tag previously handed out
/// as `ETag` (`"3"`), or its weak form (`W/"3"`). Any integer is accepted,
/// including negative ones, which simply never match a stored version.
pub fn expected_version(headers: &HeaderMap) -> Result<i64, ServiceError> {
    let value = headers
        .get(IF_MATCH)
        .ok_or_else(|| ServiceError::BadRequest("missing If-Match header".into()))?;

    let raw = value
        .to_str()
        .map_err(|_| ServiceError::BadRequest("If-Match is not valid ASCII".into()))?;

    parse_version(raw)
        .ok_or_else(|| ServiceError::BadRequest(format!("invalid If-Match version: {}", raw)))
}

fn parse_version(raw: &str) -> Option<i64> {
    let tag = raw.trim();
    let tag = tag.strip_prefix("W/").unwrap_or(tag);
    let tag = match tag.strip_prefix('"') {
        Some(rest) => rest.strip_suffix('"')?,
        None => tag,
    };

    tag.parse().ok()
}

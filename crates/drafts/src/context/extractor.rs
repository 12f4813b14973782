//! Axum extractor for RequestContext.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use drafts_core::records::OwnerId;
use uuid::Uuid;

use super::types::{RequestContext, RequestId};
use crate::state::AppState;

pub const OWNER_HEADER: &str = "x-owner-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn extract_owner(headers: &HeaderMap, default_owner: &OwnerId) -> OwnerId {
    headers
        .get(OWNER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(OwnerId::from)
        .unwrap_or_else(|| default_owner.clone())
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let request_id = extract_request_id(&parts.headers);
        let owner = extract_owner(&parts.headers, &state.config.default_owner);

        let span = tracing::Span::current();
        span.record("owner", tracing::field::display(&owner));
        span.record("request_id", tracing::field::display(request_id));

        Ok(RequestContext { owner, request_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        let id = "550e8400-e29b-41d4-a716-446655440000";
        headers.insert(REQUEST_ID_HEADER, id.parse().unwrap());

        let request_id = extract_request_id(&headers);
        assert_eq!(request_id.to_string(), id);
    }

    #[test]
    fn test_extract_request_id_generates_when_invalid() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, "not-a-uuid".parse().unwrap());

        let request_id = extract_request_id(&headers);

        Uuid::parse_str(&request_id.to_string()).expect("Should be valid UUID");
    }

    #[test]
    fn test_extract_owner_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(OWNER_HEADER, " someone ".parse().unwrap());

        let owner = extract_owner(&headers, &OwnerId::from("abw"));
        assert_eq!(owner.as_str(), "someone");
    }

    #[test]
    fn test_extract_owner_falls_back_to_default() {
        let default_owner = OwnerId::from("abw");

        assert_eq!(extract_owner(&HeaderMap::new(), &default_owner), default_owner);

        let mut headers = HeaderMap::new();
        headers.insert(OWNER_HEADER, "".parse().unwrap());
        assert_eq!(extract_owner(&headers, &default_owner), default_owner);
    }
}

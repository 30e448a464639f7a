//! Static bearer-token check.
//!
//! Runs before routing, so unknown endpoints are rejected with 401 as well.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::dto::response::UnauthorizedResponse;
use crate::messages;
use crate::state::AppState;

/// Reject requests whose `Authorization` header is not exactly the token.
///
/// The comparison is byte-for-byte: no `Bearer ` prefix handling, no trimming.
pub async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = state.config.auth.token.as_bytes();
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .is_some_and(|value| value.as_bytes() == expected);

    if authorized {
        return next.run(request).await;
    }

    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        has_header = request.headers().contains_key(AUTHORIZATION),
        "Rejected request with invalid token"
    );

    let body = UnauthorizedResponse {
        error: messages::INVALID_TOKEN,
        token: state
            .config
            .auth
            .echo_expected_token
            .then(|| state.config.auth.token.clone()),
        got: header_map(request.headers()),
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

/// Request headers as a name -> value map; repeated headers are joined.
fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        map.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_map_joins_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("wrong"));
        headers.append("accept", HeaderValue::from_static("text/html"));
        headers.append("accept", HeaderValue::from_static("application/json"));

        let map = header_map(&headers);
        assert_eq!(map["authorization"], "wrong");
        assert_eq!(map["accept"], "text/html, application/json");
    }
}

//! Authentication middleware for access token validation.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use teller_types::{BillerGateway, LedgerRepository};

use super::handlers::AppState;

/// Extracts the access token from the Authorization header.
/// Expected format: "Bearer <token>" or just "<token>"
fn extract_token(auth_header: Option<&str>) -> Option<&str> {
    let header = auth_header?;
    if header.starts_with("Bearer ") {
        Some(header.strip_prefix("Bearer ").unwrap())
    } else {
        Some(header)
    }
}

/// Authentication middleware that validates access tokens.
///
/// This middleware:
/// 1. Extracts the token from the Authorization header
/// 2. Hashes it using SHA-256
/// 3. Verifies the hash against the stored tokens
/// 4. Returns 401 Unauthorized if validation fails
///
/// Endpoints that bypass authentication:
/// - `/health` - Health check endpoint
/// - `POST /api/bootstrap` - Creates the first token (only works when no tokens exist)
/// - `/docs`, `/api-docs` - API documentation
pub async fn auth_middleware<R: LedgerRepository, G: BillerGateway>(
    State(state): State<Arc<AppState<R, G>>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if path == "/health" || path.starts_with("/docs") || path.starts_with("/api-docs") {
        return next.run(request).await;
    }

    // Bootstrap has its own protection (refuses once any token exists).
    if path == "/api/bootstrap" && request.method() == axum::http::Method::POST {
        return next.run(request).await;
    }

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match extract_token(auth_header) {
        Some(token) if !token.is_empty() => token,
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    let token_hash = teller_repo::security::hash_token(token);

    match state.service.repo().verify_token_hash(&token_hash).await {
        Ok(Some(_token)) => next.run(request).await,
        Ok(None) => unauthorized_response("Invalid access token"),
        Err(e) => {
            tracing::error!("Access token verification failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Internal server error",
                    "code": 500
                })),
            )
                .into_response()
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": message,
            "code": 401
        })),
    )
        .into_response()
}

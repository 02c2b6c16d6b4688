//! Authentication middleware
//!
//! Axum middleware for JWT authentication plus the admin capability
//! check used by the admin surface.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::AppError;

/// Routes reachable without a token.
///
/// The menu is world-readable, but only for reads; menu mutations fall
/// through to the admin checks.
fn is_public_route(method: &http::Method, path: &str) -> bool {
    if method == http::Method::OPTIONS {
        return true;
    }
    if path == "/health" || path == "/auth/login" || path == "/auth/register" {
        return true;
    }
    method == http::Method::GET && (path == "/menu" || path.starts_with("/menu/"))
}

/// Authentication middleware - requires a logged-in user
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`,
/// then injects [`CurrentUser`] into request extensions for handlers and
/// downstream checks.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public_route(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
        }
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::Unauthorized);
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

/// Admin capability check, composed before every admin operation.
///
/// Loads the caller's user record and inspects the `is_admin` flag; the
/// token claim alone is not trusted, so a demoted admin loses access the
/// moment the record changes.
pub async fn ensure_admin(state: &ServerState, user: &CurrentUser) -> Result<(), AppError> {
    let repo = UserRepository::new(state.get_db());
    let record = repo
        .find_by_id(&user.id)
        .await
        .map_err(AppError::from)?
        .ok_or(AppError::Unauthorized)?;

    if !record.is_admin {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            name = user.name.clone()
        );
        return Err(AppError::Forbidden("Admin role required".to_string()));
    }

    Ok(())
}

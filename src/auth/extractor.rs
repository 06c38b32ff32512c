use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::jwt;
use crate::db;
use crate::error::AppError;
use crate::models::Admin;
use crate::state::SharedState;

pub const ACCESS_COOKIE: &str = "access_token";

/// The signed-in admin, loaded fresh for each request.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub Admin);

fn bearer_token(parts: &Parts) -> Result<Option<String>, AppError> {
    let Some(header) = parts.headers.get("authorization") else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;
    Ok(value.strip_prefix("Bearer ").map(str::to_string))
}

impl FromRequestParts<SharedState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(parts)? {
            Some(token) => token,
            None => CookieJar::from_headers(&parts.headers)
                .get(ACCESS_COOKIE)
                .map(|c| c.value().to_string())
                .ok_or_else(|| {
                    AppError::Unauthorized("Missing authentication token".to_string())
                })?,
        };

        let claims = jwt::decode_token(&token, &state.config.jwt_secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        let admin = db::admins::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Admin no longer exists".to_string()))?;

        if admin.session_version != claims.ver {
            return Err(AppError::Unauthorized("Session has ended".to_string()));
        }

        Ok(AuthAdmin(admin))
    }
}

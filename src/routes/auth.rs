use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::extractor::{ACCESS_COOKIE, AuthAdmin};
use crate::auth::jwt::{Claims, TOKEN_TTL_HOURS, encode_token};
use crate::auth::password;
use crate::changes::{Dirty, RouteName};
use crate::db;
use crate::error::{AppError, conflict_on_unique};
use crate::models::Admin;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub admin: Admin,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn access_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((ACCESS_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(TOKEN_TTL_HOURS))
        .build()
}

fn issue(state: &SharedState, admin: Admin) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let access_token = encode_token(&Claims::for_admin(&admin), &state.config.jwt_secret)
        .map_err(AppError::Internal)?;
    let jar = CookieJar::new().add(access_cookie(&access_token));
    Ok((jar, Json(AuthResponse { access_token, admin })))
}

/// Create the first admin. Closed once any admin exists.
pub async fn register(
    State(state): State<SharedState>,
    route: RouteName,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if req.email.is_empty() || req.name.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }
    password::validate(&req.password).map_err(AppError::BadRequest)?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    // Advisory lock prevents concurrent bootstrap registrations
    let mut tx = state.pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(&mut *tx)
        .await?;

    if db::admins::count_all(&mut *tx).await? > 0 {
        return Err(AppError::Forbidden(
            "Registration is disabled. Ask an existing admin for an account.".to_string(),
        ));
    }

    let admin = db::admins::create(&mut *tx, &req.email, &pw_hash, &req.name)
        .await
        .map_err(|e| conflict_on_unique(e, "An admin with this email already exists"))?;

    tx.commit().await?;

    let ctx = route.context().with_actor(admin.clone());
    state
        .changes
        .handle(&Dirty::new(&admin, admin.attributes()), "eloquent.created", &ctx)
        .await?;

    tracing::info!(admin_id = %admin.id, "Bootstrap admin registered");

    issue(&state, admin)
}

pub async fn login(
    State(state): State<SharedState>,
    route: RouteName,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let admin = db::admins::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &admin.password_hash).map_err(AppError::Internal)?;
    if !valid {
        tracing::warn!(email = %req.email, "Failed login attempt");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let admin = db::admins::touch_login(&state.pool, admin.id).await?;

    let ctx = route.context().with_actor(admin.clone());
    state
        .changes
        .handle(
            &Dirty::new(&admin, json!({ "last_login_at": admin.last_login_at })),
            "eloquent.updated",
            &ctx,
        )
        .await?;

    issue(&state, admin)
}

pub async fn logout(
    AuthAdmin(admin): AuthAdmin,
    State(state): State<SharedState>,
    route: RouteName,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    let admin = db::admins::bump_session_version(&state.pool, admin.id).await?;

    let ctx = route.context().with_actor(admin.clone());
    state
        .changes
        .handle(
            &Dirty::new(&admin, json!({ "session_version": admin.session_version })),
            "eloquent.updated",
            &ctx,
        )
        .await?;

    let cleared = Cookie::build((ACCESS_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();

    Ok((
        CookieJar::new().add(cleared),
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    ))
}

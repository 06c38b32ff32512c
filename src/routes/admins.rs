use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthAdmin;
use crate::auth::password;
use crate::changes::{Dirty, RouteName};
use crate::db;
use crate::error::{AppError, conflict_on_unique};
use crate::models::Admin;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct UpdateAdmin {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

pub async fn list(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Admin>>, AppError> {
    let admins = db::admins::list(&state.pool).await?;
    Ok(Json(admins))
}

pub async fn get(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Admin>, AppError> {
    let admin = db::admins::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;
    Ok(Json(admin))
}

pub async fn create(
    AuthAdmin(actor): AuthAdmin,
    State(state): State<SharedState>,
    route: RouteName,
    Json(req): Json<CreateAdmin>,
) -> Result<Json<Admin>, AppError> {
    if req.email.is_empty() || req.name.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }
    password::validate(&req.password).map_err(AppError::BadRequest)?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let admin = db::admins::create(&state.pool, &req.email, &pw_hash, &req.name)
        .await
        .map_err(|e| conflict_on_unique(e, "An admin with this email already exists"))?;

    state
        .changes
        .handle(
            &Dirty::new(&admin, admin.attributes()),
            "eloquent.created",
            &route.context().with_actor(actor),
        )
        .await?;

    Ok(Json(admin))
}

pub async fn update(
    AuthAdmin(actor): AuthAdmin,
    State(state): State<SharedState>,
    route: RouteName,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAdmin>,
) -> Result<Json<Admin>, AppError> {
    // Hash outside the transaction so the row lock is held briefly
    let new_hash = match req.password {
        Some(ref pw) => {
            password::validate(pw).map_err(AppError::BadRequest)?;
            Some(password::hash(pw).map_err(AppError::Internal)?)
        }
        None => None,
    };

    let mut tx = state.pool.begin().await?;

    let before = db::admins::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

    let email = req.email.unwrap_or_else(|| before.email.clone());
    let name = req.name.unwrap_or_else(|| before.name.clone());
    if email.is_empty() || name.is_empty() {
        return Err(AppError::BadRequest("Email and name cannot be empty".to_string()));
    }
    let pw_hash = new_hash.unwrap_or_else(|| before.password_hash.clone());

    let after = db::admins::update(&mut *tx, id, &email, &name, &pw_hash)
        .await
        .map_err(|e| conflict_on_unique(e, "An admin with this email already exists"))?;

    tx.commit().await?;

    state
        .changes
        .handle(
            &Dirty::new(&after, before.diff(&after)),
            "eloquent.updated",
            &route.context().with_actor(actor),
        )
        .await?;

    Ok(Json(after))
}

pub async fn delete(
    AuthAdmin(actor): AuthAdmin,
    State(state): State<SharedState>,
    route: RouteName,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if actor.id == id {
        return Err(AppError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    let admin = db::admins::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Admin not found".to_string()))?;

    db::admins::delete(&state.pool, id).await?;

    state
        .changes
        .handle(&admin, "eloquent.deleted", &route.context().with_actor(actor))
        .await?;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

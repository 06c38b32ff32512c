use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthAdmin;
use crate::changes::ChangeAction;
use crate::db;
use crate::db::changes::ChangeFilter;
use crate::error::AppError;
use crate::models::Change;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListParams {
    pub model: Option<String>,
    pub key: Option<String>,
    pub action: Option<String>,
    pub admin_id: Option<Uuid>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

pub async fn list(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let action = match params.action.as_deref() {
        Some(a) => Some(
            ChangeAction::parse(a)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown action: {a}")))?,
        ),
        None => None,
    };

    let filter = ChangeFilter {
        model: params.model,
        key: params.key,
        action,
        admin_id: params.admin_id,
    };

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1)
        .checked_mul(per_page)
        .ok_or_else(|| AppError::BadRequest("Page out of range".to_string()))?;

    let changes = db::changes::list(&state.pool, &filter, per_page, offset).await?;
    let total = db::changes::count(&state.pool, &filter).await?;

    Ok(Json(serde_json::json!({
        "changes": changes,
        "total": total,
        "page": page,
        "per_page": per_page,
    })))
}

pub async fn get(
    _auth: AuthAdmin,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Change>, AppError> {
    let change = db::changes::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Change not found".to_string()))?;
    Ok(Json(change))
}

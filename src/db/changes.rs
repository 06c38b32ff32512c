use sqlx::PgPool;
use uuid::Uuid;

use crate::changes::ChangeAction;
use crate::models::Change;

pub struct NewChange<'a> {
    pub model: &'a str,
    pub key: &'a str,
    pub action: ChangeAction,
    pub title: Option<&'a str>,
    pub changed: Option<&'a serde_json::Value>,
    pub admin_id: Uuid,
}

#[derive(Debug, Default, Clone)]
pub struct ChangeFilter {
    pub model: Option<String>,
    pub key: Option<String>,
    pub action: Option<ChangeAction>,
    pub admin_id: Option<Uuid>,
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    change: &NewChange<'_>,
) -> Result<Change, sqlx::Error> {
    sqlx::query_as::<_, Change>(
        "INSERT INTO changes (model, key, action, title, changed, admin_id)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(change.model)
    .bind(change.key)
    .bind(change.action.as_str())
    .bind(change.title)
    .bind(change.changed)
    .bind(change.admin_id)
    .fetch_one(executor)
    .await
}

/// Flag every change of a record once the record itself is gone.
pub async fn mark_deleted<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    model: &str,
    key: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE changes SET deleted = true WHERE model = $1 AND key = $2")
        .bind(model)
        .bind(key)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Change>, sqlx::Error> {
    sqlx::query_as::<_, Change>("SELECT * FROM changes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(
    pool: &PgPool,
    filter: &ChangeFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<Change>, sqlx::Error> {
    sqlx::query_as::<_, Change>(
        "SELECT * FROM changes
         WHERE ($1::text IS NULL OR model = $1)
           AND ($2::text IS NULL OR key = $2)
           AND ($3::text IS NULL OR action = $3)
           AND ($4::uuid IS NULL OR admin_id = $4)
         ORDER BY created_at DESC LIMIT $5 OFFSET $6",
    )
    .bind(filter.model.as_deref())
    .bind(filter.key.as_deref())
    .bind(filter.action.map(|a| a.as_str()))
    .bind(filter.admin_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count(pool: &PgPool, filter: &ChangeFilter) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM changes
         WHERE ($1::text IS NULL OR model = $1)
           AND ($2::text IS NULL OR key = $2)
           AND ($3::text IS NULL OR action = $3)
           AND ($4::uuid IS NULL OR admin_id = $4)",
    )
    .bind(filter.model.as_deref())
    .bind(filter.key.as_deref())
    .bind(filter.action.map(|a| a.as_str()))
    .bind(filter.admin_id)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

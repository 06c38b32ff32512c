use async_trait::async_trait;
use sqlx::PgPool;

use super::ChangeError;
use super::action::ChangeAction;
use super::entity::Auditable;
use crate::db;
use crate::db::changes::NewChange;
use crate::models::Admin;

/// Storage for change-log entries.
#[async_trait]
pub trait ChangeLog: Send + Sync {
    /// Returns `false` when the change was not worth an entry.
    async fn record(
        &self,
        entity: &dyn Auditable,
        action: ChangeAction,
        actor: &Admin,
    ) -> Result<bool, ChangeError>;
}

/// Writes changes to the `changes` table.
pub struct PgChangeLog {
    pool: PgPool,
}

impl PgChangeLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn nothing_changed(changed: &serde_json::Value) -> bool {
    match changed {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[async_trait]
impl ChangeLog for PgChangeLog {
    async fn record(
        &self,
        entity: &dyn Auditable,
        action: ChangeAction,
        actor: &Admin,
    ) -> Result<bool, ChangeError> {
        let model = entity.model_name().to_string();
        let key = entity.key();
        let title = entity.title();

        let changed = match action {
            ChangeAction::Deleted => None,
            _ => Some(entity.changed_attributes()),
        };

        // A save that touched nothing worth showing
        if action == ChangeAction::Updated && changed.as_ref().is_none_or(nothing_changed) {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;

        let change = db::changes::create(
            &mut *tx,
            &NewChange {
                model: &model,
                key: &key,
                action,
                title: title.as_deref(),
                changed: changed.as_ref(),
                admin_id: actor.id,
            },
        )
        .await?;

        // Earlier entries for a deleted record can no longer link to it
        if action == ChangeAction::Deleted {
            db::changes::mark_deleted(&mut *tx, &model, &key).await?;
        }

        tx.commit().await?;

        tracing::info!(
            change_id = %change.id,
            %model,
            %key,
            %action,
            admin_id = %actor.id,
            "Recorded change"
        );

        Ok(true)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::changes::{Auditable, ModelKind};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Change {
    pub id: Uuid,
    pub model: String,
    pub key: String,
    pub action: String,
    pub title: Option<String>,
    pub changed: Option<serde_json::Value>,
    pub admin_id: Option<Uuid>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Auditable for Change {
    fn kind(&self) -> ModelKind {
        ModelKind::Change
    }

    fn model_name(&self) -> &str {
        "Change"
    }

    fn key(&self) -> String {
        self.id.to_string()
    }
}

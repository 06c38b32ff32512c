use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::changes::Auditable;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub session_version: i32,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Attributes an admin would recognise as edited between two versions.
    pub fn diff(&self, updated: &Admin) -> Value {
        let mut changed = Map::new();
        if self.name != updated.name {
            changed.insert("name".to_string(), json!(updated.name));
        }
        if self.email != updated.email {
            changed.insert("email".to_string(), json!(updated.email));
        }
        if self.password_hash != updated.password_hash {
            changed.insert("password".to_string(), json!("********"));
        }
        Value::Object(changed)
    }

    /// Attributes of a newly created admin.
    pub fn attributes(&self) -> Value {
        json!({ "name": self.name, "email": self.email })
    }
}

impl Auditable for Admin {
    fn model_name(&self) -> &str {
        "Admin"
    }

    fn key(&self) -> String {
        self.id.to_string()
    }

    fn title(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::ChangeError;
use super::action::ChangeAction;
use super::entity::{Auditable, ModelKind};
use super::log::ChangeLog;
use crate::models::Admin;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub model: String,
    pub key: String,
    pub action: ChangeAction,
    pub actor_email: String,
}

#[derive(Default)]
pub struct MemoryChangeLog {
    entries: Mutex<Vec<Recorded>>,
    fail: bool,
    decline: bool,
}

impl MemoryChangeLog {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Accepts every change but writes none, like an update with nothing changed.
    pub fn declining() -> Self {
        Self {
            decline: true,
            ..Self::default()
        }
    }

    pub fn entries(&self) -> Vec<Recorded> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChangeLog for MemoryChangeLog {
    async fn record(
        &self,
        entity: &dyn Auditable,
        action: ChangeAction,
        actor: &Admin,
    ) -> Result<bool, ChangeError> {
        if self.fail {
            return Err(ChangeError::Database(sqlx::Error::PoolClosed));
        }
        if self.decline {
            return Ok(false);
        }
        self.entries.lock().unwrap().push(Recorded {
            model: entity.model_name().to_string(),
            key: entity.key(),
            action,
            actor_email: actor.email.clone(),
        });
        Ok(true)
    }
}

pub struct Model {
    name: String,
    key: String,
    kind: ModelKind,
}

impl Model {
    pub fn new(name: &str, key: &str) -> Self {
        Self {
            name: name.to_string(),
            key: key.to_string(),
            kind: ModelKind::Record,
        }
    }

    pub fn of_kind(mut self, kind: ModelKind) -> Self {
        self.kind = kind;
        self
    }
}

impl Auditable for Model {
    fn kind(&self) -> ModelKind {
        self.kind
    }

    fn model_name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> String {
        self.key.clone()
    }
}

pub fn page(key: &str) -> Model {
    Model::new("Page", key)
}

pub fn sample_admin() -> Admin {
    let now = Utc::now();
    Admin {
        id: Uuid::now_v7(),
        email: "editor@test.com".to_string(),
        password_hash: String::new(),
        name: "Editor".to_string(),
        session_version: 0,
        last_login_at: None,
        created_at: now,
        updated_at: now,
    }
}

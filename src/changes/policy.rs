use std::fmt;
use std::sync::Arc;

use super::action::ChangeAction;
use super::entity::Auditable;
use crate::models::Admin;

pub type ChangePredicate = dyn Fn(&dyn Auditable, ChangeAction, &Admin) -> bool + Send + Sync;

/// Whether model changes are written to the change log. Logging is opt-in.
#[derive(Clone, Default)]
pub enum AuditPolicy {
    #[default]
    Disabled,
    Enabled,
    /// Log only the changes the predicate accepts.
    Predicate(Arc<ChangePredicate>),
}

impl AuditPolicy {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&dyn Auditable, ChangeAction, &Admin) -> bool + Send + Sync + 'static,
    {
        AuditPolicy::Predicate(Arc::new(f))
    }

    /// Build from the `log_changes` setting. Unset behaves like `false`.
    pub fn from_setting(log_changes: Option<bool>) -> Self {
        match log_changes {
            Some(true) => AuditPolicy::Enabled,
            Some(false) | None => AuditPolicy::Disabled,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, AuditPolicy::Disabled)
    }

    pub fn allows(&self, entity: &dyn Auditable, action: ChangeAction, actor: &Admin) -> bool {
        match self {
            AuditPolicy::Disabled => false,
            AuditPolicy::Enabled => true,
            AuditPolicy::Predicate(f) => f(entity, action, actor),
        }
    }
}

impl fmt::Debug for AuditPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditPolicy::Disabled => f.write_str("Disabled"),
            AuditPolicy::Enabled => f.write_str("Enabled"),
            AuditPolicy::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

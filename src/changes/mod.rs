//! Change log of admin edits.
//!
//! Routes report model events to the [`ChangeObserver`], which filters out
//! events nobody needs to see (derived media, join rows, login bookkeeping,
//! ...) and hands the rest to a [`ChangeLog`].

pub mod action;
pub mod context;
pub mod entity;
pub mod log;
pub mod observer;
pub mod policy;

#[cfg(test)]
pub(crate) mod testing;

pub use action::ChangeAction;
pub use context::{RequestContext, RouteName};
pub use entity::{Auditable, Dirty, Exclusion, ModelKind};
pub use log::{ChangeLog, PgChangeLog};
pub use observer::{ChangeObserver, Outcome, SkipReason};
pub use policy::AuditPolicy;

#[derive(Debug)]
pub enum ChangeError {
    /// Logging would proceed but nobody is signed in.
    MissingActor,
    Database(sqlx::Error),
}

impl std::fmt::Display for ChangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeError::MissingActor => write!(f, "No acting admin for change"),
            ChangeError::Database(err) => write!(f, "Failed to record change: {err}"),
        }
    }
}

impl std::error::Error for ChangeError {}

impl From<sqlx::Error> for ChangeError {
    fn from(err: sqlx::Error) -> Self {
        ChangeError::Database(err)
    }
}

use std::sync::Arc;

use super::ChangeError;
use super::action::ChangeAction;
use super::context::RequestContext;
use super::entity::{Auditable, Exclusion};
use super::log::ChangeLog;
use super::policy::AuditPolicy;

pub const DEFAULT_AUTH_ROUTES: [&str; 2] = ["POST /api/v1/auth/login", "POST /api/v1/auth/logout"];

/// Why a model event was not written to the change log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Excluded(Exclusion),
    AuthRoute,
    UnsupportedEvent,
    Disabled,
    Rejected,
    /// The log found nothing worth an entry, e.g. an update with no changed attributes.
    NothingChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Recorded(ChangeAction),
    Skipped(SkipReason),
}

/// Decides which model events become change-log entries and hands those to
/// a [`ChangeLog`].
pub struct ChangeObserver {
    policy: AuditPolicy,
    auth_routes: Vec<String>,
    log: Arc<dyn ChangeLog>,
}

impl ChangeObserver {
    pub fn new(policy: AuditPolicy, log: Arc<dyn ChangeLog>) -> Self {
        Self {
            policy,
            auth_routes: DEFAULT_AUTH_ROUTES.iter().map(|r| r.to_string()).collect(),
            log,
        }
    }

    /// Replace the routes during which no change is logged (login and logout).
    pub fn with_auth_routes<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auth_routes = routes.into_iter().map(Into::into).collect();
        self
    }

    /// Handle one model event. Records at most one change.
    pub async fn handle(
        &self,
        entity: &dyn Auditable,
        event_name: &str,
        ctx: &RequestContext,
    ) -> Result<Outcome, ChangeError> {
        let outcome = self.observe(entity, event_name, ctx).await?;
        if let Outcome::Skipped(reason) = outcome {
            tracing::debug!(
                model = entity.model_name(),
                key = %entity.key(),
                event = event_name,
                ?reason,
                "Change not logged"
            );
        }
        Ok(outcome)
    }

    async fn observe(
        &self,
        entity: &dyn Auditable,
        event_name: &str,
        ctx: &RequestContext,
    ) -> Result<Outcome, ChangeError> {
        if let Some(exclusion) = entity.kind().exclusion() {
            return Ok(Outcome::Skipped(SkipReason::Excluded(exclusion)));
        }

        if ctx.route_is(&self.auth_routes) {
            return Ok(Outcome::Skipped(SkipReason::AuthRoute));
        }

        let Some(action) = ChangeAction::from_event_name(event_name) else {
            return Ok(Outcome::Skipped(SkipReason::UnsupportedEvent));
        };

        if self.policy.is_disabled() {
            return Ok(Outcome::Skipped(SkipReason::Disabled));
        }

        let actor = ctx.actor.as_ref().ok_or(ChangeError::MissingActor)?;

        if !self.policy.allows(entity, action, actor) {
            return Ok(Outcome::Skipped(SkipReason::Rejected));
        }

        if !self.log.record(entity, action, actor).await? {
            return Ok(Outcome::Skipped(SkipReason::NothingChanged));
        }
        Ok(Outcome::Recorded(action))
    }
}

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches the action token after the last `.` of an event name. Anything
/// after the token must not contain another dot, so `eloquent.updated: Page`
/// resolves to `updated`.
static EVENT_ACTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(\w+)[^.]*$").unwrap());

/// The model events that end up in the change log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Created => "created",
            ChangeAction::Updated => "updated",
            ChangeAction::Deleted => "deleted",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "created" => Some(ChangeAction::Created),
            "updated" => Some(ChangeAction::Updated),
            "deleted" => Some(ChangeAction::Deleted),
            _ => None,
        }
    }

    /// Derive the action from an event name such as `eloquent.created`.
    /// Returns `None` for malformed names and unsupported actions
    /// (`eloquent.saving`, `eloquent.restored`, ...).
    pub fn from_event_name(event_name: &str) -> Option<Self> {
        let caps = EVENT_ACTION_RE.captures(event_name)?;
        Self::parse(caps.get(1)?.as_str())
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

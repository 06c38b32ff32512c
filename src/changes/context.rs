use std::convert::Infallible;

use axum::extract::{FromRequestParts, MatchedPath};
use axum::http::request::Parts;

use crate::models::Admin;

/// Request-scoped inputs to the change observer: which route is running and
/// who is acting.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub route: Option<String>,
    pub actor: Option<Admin>,
}

impl RequestContext {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: Some(route.into()),
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: Admin) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn route_is(&self, routes: &[String]) -> bool {
        self.route
            .as_deref()
            .is_some_and(|route| routes.iter().any(|r| r == route))
    }
}

/// Route identity of the current request, `"<METHOD> <matched path>"`.
#[derive(Debug, Clone)]
pub struct RouteName(pub String);

impl RouteName {
    pub fn context(self) -> RequestContext {
        RequestContext::new(self.0)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RouteName {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts
            .extensions
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());
        Ok(RouteName(format!("{} {}", parts.method, path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changes::testing::sample_admin;

    #[test]
    fn matches_configured_routes() {
        let routes = vec![
            "POST /api/v1/auth/login".to_string(),
            "POST /api/v1/auth/logout".to_string(),
        ];
        assert!(RequestContext::new("POST /api/v1/auth/login").route_is(&routes));
        assert!(!RequestContext::new("PUT /api/v1/admins/{id}").route_is(&routes));
        assert!(!RequestContext::default().route_is(&routes));
    }

    #[test]
    fn with_actor_sets_actor() {
        let ctx = RequestContext::new("POST /api/v1/admins").with_actor(sample_admin());
        assert_eq!(ctx.actor.unwrap().email, "editor@test.com");
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route guard: presence-only session gate for navigable routes.
//!
//! The gate checks that a session cookie EXISTS, nothing more. Full
//! cryptographic verification is deliberately left to the handlers that
//! need the caller's identity (see `crate::session`), so public routes
//! and static assets never pay for JWT validation. The consequence: a
//! forged-but-present cookie passes the gate and is only rejected once
//! a handler verifies it. That trade-off is intentional; do not "fix"
//! the gate into a full verifier.

use crate::session::SESSION_COOKIE;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

/// Static route policy evaluated on every request.
pub struct RoutePolicy {
    /// Prefixes that bypass the gate unconditionally.
    pub public_prefixes: &'static [&'static str],
    /// Prefixes the gate protects (the root path is always protected).
    pub protected_prefixes: &'static [&'static str],
    /// Redirect target for unauthenticated navigation.
    pub sign_in_path: &'static str,
}

/// Outcome of evaluating the policy for one request.
#[derive(Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(&'static str),
}

/// The policy for this deployment.
pub const POLICY: RoutePolicy = RoutePolicy {
    public_prefixes: &["/sign-in", "/public"],
    protected_prefixes: &["/dashboard"],
    sign_in_path: "/sign-in",
};

impl RoutePolicy {
    /// Decide whether a request may proceed.
    ///
    /// `has_session_cookie` is presence only; the value is never read.
    pub fn decide(&self, path: &str, has_session_cookie: bool) -> RouteDecision {
        if self
            .public_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix))
        {
            return RouteDecision::Allow;
        }

        let guarded = path == "/"
            || self
                .protected_prefixes
                .iter()
                .any(|prefix| path.starts_with(prefix));

        if !guarded || has_session_cookie {
            RouteDecision::Allow
        } else {
            RouteDecision::Redirect(self.sign_in_path)
        }
    }
}

/// Middleware applying [`POLICY`] to every request.
pub async fn redirect_unauthenticated(jar: CookieJar, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let has_session_cookie = jar.get(SESSION_COOKIE).is_some();

    match POLICY.decide(&path, has_session_cookie) {
        RouteDecision::Allow => next.run(request).await,
        RouteDecision::Redirect(target) => {
            tracing::debug!(path = %path, "No session cookie, redirecting to sign-in");
            Redirect::temporary(target).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_prefix_bypasses_gate() {
        assert_eq!(POLICY.decide("/sign-in", false), RouteDecision::Allow);
        assert_eq!(
            POLICY.decide("/public/logo.svg", false),
            RouteDecision::Allow
        );
    }

    #[test]
    fn test_protected_paths_require_cookie_presence() {
        assert_eq!(
            POLICY.decide("/", false),
            RouteDecision::Redirect("/sign-in")
        );
        assert_eq!(
            POLICY.decide("/dashboard/settings", false),
            RouteDecision::Redirect("/sign-in")
        );

        // Presence is enough; the gate never inspects the value.
        assert_eq!(POLICY.decide("/", true), RouteDecision::Allow);
        assert_eq!(POLICY.decide("/dashboard/settings", true), RouteDecision::Allow);
    }

    #[test]
    fn test_unmatched_paths_bypass_gate() {
        // API routes rely on in-handler verification instead.
        assert_eq!(POLICY.decide("/api/me", false), RouteDecision::Allow);
        assert_eq!(POLICY.decide("/health", false), RouteDecision::Allow);
        assert_eq!(POLICY.decide("/auth/sign-in", false), RouteDecision::Allow);
    }
}

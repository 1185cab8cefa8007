// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session credential issuance and verification.
//!
//! The credential is an HS256 JWT carried in an HttpOnly cookie, valid
//! for one week from issuance. The route guard only checks that the
//! cookie exists; handlers that need the caller's identity call
//! [`current_user`], which performs the full signature/expiry check and
//! resolves the subject against the user directory.

use crate::models::User;
use crate::AppState;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Session lifetime: one week.
pub const SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (identity provider subject id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Create a session credential for a verified identity.
///
/// Callers must have validated the identity token with the identity
/// provider before calling this; no re-validation happens here.
pub fn issue_credential(subject_id: &str, signing_key: &[u8]) -> anyhow::Result<String> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: subject_id.to_string(),
        iat: now,
        exp: now + SESSION_TTL_SECS as usize,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Validate a session credential and return the encoded subject id.
///
/// Every failure mode (bad signature, expiry, garbage input) collapses
/// to `None`; the cause is logged internally and never reaches the
/// caller's control flow.
pub fn verify_credential(credential: &str, signing_key: &[u8]) -> Option<String> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    match decode::<Claims>(credential, &key, &validation) {
        Ok(token_data) => Some(token_data.claims.sub),
        Err(e) => {
            tracing::debug!(error = %e, "Session credential rejected");
            None
        }
    }
}

/// Resolve the current request's user from the session cookie.
///
/// Absent cookie, invalid credential, a dangling subject (credential
/// outlived its profile) and a store failure are all observably
/// identical to the caller: `None`, treated as anonymous.
pub async fn current_user(state: &AppState, jar: &CookieJar) -> Option<User> {
    let credential = jar.get(SESSION_COOKIE)?.value().to_string();
    let subject = verify_credential(&credential, &state.config.session_signing_key)?;

    match state.db.get_user(&subject).await {
        Ok(Some(user)) => Some(user),
        Ok(None) => {
            tracing::debug!(subject = %subject, "Valid credential for a missing profile");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Profile lookup failed during session verification");
            None
        }
    }
}

/// Build the session cookie carrying a freshly issued credential.
pub fn session_cookie(credential: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, credential))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS))
        .build()
}

/// Build the removal cookie for sign-out.
///
/// Attributes must mirror [`session_cookie`] or browsers keep the
/// original cookie alive.
pub fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-up, sign-in and sign-out routes.

use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::models::User;
use crate::session;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sign-in", get(sign_in_page))
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-out", post(sign_out))
}

/// Request body for sign-up.
#[derive(Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 20))]
    pub password: String,
}

/// Request body for sign-in.
#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    /// Identity token from the provider's primary-credential check
    pub id_token: String,
}

/// Outcome envelope for auth operations.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
}

/// The guard's redirect target. The actual page lives on the frontend.
async fn sign_in_page(State(state): State<Arc<AppState>>) -> Redirect {
    Redirect::temporary(&format!("{}/sign-in", state.config.frontend_url))
}

/// Register: create the identity with the provider, then the profile.
///
/// No session is established here; the client signs in afterwards with
/// the identity token it gets from its own primary-credential check.
async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignUpRequest>,
) -> Result<Json<AuthResponse>> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let identity = match state
        .identity
        .create_identity(&body.email, &body.password)
        .await
    {
        Ok(identity) => identity,
        Err(AppError::AlreadyExists(_)) => {
            return Ok(Json(AuthResponse {
                success: false,
                message: "Email already in use".to_string(),
            }));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Identity creation failed");
            return Ok(Json(AuthResponse {
                success: false,
                message: "Failed to create an account".to_string(),
            }));
        }
    };

    let user = User {
        id: identity.local_id,
        name: body.name,
        email: identity.email,
    };

    // The store's create primitive decides concurrent duplicates.
    match state.db.create_user(&user).await {
        Ok(()) => Ok(Json(AuthResponse {
            success: true,
            message: "Account created successfully. Please sign in.".to_string(),
        })),
        Err(AppError::AlreadyExists(_)) => Ok(Json(AuthResponse {
            success: false,
            message: "User already exists".to_string(),
        })),
        Err(e) => Err(e),
    }
}

/// Sign in: exchange a verified identity token for a session cookie.
async fn sign_in(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<SignInRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    // Resolve the account first so an unknown email gets its own message.
    match state.identity.resolve_identity(&body.email).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok((
                jar,
                Json(AuthResponse {
                    success: false,
                    message: "User does not exist. Please sign up.".to_string(),
                }),
            ));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Identity resolution failed");
            return Ok((
                jar,
                Json(AuthResponse {
                    success: false,
                    message: "Failed to establish session".to_string(),
                }),
            ));
        }
    }

    // One-time exchange: the provider vouches for the identity token,
    // issuance itself does no further validation.
    let claims = match state.identity.verify_identity_token(&body.id_token).await {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(error = %e, "Identity token exchange failed");
            return Ok((
                jar,
                Json(AuthResponse {
                    success: false,
                    message: "Failed to establish session".to_string(),
                }),
            ));
        }
    };

    let credential = session::issue_credential(&claims.local_id, &state.config.session_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Credential issuance failed: {}", e)))?;

    tracing::info!(subject = %claims.local_id, "Session established");

    let jar = jar.add(session::session_cookie(
        credential,
        state.config.secure_cookies(),
    ));

    Ok((
        jar,
        Json(AuthResponse {
            success: true,
            message: "Signed in successfully".to_string(),
        }),
    ))
}

/// Sign out by clearing the session cookie.
///
/// There is no server-side revocation list; an already-issued
/// credential stays valid until its one-week expiry.
async fn sign_out(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.add(session::removal_cookie(state.config.secure_cookies()));
    (jar, StatusCode::NO_CONTENT)
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client.
//!
//! Consumes the external identity gateway at its REST interface:
//! - account creation (email + password, yields an identity token)
//! - account resolution by email
//! - identity token verification (the one-time exchange backing
//!   session issuance)
//!
//! Primary credentials are never stored or validated here; the
//! provider owns them.

use crate::error::AppError;
use serde::Deserialize;

/// Identity provider client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// A freshly created identity, including its one-time identity token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIdentity {
    /// Provider-assigned subject id
    pub local_id: String,
    /// Short-lived identity token for the session exchange
    pub id_token: String,
    pub email: String,
}

/// An existing identity record, as returned by lookups.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    /// Provider-assigned subject id
    pub local_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<IdentityRecord>,
}

impl IdentityClient {
    /// Create a new client with provider credentials.
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Create an identity from primary credentials.
    ///
    /// A duplicate email is rejected by the provider, not by us; it is
    /// mapped to `AlreadyExists` so the sign-up handler can produce the
    /// user-facing message.
    pub async fn create_identity(
        &self,
        email: &str,
        password: &str,
    ) -> Result<NewIdentity, AppError> {
        let url = format!("{}/v1/accounts:signUp", self.base_url);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "returnSecureToken": true,
            }))
            .send()
            .await
            .map_err(|e| AppError::IdentityApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if body.contains("EMAIL_EXISTS") {
                return Err(AppError::AlreadyExists("email already in use".to_string()));
            }

            return Err(AppError::IdentityApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::IdentityApi(e.to_string()))
    }

    /// Look up an identity record by email.
    ///
    /// Absence is a valid outcome, not a fault.
    pub async fn resolve_identity(&self, email: &str) -> Result<Option<IdentityRecord>, AppError> {
        let url = format!("{}/v1/accounts:lookup", self.base_url);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({ "email": [email] }))
            .send()
            .await
            .map_err(|e| AppError::IdentityApi(e.to_string()))?;

        let lookup: LookupResponse = self.check_response_json(response).await?;
        Ok(lookup.users.into_iter().next())
    }

    /// Verify an identity token and return the claims behind it.
    ///
    /// This is the exchange primitive the session issuer relies on: a
    /// token the provider rejects never reaches credential issuance.
    pub async fn verify_identity_token(&self, id_token: &str) -> Result<IdentityRecord, AppError> {
        let url = format!("{}/v1/accounts:lookup", self.base_url);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({ "idToken": id_token }))
            .send()
            .await
            .map_err(|e| AppError::IdentityApi(e.to_string()))?;

        let lookup: LookupResponse = self.check_response_json(response).await?;
        lookup
            .users
            .into_iter()
            .next()
            .ok_or_else(|| AppError::IdentityApi("identity token matched no account".to_string()))
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::IdentityApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::IdentityApi(e.to_string()))
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Routes serving authenticated users, plus the ingestion endpoint.
//!
//! The route guard only checks cookie presence, so every handler that
//! needs an identity verifies the credential itself via
//! `session::current_user` and answers 401 when it does not resolve.

use crate::error::{AppError, Result};
use crate::models::{Interview, User};
use crate::services::questions::QuestionRequest;
use crate::session;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Default and ceiling for the discovery listing.
const DEFAULT_DISCOVER_LIMIT: u32 = 20;
const MAX_DISCOVER_LIMIT: u32 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/me", get(get_me))
        .route("/api/interviews", get(list_interviews))
        .route("/api/interviews/latest", get(list_latest_interviews))
        .route(
            "/api/interviews/generate",
            get(generate_ready).post(generate_interview),
        )
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<UserResponse>> {
    let user = session::current_user(&state, &jar)
        .await
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(user.into()))
}

// ─── Dashboard ───────────────────────────────────────────────

/// Dashboard payload backing the home page.
#[derive(Serialize)]
pub struct DashboardResponse {
    pub user: UserResponse,
    /// The caller's own interviews, newest first
    pub your_interviews: Vec<Interview>,
    /// Other users' finalized interviews, store order
    pub discover: Vec<Interview>,
}

/// Dashboard: own history plus discoverable interviews.
///
/// An unresolved identity is 401 ("don't render"); a resolved identity
/// with no records is 200 with empty lists ("render the empty state").
async fn dashboard(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<DashboardResponse>> {
    let user = session::current_user(&state, &jar)
        .await
        .ok_or(AppError::Unauthorized)?;

    // Both sections load concurrently, like the page they back.
    let (your_interviews, discover) = tokio::try_join!(
        state.db.interviews_for_user(&user.id),
        state.db.latest_interviews(&user.id, DEFAULT_DISCOVER_LIMIT),
    )?;

    Ok(Json(DashboardResponse {
        user: user.into(),
        your_interviews,
        discover,
    }))
}

// ─── Interview Listings ──────────────────────────────────────

/// Get the caller's interviews, ordered by creation time descending.
async fn list_interviews(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<Vec<Interview>>> {
    let user = session::current_user(&state, &jar)
        .await
        .ok_or(AppError::Unauthorized)?;

    let interviews = state.db.interviews_for_user(&user.id).await?;
    Ok(Json(interviews))
}

#[derive(Deserialize)]
struct LatestInterviewsQuery {
    limit: Option<u32>,
}

/// Get other users' finalized interviews, capped at `limit`.
///
/// Ordering is whatever the store returns; callers must not assume
/// chronology.
async fn list_latest_interviews(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<LatestInterviewsQuery>,
) -> Result<Json<Vec<Interview>>> {
    let user = session::current_user(&state, &jar)
        .await
        .ok_or(AppError::Unauthorized)?;

    let limit = params
        .limit
        .unwrap_or(DEFAULT_DISCOVER_LIMIT)
        .min(MAX_DISCOVER_LIMIT);

    let interviews = state.db.latest_interviews(&user.id, limit).await?;
    Ok(Json(interviews))
}

// ─── Interview Ingestion ─────────────────────────────────────

/// Readiness response for the generation integration.
#[derive(Serialize)]
pub struct GenerateReadyResponse {
    pub success: bool,
    pub data: String,
}

/// Readiness ping used by the voice-assistant integration.
async fn generate_ready() -> Json<GenerateReadyResponse> {
    Json(GenerateReadyResponse {
        success: true,
        data: "Question generation is ready".to_string(),
    })
}

/// Ingestion request. The caller supplies the owner id; the voice
/// assistant posts here on the user's behalf, outside the session flow.
#[derive(Deserialize)]
pub struct GenerateInterviewRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub role: String,
    pub level: String,
    /// Comma-separated technology list
    pub techstack: String,
    pub amount: u32,
    pub user_id: String,
}

#[derive(Serialize)]
pub struct GenerateInterviewResponse {
    pub success: bool,
}

/// Generate questions and persist the interview.
///
/// One upstream call, no retry. A generation or parse failure aborts
/// before the write, so either a fully-formed record is persisted or
/// nothing is. The record keeps the requested `amount` even when the
/// model returned fewer questions.
async fn generate_interview(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateInterviewRequest>,
) -> Result<Json<GenerateInterviewResponse>> {
    let techstack = split_techstack(&body.techstack);

    let request = QuestionRequest {
        kind: body.kind.clone(),
        role: body.role.clone(),
        level: body.level.clone(),
        techstack: techstack.clone(),
        amount: body.amount,
    };

    let questions = state.questions.generate(&request).await?;

    let interview = Interview {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: body.user_id,
        role: body.role,
        kind: body.kind,
        level: body.level,
        techstack,
        questions,
        amount: body.amount,
        finalized: true,
        cover_image: random_cover_image(),
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.db.add_interview(&interview).await?;

    tracing::info!(
        interview_id = %interview.id,
        user_id = %interview.user_id,
        questions = interview.questions.len(),
        "Interview ingested"
    );

    Ok(Json(GenerateInterviewResponse { success: true }))
}

/// Split the request's comma-separated technology list.
fn split_techstack(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

const COVER_IMAGES: &[&str] = &[
    "/covers/adobe.png",
    "/covers/amazon.png",
    "/covers/facebook.png",
    "/covers/hostinger.png",
    "/covers/pinterest.png",
    "/covers/quora.png",
    "/covers/reddit.png",
    "/covers/skype.png",
    "/covers/spotify.png",
    "/covers/telegram.png",
    "/covers/tiktok.png",
    "/covers/yahoo.png",
];

/// Pick a cover image for a new interview.
fn random_cover_image() -> String {
    use rand::seq::IndexedRandom;

    let mut rng = rand::rng();
    COVER_IMAGES
        .choose(&mut rng)
        .copied()
        .unwrap_or(COVER_IMAGES[0])
        .to_string()
}

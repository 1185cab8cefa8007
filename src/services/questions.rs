// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Question generation client.
//!
//! One call per ingestion request, no retry. The model is asked for a
//! bare JSON array of question strings; anything that fails to parse as
//! one aborts the whole ingestion with nothing persisted.

use crate::error::AppError;
use serde::Deserialize;
use std::time::Duration;

/// Hard cap on a single generation call. Chosen explicitly; the
/// collaborator's own defaults are too generous for a request that a
/// user is actively waiting on.
const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Parameters for one generation request.
#[derive(Debug, Clone)]
pub struct QuestionRequest {
    /// Interview kind: technical, behavioural or mixed
    pub kind: String,
    pub role: String,
    pub level: String,
    pub techstack: Vec<String>,
    /// Desired number of questions
    pub amount: u32,
}

/// Generation API client.
#[derive(Clone)]
pub struct QuestionService {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    text: String,
}

impl QuestionService {
    /// Create a new client for the generation endpoint.
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    /// Generate interview questions.
    ///
    /// Returns the parsed question list in model order. The list may be
    /// shorter than `request.amount`; callers persist what they got.
    pub async fn generate(&self, request: &QuestionRequest) -> Result<Vec<String>, AppError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let body = serde_json::json!({
            "contents": [{
                "parts": [{ "text": build_prompt(request) }]
            }]
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .timeout(GENERATION_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!("HTTP {}: {}", status, body)));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AppError::Generation("empty generation response".to_string()))?;

        parse_questions(&text)
    }
}

/// Build the generation prompt.
///
/// The questions are read aloud by a voice assistant, so the model is
/// told to return a bare JSON array with no markdown.
fn build_prompt(request: &QuestionRequest) -> String {
    format!(
        "Prepare {amount} {kind} interview questions for a {role} position \
         at {level} level. Tech stack: {techstack}. Return the questions as \
         a JSON array of strings, like [\"Question 1\", \"Question 2\"]. \
         Return only the array, with no markdown, code blocks or commentary; \
         the questions are read aloud by a voice assistant.",
        amount = request.amount,
        kind = request.kind,
        role = request.role,
        level = request.level,
        techstack = request.techstack.join(", "),
    )
}

/// Parse model output as an ordered list of question strings.
///
/// Strict by design: prose, markdown fences or partial JSON all fail
/// the whole ingestion rather than salvaging a partial list.
pub fn parse_questions(text: &str) -> Result<Vec<String>, AppError> {
    serde_json::from_str::<Vec<String>>(text.trim())
        .map_err(|e| AppError::Generation(format!("model output is not a question list: {}", e)))
}

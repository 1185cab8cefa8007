// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prepdeck: practice interviews, generated and tracked per user
//!
//! This crate provides the backend API for registering users, managing
//! session credentials and serving per-user and discoverable interview
//! records.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;

use config::Config;
use db::FirestoreDb;
use services::{IdentityClient, QuestionService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity: IdentityClient,
    pub questions: QuestionService,
}

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod rest;

use std::sync::Arc;

use sqlx::sqlite::SqlitePool;

use crate::{
    auth::{CredentialManager, TokenService},
    config::AuthConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub credentials: Arc<CredentialManager>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(db: SqlitePool, auth: &AuthConfig) -> Self {
        Self {
            db,
            credentials: Arc::new(CredentialManager::new()),
            tokens: Arc::new(TokenService::new(auth)),
        }
    }
}

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::book::Book;
use crate::error::AppError;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("email regex is valid"));

/// Columns selected into [`Seller`].
pub const SELLER_COLUMNS: &str = "id, first_name, last_name, email, password_hash";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Seller {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip)]
    pub password_hash: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSeller {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Replacement profile fields. Any `id` in the body is ignored; the path wins.
#[derive(Debug, Deserialize)]
pub struct UpdateSeller {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SellerList {
    pub sellers: Vec<Seller>,
}

#[derive(Debug, Serialize)]
pub struct SellerWithBooks {
    #[serde(flatten)]
    pub seller: Seller,
    pub books: Vec<Book>,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(AppError::Validation("Check your email".to_string()))
    }
}

impl CreateSeller {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_email(&self.email)
    }
}

impl UpdateSeller {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_email(&self.email)
    }
}

use axum::{extract::State, Json};

use crate::{
    error::AppError,
    models::seller::{LoginPayload, Seller, SELLER_COLUMNS},
    AppState,
};

/// Exchanges an email and password for a bearer token.
///
/// The token is returned as a bare JSON string.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<String>, AppError> {
    let seller = sqlx::query_as::<_, Seller>(&format!(
        "SELECT {} FROM sellers WHERE email = ?",
        SELLER_COLUMNS
    ))
    .bind(&payload.email)
    .fetch_optional(&state.db)
    .await?;

    let seller = match seller {
        Some(seller) => seller,
        None => {
            state.credentials.verify_unknown(&payload.password);
            return Err(AppError::InvalidCredentials);
        }
    };

    if !state
        .credentials
        .verify(&payload.password, &seller.password_hash)
    {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(&seller.email)?;
    tracing::debug!(seller_id = seller.id, "issued token");

    Ok(Json(token))
}

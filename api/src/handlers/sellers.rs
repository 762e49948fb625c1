use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::AuthenticatedSeller,
    error::AppError,
    models::{
        book::Book,
        seller::{
            CreateSeller, Seller, SellerList, SellerWithBooks, UpdateSeller, SELLER_COLUMNS,
        },
    },
    AppState,
};

pub async fn create_seller(
    State(state): State<AppState>,
    Json(payload): Json<CreateSeller>,
) -> Result<(StatusCode, Json<Seller>), AppError> {
    payload.validate()?;

    let password_hash = state.credentials.hash(&payload.password)?;

    let seller = sqlx::query_as::<_, Seller>(&format!(
        "INSERT INTO sellers (first_name, last_name, email, password_hash) VALUES (?, ?, ?, ?) RETURNING {}",
        SELLER_COLUMNS
    ))
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(seller_id = seller.id, "seller registered");
    Ok((StatusCode::CREATED, Json(seller)))
}

pub async fn list_sellers(State(state): State<AppState>) -> Result<Json<SellerList>, AppError> {
    let sellers = sqlx::query_as::<_, Seller>(&format!(
        "SELECT {} FROM sellers ORDER BY id",
        SELLER_COLUMNS
    ))
    .fetch_all(&state.db)
    .await?;

    Ok(Json(SellerList { sellers }))
}

pub async fn get_seller(
    State(state): State<AppState>,
    Path(seller_id): Path<i64>,
) -> Result<Json<SellerWithBooks>, AppError> {
    let seller = sqlx::query_as::<_, Seller>(&format!(
        "SELECT {} FROM sellers WHERE id = ?",
        SELLER_COLUMNS
    ))
    .bind(seller_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound)?;

    let books = sqlx::query_as::<_, Book>(
        "SELECT id, title, author, year, count_pages, seller_id FROM books WHERE seller_id = ? ORDER BY id",
    )
    .bind(seller_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(SellerWithBooks { seller, books }))
}

pub async fn update_seller(
    State(state): State<AppState>,
    caller: AuthenticatedSeller,
    Path(seller_id): Path<i64>,
    Json(payload): Json<UpdateSeller>,
) -> Result<Json<Seller>, AppError> {
    payload.validate()?;

    let seller = sqlx::query_as::<_, Seller>(&format!(
        "UPDATE sellers SET first_name = ?, last_name = ?, email = ? WHERE id = ? RETURNING {}",
        SELLER_COLUMNS
    ))
    .bind(&payload.first_name)
    .bind(&payload.last_name)
    .bind(&payload.email)
    .bind(seller_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound)?;

    tracing::info!(seller_id, caller = %caller.email, "seller updated");
    Ok(Json(seller))
}

/// Deletes a seller together with its books. Succeeds even if the seller
/// does not exist.
pub async fn delete_seller(
    State(state): State<AppState>,
    caller: AuthenticatedSeller,
    Path(seller_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let mut tx = state.db.begin().await?;

    sqlx::query("DELETE FROM books WHERE seller_id = ?")
        .bind(seller_id)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM sellers WHERE id = ?")
        .bind(seller_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    if result.rows_affected() > 0 {
        tracing::info!(seller_id, caller = %caller.email, "seller deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

// src/handlers/account.rs
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::error::AppError;
use crate::models::*;
use crate::AppState;

/// Pulls a non-empty field out of an optional request value.
fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<SignupResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!("Rejected signup body: {}", e);
        AppError::MissingCredentials
    })?;

    let (Some(email), Some(password)) = (required(&payload.email), required(&payload.password))
    else {
        return Err(AppError::MissingCredentials);
    };

    state
        .accounts
        .create(payload.name.as_deref(), email, password)
        .await?;

    tracing::info!("Account created for {}", email);
    Ok(Json(SignupResponse { success: true }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        tracing::debug!("Rejected login body: {}", e);
        AppError::MissingCredentials
    })?;

    let (Some(email), Some(password)) = (required(&payload.email), required(&payload.password))
    else {
        return Err(AppError::MissingCredentials);
    };

    match state.accounts.verify(email, password).await {
        Ok(name) => {
            tracing::info!("Login succeeded for {}", email);
            Ok(Json(LoginResponse {
                success: true,
                name,
            }))
        }
        Err(e) => {
            tracing::warn!("Login failed for {}: {}", email, e);
            Err(e.into())
        }
    }
}

pub async fn account(State(state): State<Arc<AppState>>) -> Result<Json<PublicAccount>, AppError> {
    let public = state.accounts.read_public().await?;
    Ok(Json(public))
}

// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::storage::account_store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("email and password required")]
    MissingCredentials,

    #[error("no account")]
    NoAccount,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("write failed")]
    WriteFailed,

    #[error("storage failure")]
    Storage,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidInput => AppError::MissingCredentials,
            StoreError::NoAccount => AppError::NoAccount,
            StoreError::InvalidCredentials => AppError::InvalidCredentials,
            StoreError::Write(e) => {
                tracing::error!("Account store write failed: {}", e);
                AppError::WriteFailed
            }
            StoreError::Read(e) => {
                tracing::error!("Account store read failed: {}", e);
                AppError::Storage
            }
            StoreError::Corrupt(e) => {
                tracing::error!("Account store holds malformed JSON: {}", e);
                AppError::Storage
            }
            StoreError::Encode(e) => {
                tracing::error!("Failed to encode account: {}", e);
                AppError::WriteFailed
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingCredentials => StatusCode::BAD_REQUEST,
            AppError::NoAccount => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::WriteFailed | AppError::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

// src/lib.rs
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use crate::storage::AccountRepository;

#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountRepository>,
}

// src/storage/mod.rs
pub mod account_store;

pub use account_store::{AccountRepository, JsonFileStore, StoreError};

// src/handlers/mod.rs
pub mod account;

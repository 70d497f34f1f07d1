// src/models.rs
use serde::{Deserialize, Serialize};

/// The single persisted credential record.
///
/// The password is kept in cleartext. That is how the demo behaves and it is a
/// known defect, not something to rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Account {
    pub fn public(&self) -> PublicAccount {
        PublicAccount {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Identifying fields only. There is deliberately no password field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicAccount {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

// Request/Response types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// src/storage/account_store.rs
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Account, PublicAccount};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("email and password required")]
    InvalidInput,

    #[error("no account")]
    NoAccount,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("failed to read account store: {0}")]
    Read(std::io::Error),

    #[error("account store is not valid JSON: {0}")]
    Corrupt(serde_json::Error),

    #[error("failed to encode account: {0}")]
    Encode(serde_json::Error),

    #[error("failed to write account store: {0}")]
    Write(std::io::Error),
}

/// Capability set over the single stored account.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Replaces whatever account is stored. Nothing is merged.
    async fn create(
        &self,
        name: Option<&str>,
        email: &str,
        password: &str,
    ) -> Result<(), StoreError>;

    /// Returns the stored display name when both email and password match byte for byte.
    async fn verify(&self, email: &str, password: &str) -> Result<String, StoreError>;

    async fn read_public(&self) -> Result<PublicAccount, StoreError>;
}

/// One pretty-printed JSON object on disk, overwritten on every signup.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file, an empty file and a literal `null` all mean "no account".
    async fn load(&self) -> Result<Option<Account>, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Read(e)),
        };

        if raw.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str::<Option<Account>>(&raw).map_err(StoreError::Corrupt)
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(account).map_err(StoreError::Encode)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(StoreError::Write)
    }
}

#[async_trait]
impl AccountRepository for JsonFileStore {
    async fn create(
        &self,
        name: Option<&str>,
        email: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        if email.is_empty() || password.is_empty() {
            return Err(StoreError::InvalidInput);
        }

        let account = Account {
            name: name.unwrap_or_default().to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        self.save(&account).await?;
        tracing::debug!("Stored account for {} at {}", email, self.path.display());
        Ok(())
    }

    async fn verify(&self, email: &str, password: &str) -> Result<String, StoreError> {
        if email.is_empty() || password.is_empty() {
            return Err(StoreError::InvalidInput);
        }

        let stored = self.load().await?.ok_or(StoreError::NoAccount)?;

        if stored.email == email && stored.password == password {
            Ok(stored.name)
        } else {
            Err(StoreError::InvalidCredentials)
        }
    }

    async fn read_public(&self) -> Result<PublicAccount, StoreError> {
        self.load()
            .await?
            .map(|account| account.public())
            .ok_or(StoreError::NoAccount)
    }
}

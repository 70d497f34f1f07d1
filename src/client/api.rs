// src/client/api.rs
use async_trait::async_trait;
use reqwest::{Client, Response};
use thiserror::Error;
use url::Url;

use super::config::ClientConfig;
use crate::models::{ErrorResponse, LoginRequest, LoginResponse, PublicAccount, SignupRequest};

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("failed to build http client: {0}")]
    Build(reqwest::Error),

    #[error("server unreachable: {0}")]
    Unreachable(reqwest::Error),

    #[error("server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Parse(reqwest::Error),

    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),
}

/// Remote side of the account flow.
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn signup(&self, request: &SignupRequest) -> Result<(), ClientError>;

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError>;

    /// Email and name of the stored account, for autofill.
    async fn account(&self) -> Result<PublicAccount, ClientError>;
}

pub struct HttpAccountApi {
    client: Client,
    base: Url,
}

impl HttpAccountApi {
    pub fn new(base: Url) -> Result<Self, ClientError> {
        Self::with_user_agent(base, APP_USER_AGENT)
    }

    pub fn with_user_agent(base: Url, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { client, base })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(config.api_origin.clone())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }
}

/// Turns a non-success response into `Rejected`, keeping the server's `{error}` text when present.
async fn rejected(response: Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };

    ClientError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl AccountApi for HttpAccountApi {
    async fn signup(&self, request: &SignupRequest) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.endpoint("signup")?)
            .json(request)
            .send()
            .await
            .map_err(ClientError::Unreachable)?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let response = self
            .client
            .post(self.endpoint("login")?)
            .json(request)
            .send()
            .await
            .map_err(ClientError::Unreachable)?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        response.json().await.map_err(ClientError::Parse)
    }

    async fn account(&self) -> Result<PublicAccount, ClientError> {
        let response = self
            .client
            .get(self.endpoint("account")?)
            .send()
            .await
            .map_err(ClientError::Unreachable)?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        response.json().await.map_err(ClientError::Parse)
    }
}

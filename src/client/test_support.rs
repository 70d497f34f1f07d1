// src/client/test_support.rs
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use url::Url;

use super::api::{AccountApi, ClientError, HttpAccountApi};
use super::storage::{KeyValueStore, StorageError};
use crate::models::{Account, LoginRequest, LoginResponse, PublicAccount, SignupRequest};

/// In-memory stand-in for the account service, answering like the real endpoints.
pub(crate) struct FakeApi {
    online: bool,
    account: Mutex<Option<Account>>,
    calls: AtomicUsize,
}

impl FakeApi {
    pub fn online() -> Self {
        Self {
            online: true,
            account: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn offline() -> Self {
        Self {
            online: false,
            ..Self::online()
        }
    }

    pub fn with_account(name: &str, email: &str, password: &str) -> Self {
        let api = Self::online();
        *api.account.lock().unwrap() = Some(Account {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
        api
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn stored(&self) -> Option<Account> {
        self.account.lock().unwrap().clone()
    }

    fn enter(&self) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.online {
            Ok(())
        } else {
            Err(rejected(503, "service unavailable"))
        }
    }
}

fn rejected(status: u16, message: &str) -> ClientError {
    ClientError::Rejected {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl AccountApi for FakeApi {
    async fn signup(&self, request: &SignupRequest) -> Result<(), ClientError> {
        self.enter()?;
        let (Some(email), Some(password)) = (request.email.clone(), request.password.clone()) else {
            return Err(rejected(400, "email and password required"));
        };
        *self.account.lock().unwrap() = Some(Account {
            name: request.name.clone().unwrap_or_default(),
            email,
            password,
        });
        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        self.enter()?;
        let stored = self.stored().ok_or_else(|| rejected(404, "no account"))?;
        if request.email.as_deref() == Some(stored.email.as_str())
            && request.password.as_deref() == Some(stored.password.as_str())
        {
            Ok(LoginResponse {
                success: true,
                name: stored.name,
            })
        } else {
            Err(rejected(401, "invalid credentials"))
        }
    }

    async fn account(&self) -> Result<PublicAccount, ClientError> {
        self.enter()?;
        self.stored()
            .map(|account| account.public())
            .ok_or_else(|| rejected(404, "no account"))
    }
}

/// Storage that refuses every write, like a browser with storage disabled.
pub(crate) struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded").into())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// An origin on a port nobody listens on.
pub(crate) fn unreachable_api_origin() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    Url::parse(&format!("http://{addr}/")).unwrap()
}

pub(crate) fn unreachable_api() -> HttpAccountApi {
    HttpAccountApi::new(unreachable_api_origin()).unwrap()
}

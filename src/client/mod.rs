// src/client/mod.rs
//! Client side of the portal: validation, submission with local fallback, and
//! the timed UI transitions of the login and signup pages.

pub mod api;
pub mod clock;
pub mod config;
pub mod login;
pub mod signup;
pub mod storage;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{AccountApi, ClientError, HttpAccountApi};
pub use clock::{Clock, ManualClock, Scheduler, SystemClock};
pub use config::ClientConfig;
pub use login::LoginController;
pub use signup::SignupController;
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StorageError};

use thiserror::Error;

/// Which path confirmed the credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Via {
    Remote,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Validating,
    Submitting,
    Resolved(Via),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("render target unavailable: {0}")]
pub struct RenderTargetUnavailable(pub &'static str);

/// Last stop for errors a flow could not handle itself. Diagnostics only.
pub(crate) fn report_unhandled(context: &str, err: &dyn std::error::Error) {
    tracing::error!("Unhandled error in {}: {}", context, err);
}

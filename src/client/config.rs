// src/client/config.rs
use std::path::PathBuf;
use url::Url;

/// Loopback origin the pages talk to.
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:3000/";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_origin: Url,
    pub local_storage_path: PathBuf,
}

impl ClientConfig {
    pub fn new(api_origin: Url, local_storage_path: impl Into<PathBuf>) -> Self {
        Self {
            api_origin,
            local_storage_path: local_storage_path.into(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_origin: Url::parse(DEFAULT_API_ORIGIN).expect("Invalid default API origin"),
            local_storage_path: PathBuf::from("fbi_local_storage.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_loopback() {
        let config = ClientConfig::default();
        assert_eq!(config.api_origin.as_str(), "http://localhost:3000/");
        assert_eq!(
            config.api_origin.join("login").unwrap().as_str(),
            "http://localhost:3000/login"
        );
    }
}

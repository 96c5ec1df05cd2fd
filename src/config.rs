//! Application-level configuration loading from the environment.

use std::env;

use tracing::warn;

/// Environment variable selecting the storage backend.
const BACKEND_ENV: &str = "QUIZ_STORAGE_BACKEND";
/// Environment variable carrying the optional completion webhook URL.
const NOTIFY_WEBHOOK_ENV: &str = "QUIZ_NOTIFY_WEBHOOK_URL";
/// Default HTTP port when none is configured.
const DEFAULT_PORT: u16 = 8080;

/// Storage backend selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Embedded in-memory store, data lost on restart.
    Memory,
    /// MongoDB server (requires the `mongo-store` feature).
    Mongo,
    /// CouchDB over HTTP (requires the `couch-store` feature).
    Couch,
}

impl StorageBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "mongo" | "mongodb" => Some(Self::Mongo),
            "couch" | "couchdb" => Some(Self::Couch),
            _ => None,
        }
    }
}

/// Immutable runtime configuration shared across the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Selected storage backend.
    pub backend: StorageBackend,
    /// Completion notification webhook, disabled when absent.
    pub notify_webhook_url: Option<String>,
}

impl AppConfig {
    /// Load the configuration from environment variables, falling back to
    /// defaults for anything absent or unparseable.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let backend = match env::var(BACKEND_ENV) {
            Ok(value) => StorageBackend::parse(&value).unwrap_or_else(|| {
                warn!(
                    value,
                    "unrecognized storage backend; falling back to memory"
                );
                StorageBackend::Memory
            }),
            Err(_) => StorageBackend::Memory,
        };

        let notify_webhook_url = env::var(NOTIFY_WEBHOOK_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());

        Self {
            port,
            backend,
            notify_webhook_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_parse_case_insensitively() {
        assert_eq!(StorageBackend::parse("Memory"), Some(StorageBackend::Memory));
        assert_eq!(StorageBackend::parse("MONGODB"), Some(StorageBackend::Mongo));
        assert_eq!(StorageBackend::parse(" couch "), Some(StorageBackend::Couch));
        assert_eq!(StorageBackend::parse("sqlite"), None);
    }
}

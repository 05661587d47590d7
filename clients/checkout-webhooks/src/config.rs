use crate::error::ConfigError;
use crate::wire::{EncodeOptions, NullPolicy};
use std::env;

pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Largest body the codec will attempt to decode
    pub max_body_bytes: usize,
    pub null_policy: NullPolicy,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            null_policy: NullPolicy::Omit,
        }
    }
}

impl WebhookConfig {
    /// Load configuration from environment variables
    ///
    /// * `WEBHOOK_MAX_BODY_BYTES` - decode size limit (default 65536)
    /// * `WEBHOOK_ENCODE_NULLS` - `true` writes absent optional fields as `null` (default `false`)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let max_body_bytes = match env::var("WEBHOOK_MAX_BODY_BYTES") {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|_| ConfigError::Invalid {
                key: "WEBHOOK_MAX_BODY_BYTES",
                value: raw.clone(),
            })?,
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };

        let null_policy = match env::var("WEBHOOK_ENCODE_NULLS") {
            Ok(raw) => match raw.trim().parse::<bool>() {
                Ok(true) => NullPolicy::Emit,
                Ok(false) => NullPolicy::Omit,
                Err(_) => {
                    return Err(ConfigError::Invalid {
                        key: "WEBHOOK_ENCODE_NULLS",
                        value: raw,
                    })
                }
            },
            Err(_) => NullPolicy::Omit,
        };

        Ok(Self {
            max_body_bytes,
            null_policy,
        })
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::new(self.null_policy)
    }
}

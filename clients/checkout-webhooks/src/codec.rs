use crate::config::WebhookConfig;
use crate::envelope::{self, EventEnvelope};
use crate::error::{ConfigError, DecodeError, EncodeError};

/// Configured entry point for webhook handlers.
///
/// Wraps [`envelope::decode`] and [`envelope::encode`] with the body-size
/// limit and null policy from [`WebhookConfig`], and logs each outcome.
/// Holds no mutable state; share one instance across workers.
#[derive(Debug, Clone, Default)]
pub struct WebhookCodec {
    config: WebhookConfig,
}

impl WebhookCodec {
    pub fn new(config: WebhookConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(WebhookConfig::from_env()?))
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    pub fn decode(&self, body: &[u8]) -> Result<EventEnvelope, DecodeError> {
        if body.len() > self.config.max_body_bytes {
            tracing::warn!(
                size = body.len(),
                limit = self.config.max_body_bytes,
                "Webhook body exceeds size limit"
            );
            return Err(DecodeError::TooLarge {
                size: body.len(),
                limit: self.config.max_body_bytes,
            });
        }

        match envelope::decode(body) {
            Ok(envelope) => {
                tracing::debug!(
                    id = %envelope.id,
                    merchant_id = envelope.merchant_id,
                    event = %envelope.kind(),
                    payment_id = envelope.event.payment_id(),
                    "Decoded webhook event"
                );
                Ok(envelope)
            }
            Err(e) => {
                tracing::warn!(error = %e, kind = ?e.kind(), "Rejected webhook delivery");
                Err(e)
            }
        }
    }

    pub fn encode(&self, envelope: &EventEnvelope) -> Result<Vec<u8>, EncodeError> {
        envelope::encode(envelope, &self.config.encode_options())
    }
}

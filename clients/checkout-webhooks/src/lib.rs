//! # Checkout webhooks
//!
//! Decoder and canonical encoder for the checkout platform's webhook event
//! envelopes.
//!
//! A delivery is one JSON object carrying `id`, `merchantId`, `timestamp`,
//! `event` and `data`. The `event` name selects which of the twelve payload
//! shapes `data` must have, and it may appear before or after `data`. Decoding
//! is a single forward pass; order-line totals are recomputed and checked.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use checkout_webhooks::{EncodeOptions, WebhookCodec, WebhookEvent};
//!
//! # fn example(body: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let codec = WebhookCodec::from_env()?;
//! let envelope = codec.decode(body)?;
//!
//! if let WebhookEvent::ChargeCreated(charge) = &envelope.event {
//!     println!("charged {} on {}", charge.amount.amount, charge.payment_id);
//! }
//!
//! // Or without configuration:
//! let envelope = checkout_webhooks::decode(body)?;
//! let canonical = checkout_webhooks::encode(&envelope, &EncodeOptions::default())?;
//! # let _ = canonical;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod envelope;
pub mod error;
pub mod event_name;
pub mod model;
pub mod payload;
pub mod wire;

pub use codec::WebhookCodec;
pub use config::WebhookConfig;
pub use envelope::{decode, encode, EventEnvelope};
pub use error::{ConfigError, DecodeError, EncodeError, ErrorKind};
pub use event_name::{EventName, UnrecognizedEventName};
pub use payload::WebhookEvent;
pub use wire::{EncodeOptions, NullPolicy};

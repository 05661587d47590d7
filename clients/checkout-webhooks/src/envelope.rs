//! The webhook envelope and its order-independent decoder.
//!
//! `event` and `data` may arrive in either order. When `event` comes first
//! the payload is decoded in place; otherwise the `data` object is captured
//! verbatim as a [`RawValue`] and replayed once the outer object has closed
//! and the event name is known. At most one payload is ever buffered.

use crate::error::{DecodeError, EncodeError};
use crate::event_name::{EventName, UnrecognizedEventName};
use crate::payload::{PayloadSeed, WebhookEvent};
use crate::wire::{self, EncodeOptions, Wire, WireFormat};
use chrono::{DateTime, FixedOffset};
use serde::de::{self, DeserializeSeed, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::value::RawValue;
use std::fmt;
use uuid::Uuid;

/// One webhook delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEnvelope {
    /// Delivery identifier, the dedupe key for redeliveries
    pub id: Uuid,
    pub merchant_id: i64,
    /// When the event occurred, with the sender's offset
    pub timestamp: DateTime<FixedOffset>,
    pub event: WebhookEvent,
}

impl EventEnvelope {
    pub fn kind(&self) -> EventName {
        self.event.name()
    }
}

/// Decode one envelope document.
///
/// All-or-nothing: any missing, mistyped or inconsistent field rejects the
/// whole delivery.
pub fn decode(bytes: &[u8]) -> Result<EventEnvelope, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let partial = deserializer.deserialize_map(EnvelopeVisitor)?;
    deserializer.end()?;
    partial.finish()
}

pub fn encode(envelope: &EventEnvelope, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(&Wire::new(envelope, options))?)
}

impl WireFormat for EventEnvelope {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EventEnvelope", 5)?;
        state.serialize_field("id", &self.id.simple().to_string())?;
        state.serialize_field("merchantId", &self.merchant_id)?;
        state.serialize_field("timestamp", &self.timestamp.to_rfc3339())?;
        state.serialize_field("event", self.kind().as_str())?;
        wire::nested(&mut state, "data", &self.event, options)?;
        state.end()
    }
}

// ============================================================================
// DECODER STATE
// ============================================================================

enum EventSlot {
    Known(EventName),
    Unrecognized(String),
}

enum DataSlot {
    Decoded(WebhookEvent),
    Buffered(Box<RawValue>),
    /// `data` under an unrecognized event name, consumed without decoding
    Skipped,
}

#[derive(Default)]
struct PartialEnvelope {
    id: Option<Uuid>,
    merchant_id: Option<i64>,
    timestamp: Option<DateTime<FixedOffset>>,
    event: Option<EventSlot>,
    data: Option<DataSlot>,
}

impl PartialEnvelope {
    fn finish(self) -> Result<EventEnvelope, DecodeError> {
        let name = match self.event {
            Some(EventSlot::Unrecognized(name)) => return Err(DecodeError::UnrecognizedEvent(name)),
            Some(EventSlot::Known(name)) => Some(name),
            None => None,
        };
        let id = self.id.ok_or(DecodeError::IncompleteEnvelope("id"))?;
        let merchant_id = self.merchant_id.ok_or(DecodeError::IncompleteEnvelope("merchantId"))?;
        let timestamp = self.timestamp.ok_or(DecodeError::IncompleteEnvelope("timestamp"))?;
        let name = name.ok_or(DecodeError::IncompleteEnvelope("event"))?;

        let event = match self.data {
            Some(DataSlot::Decoded(event)) => event,
            Some(DataSlot::Buffered(raw)) => replay(name, &raw)?,
            Some(DataSlot::Skipped) | None => return Err(DecodeError::IncompleteEnvelope("data")),
        };

        Ok(EventEnvelope {
            id,
            merchant_id,
            timestamp,
            event,
        })
    }
}

fn replay(name: EventName, raw: &RawValue) -> Result<WebhookEvent, DecodeError> {
    tracing::debug!(event = %name, bytes = raw.get().len(), "replaying buffered webhook payload");
    let mut deserializer = serde_json::Deserializer::from_str(raw.get());
    let event = PayloadSeed(name).deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(event)
}

// ============================================================================
// TOP-LEVEL VISITOR
// ============================================================================

enum EnvelopeField {
    Id,
    MerchantId,
    Timestamp,
    Event,
    Data,
    Ignored,
}

impl<'de> Deserialize<'de> for EnvelopeField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl<'de> Visitor<'de> for FieldVisitor {
            type Value = EnvelopeField;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an envelope field name")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<EnvelopeField, E> {
                Ok(match value {
                    "id" => EnvelopeField::Id,
                    // merchantNumber is the older spelling of the same value
                    "merchantId" | "merchantNumber" => EnvelopeField::MerchantId,
                    "timestamp" => EnvelopeField::Timestamp,
                    "event" => EnvelopeField::Event,
                    "data" => EnvelopeField::Data,
                    _ => EnvelopeField::Ignored,
                })
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

struct EnvelopeVisitor;

impl<'de> Visitor<'de> for EnvelopeVisitor {
    type Value = PartialEnvelope;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a webhook event envelope object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<PartialEnvelope, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut partial = PartialEnvelope::default();

        while let Some(field) = map.next_key::<EnvelopeField>()? {
            match field {
                EnvelopeField::Id => {
                    reject_duplicate::<A::Error, _>(&partial.id, "id")?;
                    partial.id = Some(map.next_value()?);
                }
                EnvelopeField::MerchantId => {
                    reject_duplicate::<A::Error, _>(&partial.merchant_id, "merchantId")?;
                    partial.merchant_id = Some(map.next_value()?);
                }
                EnvelopeField::Timestamp => {
                    reject_duplicate::<A::Error, _>(&partial.timestamp, "timestamp")?;
                    partial.timestamp = Some(map.next_value()?);
                }
                EnvelopeField::Event => {
                    reject_duplicate::<A::Error, _>(&partial.event, "event")?;
                    let raw: String = map.next_value()?;
                    partial.event = Some(match raw.parse::<EventName>() {
                        Ok(name) => EventSlot::Known(name),
                        Err(UnrecognizedEventName(name)) => EventSlot::Unrecognized(name),
                    });
                }
                EnvelopeField::Data => {
                    reject_duplicate::<A::Error, _>(&partial.data, "data")?;
                    let slot = match &partial.event {
                        Some(EventSlot::Known(name)) => DataSlot::Decoded(map.next_value_seed(PayloadSeed(*name))?),
                        Some(EventSlot::Unrecognized(_)) => {
                            map.next_value::<IgnoredAny>()?;
                            DataSlot::Skipped
                        }
                        None => {
                            let raw: Box<RawValue> = map.next_value()?;
                            tracing::trace!(bytes = raw.get().len(), "webhook data preceded event, buffering");
                            DataSlot::Buffered(raw)
                        }
                    };
                    partial.data = Some(slot);
                }
                EnvelopeField::Ignored => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(partial)
    }
}

fn reject_duplicate<E: de::Error, T>(slot: &Option<T>, field: &'static str) -> Result<(), E> {
    match slot {
        Some(_) => Err(E::duplicate_field(field)),
        None => Ok(()),
    }
}

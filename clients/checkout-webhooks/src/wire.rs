//! Canonical encoding.
//!
//! Types write themselves through [`WireFormat`] rather than a derived
//! `Serialize`, because the null policy is chosen by the caller at encode
//! time. [`Wire`] pairs a value with the options so it can be handed to any
//! serde serializer.

use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

/// What to do with optional fields that have no value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPolicy {
    /// Leave the key out entirely
    #[default]
    Omit,
    /// Write the key with a JSON `null`
    Emit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    pub nulls: NullPolicy,
}

impl EncodeOptions {
    pub fn new(nulls: NullPolicy) -> Self {
        Self { nulls }
    }
}

pub trait WireFormat {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error>;
}

pub struct Wire<'a, T: ?Sized> {
    value: &'a T,
    options: &'a EncodeOptions,
}

impl<'a, T: ?Sized> Wire<'a, T> {
    pub fn new(value: &'a T, options: &'a EncodeOptions) -> Self {
        Self { value, options }
    }
}

impl<T: WireFormat + ?Sized> Serialize for Wire<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.write_wire(serializer, self.options)
    }
}

impl<T: WireFormat> WireFormat for [T] {
    fn write_wire<S: Serializer>(&self, serializer: S, options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(&Wire::new(item, options))?;
        }
        seq.end()
    }
}

/// Write an optional scalar field according to the null policy
pub(crate) fn optional_field<S, T>(
    state: &mut S,
    key: &'static str,
    value: Option<&T>,
    options: &EncodeOptions,
) -> Result<(), S::Error>
where
    S: SerializeStruct,
    T: Serialize + ?Sized,
{
    match (value, options.nulls) {
        (Some(value), _) => state.serialize_field(key, value),
        (None, NullPolicy::Emit) => state.serialize_field(key, &Option::<()>::None),
        (None, NullPolicy::Omit) => state.skip_field(key),
    }
}

/// Write an optional nested structure according to the null policy
pub(crate) fn optional_nested<S, T>(
    state: &mut S,
    key: &'static str,
    value: Option<&T>,
    options: &EncodeOptions,
) -> Result<(), S::Error>
where
    S: SerializeStruct,
    T: WireFormat + ?Sized,
{
    let wire = value.map(|value| Wire::new(value, options));
    optional_field(state, key, wire.as_ref(), options)
}

pub(crate) fn nested<S, T>(
    state: &mut S,
    key: &'static str,
    value: &T,
    options: &EncodeOptions,
) -> Result<(), S::Error>
where
    S: SerializeStruct,
    T: WireFormat + ?Sized,
{
    state.serialize_field(key, &Wire::new(value, options))
}

use crate::wire::{EncodeOptions, WireFormat};
use serde::de::{self, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Currencies the platform settles in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Chf,
    Czk,
    Dkk,
    Eur,
    Gbp,
    Huf,
    Isk,
    Nok,
    Pln,
    Sek,
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 11] = [
        Currency::Chf,
        Currency::Czk,
        Currency::Dkk,
        Currency::Eur,
        Currency::Gbp,
        Currency::Huf,
        Currency::Isk,
        Currency::Nok,
        Currency::Pln,
        Currency::Sek,
        Currency::Usd,
    ];

    /// ISO 4217 code, as written on the wire
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Chf => "CHF",
            Currency::Czk => "CZK",
            Currency::Dkk => "DKK",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Huf => "HUF",
            Currency::Isk => "ISK",
            Currency::Nok => "NOK",
            Currency::Pln => "PLN",
            Currency::Sek => "SEK",
            Currency::Usd => "USD",
        }
    }

    pub fn from_code(code: &str) -> Option<Currency> {
        Currency::ALL.into_iter().find(|currency| currency.code() == code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CurrencyVisitor;

        impl<'de> Visitor<'de> for CurrencyVisitor {
            type Value = Currency;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a supported ISO 4217 currency code")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Currency, E> {
                Currency::from_code(value).ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_str(CurrencyVisitor)
    }
}

/// An amount in minor units (öre, cents) of a currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

impl WireFormat for Money {
    fn write_wire<S: Serializer>(&self, serializer: S, _options: &EncodeOptions) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Money", 2)?;
        state.serialize_field("amount", &self.amount)?;
        state.serialize_field("currency", &self.currency)?;
        state.end()
    }
}

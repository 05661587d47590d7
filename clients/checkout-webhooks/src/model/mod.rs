//! Building blocks shared by the event payloads.

pub mod consumer;
pub mod details;
pub mod money;
pub mod order;

pub use consumer::{Address, CardDetails, CheckoutConsumer, PhoneNumber, ReservationConsumer, ThreeDSecure};
pub use details::{InvoiceDetails, PaymentError};
pub use money::{Currency, Money};
pub use order::{Order, OrderItems, OrderLine};

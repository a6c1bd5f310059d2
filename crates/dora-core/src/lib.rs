//! Conversation session client core.
//!
//! Owns the transcript state machine and the exchange cycle. Talks to the
//! outside world only through the traits in [`ports`].

pub mod event_bus;
pub mod exchange;
pub mod identity;
pub mod input;
pub mod ports;
pub mod store;

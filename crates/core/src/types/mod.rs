//! Core types for the shopcart console.
//!
//! This module provides type-safe wrappers for the shopcart service's records
//! and the payloads the console sends to it.

pub mod id;
pub mod message;
pub mod payload;
pub mod shopcart;

pub use id::*;
pub use message::ServerMessage;
pub use payload::{ItemPayload, SearchQuery, ShopcartPayload};
pub use shopcart::{CheckoutReceipt, Shopcart, ShopcartItem};

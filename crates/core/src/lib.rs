//! Shopcart Core - Shared data model.
//!
//! This crate provides the types exchanged with the shopcart REST service and
//! shared by every shopcart console component:
//! - `console` - Server-rendered admin console and request dispatcher
//! - `cli` - Command-line front end over the same dispatcher
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Shopcarts and
//! their items are owned and persisted by the remote service; these types only
//! describe what goes over the wire.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, shopcart records, request payloads and search queries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! Shopcart Console library.
//!
//! Administrative console for the shopcart REST service: two forms, a flash
//! line and a result table, driven by one button per service endpoint.
//!
//! The same [`controller::Console`] view-model backs both the web page
//! (`shopcart-console` binary) and the `shopcart` command line tool.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod flash;
pub mod forms;
pub mod render;
pub mod routes;
pub mod state;

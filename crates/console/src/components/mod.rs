//! Reusable UI components for the console page.

pub mod result_table;

pub use result_table::*;

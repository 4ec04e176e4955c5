//! Common utility functions shared across the domain and player crates.
//!
//! Pure functions only: no side effects, no I/O, and nothing that would keep
//! the code from building for `wasm32`.

pub mod datetime;

pub use datetime::{format_iso_millis, iso_date, parse_datetime};

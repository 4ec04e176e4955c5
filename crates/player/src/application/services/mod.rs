//! Application services
//!
//! Services sit on top of the stores and platform ports. They hold no domain
//! state of their own.

pub mod play_service;

pub use play_service::{PlayService, SharedPlayStore};

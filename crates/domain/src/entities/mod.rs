//! Domain entities - Core business objects with identity

mod play;

pub use play::{CreatePlayRequest, Play, PlayerState, Position, StateTimestamp};

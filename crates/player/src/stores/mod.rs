//! Stateful stores owned by the player side.

mod plays;
mod session;

pub use plays::{PlayStore, StoreError};
pub use session::SessionGuard;

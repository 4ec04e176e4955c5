pub mod logging;
pub mod platform;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use logging::init_logging;

//! Tracing setup for whichever target the crate is built for.

use std::sync::Once;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install the global tracing subscriber. Only the first call has an effect.
///
/// Native builds log to stdout, honouring `RUST_LOG` when set. Browser builds
/// log to the devtools console and route panics there too.
pub fn init_logging() {
    INIT.call_once(|| {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let installed = tracing_subscriber::registry()
                .with(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "squiggle_player=debug,squiggle_domain=info".into()),
                )
                .with(tracing_subscriber::fmt::layer())
                .try_init();
            if installed.is_err() {
                tracing::debug!("Tracing subscriber was already installed by the host");
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            console_error_panic_hook::set_once();
            tracing_wasm::set_as_global_default();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging();
        init_logging();
        tracing::info!("still logging");
    }
}

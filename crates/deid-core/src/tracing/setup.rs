//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

/// Environment variable holding an `EnvFilter` directive string,
/// e.g. `DEID_LOG=deid_pipeline=debug,deid_generalize=info`.
pub const LOG_ENV_VAR: &str = "DEID_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber. `DEID_LOG` wins over the configured level.
///
/// Output goes to stdout; these progress lines are not a stable interface.
/// Only the first call has any effect.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        if config.json {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_target(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(false))
                .with(filter)
                .init();
        }
    });
}

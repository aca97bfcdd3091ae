//! Tracing subscriber initialisation.

use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Directives used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn,stickyboard_infra=info,stickyboard_common=info";

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Install the global subscriber
///
/// Returns `false` when a subscriber was already installed, which makes
/// repeated calls (tests, embedding apps) harmless.
pub fn init_tracing(format: LogFormat) -> bool {
    let installed = match format {
        LogFormat::Compact => {
            init_with_layer(tracing_subscriber::fmt::layer().compact().with_target(true))
        }
        LogFormat::Json => init_with_layer(
            tracing_subscriber::fmt::layer().json().with_current_span(true).with_target(true),
        ),
    };
    if installed {
        tracing::debug!(?format, "Tracing initialised");
    }
    installed
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn init_with_layer<L>(fmt_layer: L) -> bool
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(fmt_layer).with(build_env_filter()).try_init().is_ok()
}

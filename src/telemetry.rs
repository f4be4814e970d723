//! Opt-in `tracing` bootstrap for hosts embedding `storefront-charts`.
//!
//! Facades log data replacement and frame builds at `debug`, press routing at
//! `trace`, and degraded input (mismatched bands, zero pie totals) at `warn`.
//! Hosts that already own a subscriber never need this module.

/// Filter used when `RUST_LOG` is unset: chart warnings only.
pub const DEFAULT_CHART_LOG_FILTER: &str = "storefront_charts=warn";

/// Installs a compact fmt subscriber, honouring `RUST_LOG` first and falling
/// back to [`DEFAULT_CHART_LOG_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when the host already
/// installed a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_CHART_LOG_FILTER)
}

/// Same as [`init_default_tracing`] with caller-chosen fallback directives,
/// e.g. `"storefront_charts=debug"` while tuning a dashboard layout.
#[must_use]
pub fn init_tracing_with_filter(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(fallback_directives));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}

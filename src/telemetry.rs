//! Telemetry helpers for native consumers of `qiposter`.
//!
//! Tracing setup stays explicit and opt-in. The CLI calls
//! [`init_default_tracing`]; embedders can install their own subscriber
//! instead. In the browser, failures that matter are also mirrored to the
//! console by the modules that raise them.

/// Initializes a default `tracing` subscriber writing to stderr when the
/// `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

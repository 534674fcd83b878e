//! Operator-facing log sink used by the request handler.

use serde_json::Value;

/// Receives log lines for one request, in the order the handler emits them.
///
/// Calls are fire-and-forget: a notifier never fails the request.
pub trait Notifier: Send + Sync {
    /// Informational line.
    fn info(&self, message: &str);

    /// Informational structured payload, such as a raw request body.
    fn info_object(&self, payload: &Value);

    /// Detail useful only when debugging.
    fn verbose(&self, message: &str);

    /// Failure line carrying the raw cause.
    fn error(&self, message: &str);
}

/// [`Notifier`] forwarding to the `tracing` macros.
///
/// `verbose` maps to the debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn info_object(&self, payload: &Value) {
        tracing::info!(%payload, "payload");
    }

    fn verbose(&self, message: &str) {
        tracing::debug!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

//! Event emitter abstraction for decoupling services from transport.
//!
//! Services depend on the [`EventEmitter`] trait rather than concrete
//! broadcast channels, enabling testing and alternative transport
//! implementations.

use super::{CastEvent, ThemeEvent};

/// Trait for emitting domain events without knowledge of transport.
///
/// Services use this trait to emit events, decoupling them from how events
/// reach listeners (broadcast channel, shell-specific binding, test fake).
pub trait EventEmitter: Send + Sync {
    /// Emits a theme or app icon event.
    fn emit_theme(&self, event: ThemeEvent);

    /// Emits a casting session event.
    fn emit_cast(&self, event: CastEvent);
}

/// No-op emitter for headless use or testing.
///
/// Events are silently discarded.
pub struct NoopEventEmitter;

impl EventEmitter for NoopEventEmitter {
    fn emit_theme(&self, _event: ThemeEvent) {
        // No-op
    }

    fn emit_cast(&self, _event: CastEvent) {
        // No-op
    }
}

/// Logging emitter for debugging and development.
///
/// Logs all events at debug level. Useful for debugging event flow
/// without a subscribed UI.
pub struct LoggingEventEmitter;

impl EventEmitter for LoggingEventEmitter {
    fn emit_theme(&self, event: ThemeEvent) {
        tracing::debug!(?event, "theme_event");
    }

    fn emit_cast(&self, event: CastEvent) {
        tracing::debug!(?event, "cast_event");
    }
}

//! Event system for real-time UI updates.
//!
//! This module provides:
//! - [`EventEmitter`] trait for domain services to emit events
//! - [`BroadcastEventBridge`] for fanning events out to subscribers
//! - Event types for the theme and casting domains

mod bridge;
mod emitter;

pub use bridge::BroadcastEventBridge;
pub use emitter::{EventEmitter, LoggingEventEmitter, NoopEventEmitter};

use serde::Serialize;

use crate::theme::Theme;

/// Events broadcast to UI listeners.
///
/// This enum categorizes all real-time events the core library produces.
/// Each category has its own inner event type with specific variants.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "category", rename_all = "camelCase")]
pub enum BroadcastEvent {
    /// Events from the theme/icon coordinator.
    Theme(ThemeEvent),

    /// Events from the casting session boundary.
    Cast(CastEvent),
}

/// Events related to theme and app icon state changes.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ThemeEvent {
    /// The active theme changed.
    ThemeChanged {
        /// The newly active theme.
        theme: Theme,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// The platform accepted an app icon change.
    IconApplied {
        /// The icon that is now active (`None` = primary icon).
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// The platform rejected an app icon change.
    ///
    /// The active icon is unchanged; there is no retry.
    IconApplyFailed {
        /// The icon that was requested (`None` = primary icon).
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        /// Error message describing the failure.
        error: String,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
}

/// Session notifications posted by the casting SDK boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CastEvent {
    /// A casting session was established.
    SessionStarted {
        /// Friendly name of the receiver device.
        #[serde(rename = "deviceName")]
        device_name: String,
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
    /// The casting session ended.
    SessionEnded {
        /// Unix timestamp in milliseconds.
        timestamp: u64,
    },
}

// From implementations for converting inner events to BroadcastEvent
impl From<ThemeEvent> for BroadcastEvent {
    fn from(event: ThemeEvent) -> Self {
        BroadcastEvent::Theme(event)
    }
}

impl From<CastEvent> for BroadcastEvent {
    fn from(event: CastEvent) -> Self {
        BroadcastEvent::Cast(event)
    }
}

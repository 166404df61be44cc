//! Centralized error types for the Ondas core library.
//!
//! The only fallible operation the library performs is the platform
//! alternate-icon swap; everything else is total (preference writes degrade
//! to logged warnings, events are fire-and-forget).

use thiserror::Error;

/// Errors from the platform alternate-icon facility.
#[derive(Debug, Error)]
pub enum IconError {
    /// The platform does not support alternate app icons.
    ///
    /// Callers normally avoid this by checking
    /// [`AlternateIcons::supports_alternate_icons`](crate::icons::AlternateIcons::supports_alternate_icons)
    /// first; implementations return it when asked to set an icon anyway.
    #[error("alternate icons are not supported on this platform")]
    Unsupported,

    /// The platform rejected the icon change.
    ///
    /// Wraps whatever diagnostic the OS call produced. A failed swap leaves
    /// the active icon unchanged.
    #[error("icon change rejected by the platform: {0}")]
    Platform(String),
}

/// Convenient Result alias for icon operations.
pub type IconResult<T> = Result<T, IconError>;

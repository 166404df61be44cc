//! Platform alternate-icon facility abstraction.
//!
//! The OS owns the actual icon registry and the asynchronous swap call; this
//! module defines the narrow seam the coordinator talks through, so shells
//! plug in their platform implementation and tests plug in fakes.

use async_trait::async_trait;

use crate::error::IconResult;

/// Trait for the OS alternate app icon facility.
///
/// Mirrors the three things the platform exposes: whether alternate icons
/// exist at all, which icon is currently active, and an asynchronous
/// set-icon call. `None` always denotes the primary icon.
#[async_trait]
pub trait AlternateIcons: Send + Sync {
    /// Whether this platform supports alternate app icons.
    fn supports_alternate_icons(&self) -> bool;

    /// Identifier of the currently active icon (`None` = primary icon).
    fn active_icon(&self) -> Option<String>;

    /// Requests the platform switch to the given icon.
    ///
    /// The call is asynchronous on every supporting platform; completion
    /// signals whether the swap took effect. A failed swap leaves the
    /// active icon unchanged.
    ///
    /// # Arguments
    /// * `icon` - Identifier of the icon to activate, or `None` for the
    ///   primary icon
    ///
    /// # Errors
    ///
    /// Returns [`IconError::Unsupported`](crate::error::IconError::Unsupported)
    /// when the platform has no alternate-icon facility, or
    /// [`IconError::Platform`](crate::error::IconError::Platform) when the
    /// OS rejects the change.
    async fn set_icon(&self, icon: Option<&str>) -> IconResult<()>;
}

/// Icon facility for platforms without alternate icons.
///
/// Reports no support and rejects set calls; the coordinator's support
/// check turns icon actions into silent no-ops before reaching it.
pub struct NoAlternateIcons;

#[async_trait]
impl AlternateIcons for NoAlternateIcons {
    fn supports_alternate_icons(&self) -> bool {
        false
    }

    fn active_icon(&self) -> Option<String> {
        None
    }

    async fn set_icon(&self, _icon: Option<&str>) -> IconResult<()> {
        Err(crate::error::IconError::Unsupported)
    }
}

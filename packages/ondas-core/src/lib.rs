//! Ondas Core - shared library for Ondas Radio.
//!
//! This crate provides the coordination layer of Ondas Radio, an
//! internet-radio app with casting support. It is designed to be embedded
//! by the platform shells, which own the UI and the casting SDK and plug
//! into this crate through narrow seams.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`runtime`]: Task spawning abstraction for async runtime independence
//! - [`events`]: Event system for real-time UI updates
//! - [`theme`]: Theme model and its derived attribute table
//! - [`prefs`]: Persisted user preference store
//! - [`icons`]: Platform alternate-icon facility abstraction
//! - [`services`]: Theme/icon coordination and published cast status
//! - [`state`]: Library configuration
//! - [`error`]: Centralized error types
//!
//! # Abstraction Traits
//!
//! The crate defines several traits to decouple core logic from
//! platform-specific implementations:
//!
//! - [`TaskSpawner`](runtime::TaskSpawner): Spawning background tasks
//! - [`EventEmitter`](events::EventEmitter): Emitting domain events
//! - [`PreferenceStore`](prefs::PreferenceStore): Persisted key-value preferences
//! - [`AlternateIcons`](icons::AlternateIcons): The OS alternate app icon facility
//!
//! Shells provide platform implementations; tests use the in-memory and
//! recording implementations shipped alongside the traits.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bootstrap;
pub mod error;
pub mod events;
pub mod icons;
pub mod prefs;
pub mod runtime;
pub mod services;
pub mod state;
pub mod theme;
pub mod utils;

// Re-export commonly used types at the crate root
pub use bootstrap::{bootstrap_services, BootstrappedServices};
pub use error::{IconError, IconResult};
pub use events::{
    BroadcastEvent, BroadcastEventBridge, CastEvent, EventEmitter, LoggingEventEmitter,
    NoopEventEmitter, ThemeEvent,
};
pub use icons::{AlternateIcons, NoAlternateIcons};
pub use prefs::{JsonFilePreferences, MemoryPreferences, PreferenceStore};
pub use runtime::{TaskSpawner, TokioSpawner};
pub use services::{CastStatus, CastStatusAdapter, ThemeIconCoordinator};
pub use state::Config;
pub use theme::{Theme, ESCURO_ICON, ICON_CYCLE};
pub use utils::now_millis;

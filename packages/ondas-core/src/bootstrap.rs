//! Application bootstrap and dependency wiring.
//!
//! This module contains the composition root - the single place where the
//! core services are instantiated and wired together. This pattern provides:
//!
//! - **Clarity**: All dependency relationships are visible in one place
//! - **Testability**: Easy to swap implementations for testing
//! - **Maintainability**: Service creation logic is isolated from usage

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::events::{BroadcastEvent, BroadcastEventBridge, CastEvent, EventEmitter};
use crate::icons::AlternateIcons;
use crate::prefs::{JsonFilePreferences, PreferenceStore};
use crate::runtime::TokioSpawner;
use crate::services::{CastStatusAdapter, ThemeIconCoordinator};
use crate::state::Config;

/// Container for all bootstrapped services.
///
/// This struct holds the wired services created during bootstrap. Shells
/// keep it alive for the life of the process and hand the pieces to their
/// UI layers.
#[derive(Clone)]
pub struct BootstrappedServices {
    /// Coordinates the active theme with the platform app icon.
    pub theme_coordinator: Arc<ThemeIconCoordinator>,
    /// Publishes the mirrored casting session status.
    pub cast_status: Arc<CastStatusAdapter>,
    /// Sender the shell's casting session listener posts notifications into.
    pub session_tx: mpsc::Sender<CastEvent>,
    /// Broadcast channel sender for real-time events.
    pub broadcast_tx: broadcast::Sender<BroadcastEvent>,
    /// Event bridge for emitting events to subscribers and an optional
    /// shell emitter.
    pub event_bridge: Arc<BroadcastEventBridge>,
    /// Persisted preference store.
    pub prefs: Arc<dyn PreferenceStore>,
    /// Task spawner for background operations.
    pub spawner: TokioSpawner,
}

/// Bootstraps the core services with their dependencies.
///
/// This is the composition root where the services are instantiated and
/// wired together, in dependency order:
///
/// 1. Shared infrastructure (spawner, broadcast channel, event bridge)
/// 2. Preference store (loaded from the app data directory)
/// 3. Theme/icon coordinator
/// 4. Cast status adapter (forwarder started)
///
/// Infallible: a missing or unreadable preference file falls back to
/// defaults, and nothing else can fail to construct.
///
/// # Arguments
/// * `config` - Channel capacities
/// * `data_dir` - App data directory holding the preference file
/// * `icons` - Platform alternate-icon facility (shell-provided)
///
/// # Panics
///
/// Panics if called outside of a Tokio runtime context.
pub fn bootstrap_services(
    config: &Config,
    data_dir: &Path,
    icons: Arc<dyn AlternateIcons>,
) -> BootstrappedServices {
    // Create task spawner from current runtime
    let spawner = TokioSpawner::current();

    // Create broadcast channel for real-time events to UI listeners
    let (broadcast_tx, _) = broadcast::channel::<BroadcastEvent>(config.event_channel_capacity);

    // Create the event bridge that maps domain events to broadcast transport
    let event_bridge = Arc::new(BroadcastEventBridge::with_sender(broadcast_tx.clone()));

    // Load persisted preferences
    let prefs: Arc<dyn PreferenceStore> = Arc::new(JsonFilePreferences::load(data_dir));

    // Wire up the theme/icon coordinator with its dependencies
    let theme_coordinator = Arc::new(ThemeIconCoordinator::new(
        Arc::clone(&prefs),
        icons,
        Arc::clone(&event_bridge) as Arc<dyn EventEmitter>,
        spawner.clone(),
    ));

    // Channel the shell's casting session listener posts into
    let (session_tx, session_rx) = mpsc::channel(config.session_channel_capacity);

    // Wire up the cast status adapter and start draining notifications
    let cast_status = Arc::new(CastStatusAdapter::new(
        Arc::clone(&event_bridge) as Arc<dyn EventEmitter>,
        session_rx,
        spawner.clone(),
    ));
    cast_status.start_event_forwarder();

    log::info!("[Bootstrap] Core services wired");

    BootstrappedServices {
        theme_coordinator,
        cast_status,
        session_tx,
        broadcast_tx,
        event_bridge,
        prefs,
        spawner,
    }
}

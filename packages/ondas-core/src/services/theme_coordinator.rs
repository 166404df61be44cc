//! Theme and app icon coordination service.
//!
//! Responsibilities:
//! - Owning the active theme, the explicit icon selection, and the policy
//!   flag linking the two
//! - Persisting all three through the preference store on every mutation
//! - Applying alternate app icons through the platform facility
//!
//! Three user intents meet here: "change theme and let the icon follow",
//! "change theme only", and "change icon only". Each action performs its
//! mutation, persistence, and any icon cascade as one visible step; there
//! is no observer indirection. The reentrancy guard keeps a manual icon
//! apply from ever being folded back into a theme-driven one.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::events::{EventEmitter, ThemeEvent};
use crate::icons::AlternateIcons;
use crate::prefs::PreferenceStore;
use crate::runtime::{TaskSpawner, TokioSpawner};
use crate::theme::{Theme, ICON_CYCLE};
use crate::utils::now_millis;

/// Preference key for the active theme identifier.
const THEME_KEY: &str = "appearance.theme";
/// Preference key for the theme-drives-icon policy flag.
const SYNC_ICON_KEY: &str = "appearance.sync_icon_with_theme";
/// Preference key for the last explicitly selected icon.
const SELECTED_ICON_KEY: &str = "appearance.selected_icon";

/// Mutable coordinator state, serialized behind one lock.
///
/// `applying_icon_manually` is the transient reentrancy guard; everything
/// else mirrors a persisted preference.
#[derive(Debug)]
struct ThemeState {
    active_theme: Theme,
    selected_icon: Option<String>,
    sync_icon_with_theme: bool,
    applying_icon_manually: bool,
}

/// Coordinates the active theme with the platform app icon.
///
/// One instance is constructed at startup (see
/// [`bootstrap_services`](crate::bootstrap::bootstrap_services)) and shared
/// as `Arc` with whichever UI components need it. All mutations are
/// serialized by an internal lock; the lock is never held across the
/// asynchronous platform call.
///
/// When `sync_icon_with_theme` is on, the platform icon converges to the
/// active theme's mapped icon once the fire-and-forget set call settles.
/// When off, theme changes never touch the icon and the icon is governed
/// solely by the explicit icon actions.
pub struct ThemeIconCoordinator {
    prefs: Arc<dyn PreferenceStore>,
    icons: Arc<dyn AlternateIcons>,
    emitter: Arc<dyn EventEmitter>,
    spawner: TokioSpawner,
    state: Arc<Mutex<ThemeState>>,
}

impl ThemeIconCoordinator {
    /// Creates the coordinator, loading persisted state.
    ///
    /// Missing or unreadable preferences fall back to the default theme,
    /// sync policy off, and no icon selection.
    pub fn new(
        prefs: Arc<dyn PreferenceStore>,
        icons: Arc<dyn AlternateIcons>,
        emitter: Arc<dyn EventEmitter>,
        spawner: TokioSpawner,
    ) -> Self {
        let active_theme = prefs
            .get(THEME_KEY)
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let sync_icon_with_theme = prefs
            .get(SYNC_ICON_KEY)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let selected_icon = prefs
            .get(SELECTED_ICON_KEY)
            .and_then(|v| v.as_str().map(str::to_string));

        Self {
            prefs,
            icons,
            emitter,
            spawner,
            state: Arc::new(Mutex::new(ThemeState {
                active_theme,
                selected_icon,
                sync_icon_with_theme,
                applying_icon_manually: false,
            })),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Theme actions
    // ─────────────────────────────────────────────────────────────────────

    /// Advances to the next theme and lets the app icon follow it.
    pub fn cycle_theme_and_icon(&self) {
        self.update_theme(Theme::next, true);
    }

    /// Activates the given theme and lets the app icon follow it.
    pub fn select_theme_and_icon(&self, theme: Theme) {
        self.update_theme(|_| theme, true);
    }

    /// Advances to the next theme without touching the app icon.
    pub fn cycle_theme_only(&self) {
        self.update_theme(Theme::next, false);
    }

    /// Activates the given theme without touching the app icon.
    pub fn select_theme_only(&self, theme: Theme) {
        self.update_theme(|_| theme, false);
    }

    /// Single mutation + cascade step behind every theme action.
    ///
    /// `new_theme` derives the theme to activate from the currently locked
    /// one, so a cycle is atomic: two concurrent actions can never observe
    /// the same starting theme and collapse into one step.
    ///
    /// The cascade runs whenever the policy flag is being set and the
    /// reentrancy guard is clear, even if the theme value is unchanged:
    /// re-linking icon to theme after a period of divergence must still
    /// converge the icon. The request path skips the platform call when
    /// the icon already matches.
    fn update_theme(&self, new_theme: impl FnOnce(Theme) -> Theme, sync_icon: bool) {
        let (theme, changed, cascade) = {
            let mut state = self.state.lock();
            state.sync_icon_with_theme = sync_icon;
            let theme = new_theme(state.active_theme);
            let changed = state.active_theme != theme;
            state.active_theme = theme;
            (theme, changed, sync_icon && !state.applying_icon_manually)
        };

        self.prefs.set(SYNC_ICON_KEY, Value::Bool(sync_icon));
        self.prefs.set(THEME_KEY, json!(theme));

        if changed {
            log::info!("[ThemeCoordinator] Theme changed to {:?}", theme);
            self.emitter.emit_theme(ThemeEvent::ThemeChanged {
                theme,
                timestamp: now_millis(),
            });
        }

        if cascade {
            self.request_icon(theme.icon_id().map(str::to_string), false);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Icon actions
    // ─────────────────────────────────────────────────────────────────────

    /// Advances the app icon through the fixed cycle, unlinking it from the
    /// theme.
    ///
    /// Silent no-op on platforms without alternate icons: neither the
    /// policy flag nor any preference is touched. The cycle position comes
    /// from the platform's currently active icon, not from the persisted
    /// selection; an icon outside the cycle restarts it at the primary
    /// icon.
    pub fn cycle_icon_only(&self) {
        if !self.icons.supports_alternate_icons() {
            return;
        }

        self.state.lock().sync_icon_with_theme = false;
        self.prefs.set(SYNC_ICON_KEY, Value::Bool(false));

        let active = self.icons.active_icon();
        let next = match ICON_CYCLE.iter().position(|c| *c == active.as_deref()) {
            Some(i) => ICON_CYCLE[(i + 1) % ICON_CYCLE.len()],
            None => ICON_CYCLE[0],
        };
        self.request_icon(next.map(str::to_string), true);
    }

    /// Selects an app icon explicitly (`None` = primary icon), unlinking it
    /// from the theme.
    ///
    /// The selection is recorded and persisted, then the icon is requested
    /// regardless of the current platform state; the request path still
    /// suppresses a platform call when the icon is already active.
    pub fn select_icon_only(&self, icon: Option<&str>) {
        {
            let mut state = self.state.lock();
            state.sync_icon_with_theme = false;
            state.selected_icon = icon.map(str::to_string);
        }
        self.prefs.set(SYNC_ICON_KEY, Value::Bool(false));
        match icon {
            Some(id) => self
                .prefs
                .set(SELECTED_ICON_KEY, Value::String(id.to_string())),
            None => self.prefs.remove(SELECTED_ICON_KEY),
        }

        self.request_icon(icon.map(str::to_string), true);
    }

    /// Hands the icon swap to the platform, fire-and-forget.
    ///
    /// Preconditions: platform support, and the requested icon differs
    /// from the active one. `manual` marks the explicit icon entry points;
    /// only they set the reentrancy guard. Completion always clears the
    /// guard, success or failure, so a rejected swap can never wedge
    /// future theme-driven cascades.
    fn request_icon(&self, icon: Option<String>, manual: bool) {
        if !self.icons.supports_alternate_icons() {
            return;
        }
        if self.icons.active_icon() == icon {
            log::debug!("[ThemeCoordinator] Icon {:?} already active, skipping", icon);
            return;
        }

        if manual {
            self.state.lock().applying_icon_manually = true;
        }

        let icons = Arc::clone(&self.icons);
        let emitter = Arc::clone(&self.emitter);
        let state = Arc::clone(&self.state);
        self.spawner.spawn(async move {
            let result = icons.set_icon(icon.as_deref()).await;
            state.lock().applying_icon_manually = false;
            match result {
                Ok(()) => {
                    emitter.emit_theme(ThemeEvent::IconApplied {
                        icon,
                        timestamp: now_millis(),
                    });
                }
                Err(e) => {
                    log::warn!("[ThemeCoordinator] Icon change failed: {}", e);
                    emitter.emit_theme(ThemeEvent::IconApplyFailed {
                        icon,
                        error: e.to_string(),
                        timestamp: now_millis(),
                    });
                }
            }
        });
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read surface
    // ─────────────────────────────────────────────────────────────────────

    /// The currently active theme.
    pub fn active_theme(&self) -> Theme {
        self.state.lock().active_theme
    }

    /// Whether theme changes currently drive the app icon.
    pub fn sync_icon_with_theme(&self) -> bool {
        self.state.lock().sync_icon_with_theme
    }

    /// The last icon the user selected explicitly, if any.
    pub fn selected_icon(&self) -> Option<String> {
        self.state.lock().selected_icon.clone()
    }

    /// Resolves a base asset name to the active theme's variant.
    ///
    /// UI layers use this to pick theme-specific assets without knowing
    /// the theme enum.
    pub fn themed_image_name(&self, base: &str) -> String {
        self.state.lock().active_theme.themed_asset_name(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IconError, IconResult};
    use crate::events::CastEvent;
    use crate::prefs::{JsonFilePreferences, MemoryPreferences};
    use crate::theme::ESCURO_ICON;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    /// Platform fake that records set calls and tracks the active icon.
    struct RecordingIcons {
        supported: bool,
        fail_sets: AtomicBool,
        /// Simulated platform latency, so tests can race the guard.
        set_delay: Duration,
        active: Mutex<Option<String>>,
        set_calls: Mutex<Vec<Option<String>>>,
    }

    impl RecordingIcons {
        fn new() -> Self {
            Self {
                supported: true,
                fail_sets: AtomicBool::new(false),
                set_delay: Duration::ZERO,
                active: Mutex::new(None),
                set_calls: Mutex::new(Vec::new()),
            }
        }

        fn unsupported() -> Self {
            Self {
                supported: false,
                ..Self::new()
            }
        }

        fn with_delay(delay: Duration) -> Self {
            Self {
                set_delay: delay,
                ..Self::new()
            }
        }

        fn call_count(&self) -> usize {
            self.set_calls.lock().len()
        }
    }

    #[async_trait]
    impl AlternateIcons for RecordingIcons {
        fn supports_alternate_icons(&self) -> bool {
            self.supported
        }

        fn active_icon(&self) -> Option<String> {
            self.active.lock().clone()
        }

        async fn set_icon(&self, icon: Option<&str>) -> IconResult<()> {
            if !self.set_delay.is_zero() {
                tokio::time::sleep(self.set_delay).await;
            }
            self.set_calls.lock().push(icon.map(str::to_string));
            if self.fail_sets.load(Ordering::SeqCst) {
                return Err(IconError::Platform("rejected".to_string()));
            }
            *self.active.lock() = icon.map(str::to_string);
            Ok(())
        }
    }

    /// Emitter fake that collects theme events.
    #[derive(Default)]
    struct CollectingEmitter {
        theme_events: Mutex<Vec<ThemeEvent>>,
    }

    impl EventEmitter for CollectingEmitter {
        fn emit_theme(&self, event: ThemeEvent) {
            self.theme_events.lock().push(event);
        }

        fn emit_cast(&self, _event: CastEvent) {}
    }

    struct Fixture {
        icons: Arc<RecordingIcons>,
        prefs: Arc<MemoryPreferences>,
        emitter: Arc<CollectingEmitter>,
        coordinator: ThemeIconCoordinator,
    }

    fn fixture_with_icons(icons: RecordingIcons) -> Fixture {
        let icons = Arc::new(icons);
        let prefs = Arc::new(MemoryPreferences::new());
        let emitter = Arc::new(CollectingEmitter::default());
        let coordinator = ThemeIconCoordinator::new(
            prefs.clone(),
            icons.clone(),
            emitter.clone(),
            TokioSpawner::current(),
        );
        Fixture {
            icons,
            prefs,
            emitter,
            coordinator,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_icons(RecordingIcons::new())
    }

    /// Lets spawned icon applications run to completion.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Linked theme + icon actions
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn select_theme_and_icon_converges_icon_for_both_themes() {
        for theme in Theme::ALL {
            let f = fixture();
            f.coordinator.select_theme_and_icon(theme);
            settle().await;

            assert!(f.coordinator.sync_icon_with_theme());
            assert_eq!(f.coordinator.active_theme(), theme);
            assert_eq!(
                f.icons.active_icon().as_deref(),
                theme.icon_id(),
                "icon should match mapping for {theme:?}"
            );
        }
    }

    #[tokio::test]
    async fn cycle_theme_and_icon_advances_and_applies() {
        let f = fixture();
        f.coordinator.cycle_theme_and_icon();
        settle().await;

        assert_eq!(f.coordinator.active_theme(), Theme::Escuro);
        assert_eq!(f.icons.active_icon().as_deref(), Some(ESCURO_ICON));

        f.coordinator.cycle_theme_and_icon();
        settle().await;

        assert_eq!(f.coordinator.active_theme(), Theme::Default);
        assert_eq!(f.icons.active_icon(), None);
    }

    #[tokio::test]
    async fn reselecting_current_theme_still_converges_icon() {
        let f = fixture();
        // Diverge: theme Escuro without icon, then hand the icon back to
        // the theme without changing the theme value.
        f.coordinator.select_theme_only(Theme::Escuro);
        settle().await;
        assert_eq!(f.icons.active_icon(), None);

        f.coordinator.select_theme_and_icon(Theme::Escuro);
        settle().await;

        assert_eq!(f.icons.active_icon().as_deref(), Some(ESCURO_ICON));
        // No theme value change, so exactly one ThemeChanged overall.
        let changes = f
            .emitter
            .theme_events
            .lock()
            .iter()
            .filter(|e| matches!(e, ThemeEvent::ThemeChanged { .. }))
            .count();
        assert_eq!(changes, 1);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Theme-only actions
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn select_theme_only_never_touches_the_icon() {
        for theme in Theme::ALL {
            let f = fixture();
            f.coordinator.select_theme_only(theme);
            settle().await;

            assert!(!f.coordinator.sync_icon_with_theme());
            assert_eq!(f.coordinator.active_theme(), theme);
            assert_eq!(f.icons.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn cycle_theme_only_suppresses_the_cascade() {
        let f = fixture();
        f.coordinator.select_icon_only(Some(ESCURO_ICON));
        settle().await;
        assert_eq!(f.icons.call_count(), 1);

        f.coordinator.cycle_theme_only();
        settle().await;

        assert_eq!(f.coordinator.active_theme(), Theme::Escuro);
        // Icon untouched by the theme change.
        assert_eq!(f.icons.call_count(), 1);
        assert_eq!(f.icons.active_icon().as_deref(), Some(ESCURO_ICON));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Icon-only actions
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn cycle_icon_only_twice_returns_to_primary() {
        let f = fixture();

        f.coordinator.cycle_icon_only();
        settle().await;
        assert_eq!(f.icons.active_icon().as_deref(), Some(ESCURO_ICON));

        f.coordinator.cycle_icon_only();
        settle().await;
        assert_eq!(f.icons.active_icon(), None);
        assert_eq!(f.icons.call_count(), 2);
    }

    #[tokio::test]
    async fn cycle_icon_only_without_support_is_a_silent_noop() {
        let f = fixture_with_icons(RecordingIcons::unsupported());

        f.coordinator.cycle_icon_only();
        settle().await;

        assert_eq!(f.icons.call_count(), 0);
        // No persisted mutation either: the policy flag was never written.
        assert_eq!(f.prefs.get(SYNC_ICON_KEY), None);
    }

    #[tokio::test]
    async fn cycle_icon_only_does_not_record_a_selection() {
        let f = fixture();
        f.coordinator.cycle_icon_only();
        settle().await;

        assert_eq!(f.coordinator.selected_icon(), None);
        assert_eq!(f.prefs.get(SELECTED_ICON_KEY), None);
    }

    #[tokio::test]
    async fn select_icon_only_twice_makes_one_platform_call() {
        let f = fixture();

        f.coordinator.select_icon_only(Some(ESCURO_ICON));
        settle().await;
        f.coordinator.select_icon_only(Some(ESCURO_ICON));
        settle().await;

        // Second request is suppressed by the already-active guard.
        assert_eq!(f.icons.call_count(), 1);
        assert_eq!(f.icons.active_icon().as_deref(), Some(ESCURO_ICON));
    }

    #[tokio::test]
    async fn select_icon_only_primary_removes_the_selection_key() {
        let f = fixture();
        f.coordinator.select_icon_only(Some(ESCURO_ICON));
        settle().await;
        assert!(f.prefs.get(SELECTED_ICON_KEY).is_some());

        f.coordinator.select_icon_only(None);
        settle().await;

        assert_eq!(f.prefs.get(SELECTED_ICON_KEY), None);
        assert_eq!(f.coordinator.selected_icon(), None);
        assert_eq!(f.icons.active_icon(), None);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reentrancy guard
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn theme_cascade_is_suppressed_while_manual_apply_is_in_flight() {
        let f = fixture_with_icons(RecordingIcons::with_delay(Duration::from_millis(50)));

        f.coordinator.select_icon_only(Some(ESCURO_ICON));
        // Guard is up; a linked theme change must not stack a second apply.
        f.coordinator.select_theme_and_icon(Theme::Escuro);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(f.icons.call_count(), 1);
        assert_eq!(f.icons.active_icon().as_deref(), Some(ESCURO_ICON));
    }

    #[tokio::test]
    async fn failed_apply_clears_the_guard_and_reports() {
        let f = fixture();
        f.icons.fail_sets.store(true, Ordering::SeqCst);

        f.coordinator.select_icon_only(Some(ESCURO_ICON));
        settle().await;

        // Platform state unchanged, failure surfaced as an event.
        assert_eq!(f.icons.active_icon(), None);
        assert!(f
            .emitter
            .theme_events
            .lock()
            .iter()
            .any(|e| matches!(e, ThemeEvent::IconApplyFailed { .. })));

        // Guard cleared: the next theme-driven cascade goes through.
        f.icons.fail_sets.store(false, Ordering::SeqCst);
        f.coordinator.select_theme_and_icon(Theme::Escuro);
        settle().await;
        assert_eq!(f.icons.active_icon().as_deref(), Some(ESCURO_ICON));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn persisted_state_survives_reconstruction() {
        let dir = tempfile::tempdir().unwrap();
        let icons = Arc::new(RecordingIcons::new());
        let emitter = Arc::new(CollectingEmitter::default());

        {
            let prefs = Arc::new(JsonFilePreferences::load(dir.path()));
            let coordinator = ThemeIconCoordinator::new(
                prefs,
                icons.clone(),
                emitter.clone(),
                TokioSpawner::current(),
            );
            coordinator.select_theme_only(Theme::Escuro);
            coordinator.select_icon_only(Some(ESCURO_ICON));
            settle().await;
        }

        // Next session: a fresh store and coordinator see the same state.
        let prefs = Arc::new(JsonFilePreferences::load(dir.path()));
        let coordinator =
            ThemeIconCoordinator::new(prefs, icons, emitter, TokioSpawner::current());

        assert_eq!(coordinator.active_theme(), Theme::Escuro);
        assert!(!coordinator.sync_icon_with_theme());
        assert_eq!(coordinator.selected_icon().as_deref(), Some(ESCURO_ICON));
    }

    #[tokio::test]
    async fn sync_policy_round_trips_when_linked() {
        let prefs = Arc::new(MemoryPreferences::new());
        {
            let f_icons = Arc::new(RecordingIcons::new());
            let coordinator = ThemeIconCoordinator::new(
                prefs.clone(),
                f_icons,
                Arc::new(CollectingEmitter::default()),
                TokioSpawner::current(),
            );
            coordinator.select_theme_and_icon(Theme::Escuro);
            settle().await;
        }

        let coordinator = ThemeIconCoordinator::new(
            prefs,
            Arc::new(RecordingIcons::new()),
            Arc::new(CollectingEmitter::default()),
            TokioSpawner::current(),
        );
        assert_eq!(coordinator.active_theme(), Theme::Escuro);
        assert!(coordinator.sync_icon_with_theme());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Read surface
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn themed_image_name_follows_the_active_theme() {
        let f = fixture();
        assert_eq!(f.coordinator.themed_image_name("player-bg"), "player-bg");

        f.coordinator.select_theme_only(Theme::Escuro);
        assert_eq!(
            f.coordinator.themed_image_name("player-bg"),
            "player-bg-escuro"
        );
    }
}

//! Theme preference management.
//!
//! Responsibilities:
//! - Load, apply and persist the `light` / `dark` / `auto` preference.
//! - Resolve `auto` against the host color scheme.
//! - Notify subscribers whenever a theme is applied.
//! - Re-apply `auto` when the host color scheme changes.
//!
//! Does NOT handle:
//! - Rendering or palette expansion.
//! - Parsing CLI input (see `selfmade-cli`).
//!
//! Invariants:
//! - Every `apply` persists the preference and broadcasts exactly one `ThemeChanged`.
//! - System changes only trigger a re-apply while the applied preference is `auto`.
//! - Persistence failures are logged and never prevent the in-memory update;
//!   toggling, the indicator and resolution all follow the applied value.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::constants::{DEFAULT_THEME_CHANNEL_CAPACITY, THEME_KEY};
use crate::persistence::LocalStore;
use crate::types::{ColorScheme, ThemePreference, ToggleIndicator};

/// Source of the host color scheme.
pub trait SystemColorScheme: Send + Sync + fmt::Debug {
    fn current(&self) -> ColorScheme;
}

/// Queries the operating system via `dark-light`.
///
/// Falls back to `Light` when the OS does not report a preference.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsColorScheme;

impl SystemColorScheme for OsColorScheme {
    fn current(&self) -> ColorScheme {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => ColorScheme::Dark,
            Ok(_) => ColorScheme::Light,
            Err(e) => {
                tracing::debug!(error = ?e, "OS color scheme detection failed, assuming light");
                ColorScheme::Light
            }
        }
    }
}

/// Color scheme set by hand. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct FixedColorScheme {
    scheme: Arc<Mutex<ColorScheme>>,
}

impl FixedColorScheme {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme: Arc::new(Mutex::new(scheme)),
        }
    }

    pub fn set(&self, scheme: ColorScheme) {
        *self.scheme.lock().unwrap_or_else(PoisonError::into_inner) = scheme;
    }
}

impl SystemColorScheme for FixedColorScheme {
    fn current(&self) -> ColorScheme {
        *self.scheme.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Event broadcast after a theme is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeChanged {
    pub preference: ThemePreference,
    pub effective: ColorScheme,
}

#[derive(Debug)]
struct ThemeState {
    applied: ThemePreference,
    indicator: ToggleIndicator,
}

#[derive(Debug)]
struct Inner {
    store: Arc<dyn LocalStore>,
    system: Arc<dyn SystemColorScheme>,
    state: Mutex<ThemeState>,
    events: broadcast::Sender<ThemeChanged>,
}

/// Applies and persists the theme preference.
///
/// Cloning is cheap; clones share state and subscribers.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    inner: Arc<Inner>,
}

impl ThemeManager {
    /// Create a manager and apply the saved preference.
    pub fn new(store: Arc<dyn LocalStore>, system: Arc<dyn SystemColorScheme>) -> Self {
        let (events, _) = broadcast::channel(DEFAULT_THEME_CHANNEL_CAPACITY);
        let saved = ThemePreference::from_stored(store.get_item(THEME_KEY).as_deref());

        let manager = Self {
            inner: Arc::new(Inner {
                store,
                system,
                state: Mutex::new(ThemeState {
                    applied: saved,
                    indicator: saved.into(),
                }),
                events,
            }),
        };

        {
            let mut state = manager.lock_state();
            let system = manager.system_scheme();
            manager.apply_locked(&mut state, saved, system);
            manager.refresh_indicator(&mut state);
        }

        manager
    }

    fn lock_state(&self) -> MutexGuard<'_, ThemeState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Saved preference, `auto` when nothing valid is stored.
    pub fn preference(&self) -> ThemePreference {
        ThemePreference::from_stored(self.inner.store.get_item(THEME_KEY).as_deref())
    }

    /// Persist a preference without applying it.
    pub fn save_preference(&self, preference: ThemePreference) {
        if let Err(e) = self.inner.store.set_item(THEME_KEY, preference.as_str()) {
            tracing::warn!(theme = %preference, error = %e, "Failed to persist theme preference");
        }
    }

    /// Apply a theme: mark it applied, persist it and notify subscribers.
    pub fn apply(&self, preference: ThemePreference) {
        let mut state = self.lock_state();
        let system = self.system_scheme();
        self.apply_locked(&mut state, preference, system);
    }

    fn apply_locked(
        &self,
        state: &mut ThemeState,
        preference: ThemePreference,
        system: ColorScheme,
    ) {
        state.applied = preference;
        self.save_preference(preference);

        let event = ThemeChanged {
            preference,
            effective: preference.resolve(system),
        };
        tracing::debug!(theme = %event.preference, effective = %event.effective, "Theme applied");

        // No subscribers is not an error.
        let _ = self.inner.events.send(event);
    }

    fn refresh_indicator(&self, state: &mut ThemeState) {
        state.indicator = state.applied.into();
    }

    /// Effective scheme after resolving `auto`.
    pub fn effective(&self) -> ColorScheme {
        self.applied().resolve(self.system_scheme())
    }

    /// Color scheme currently reported by the host.
    pub fn system_scheme(&self) -> ColorScheme {
        self.inner.system.current()
    }

    /// Advance light -> dark -> auto -> light and apply the result.
    pub fn toggle(&self) -> ThemePreference {
        let mut state = self.lock_state();
        let next = state.applied.cycle_next();
        let system = self.system_scheme();
        self.apply_locked(&mut state, next, system);
        self.refresh_indicator(&mut state);
        next
    }

    /// Apply a specific preference.
    pub fn set_theme(&self, preference: ThemePreference) {
        let mut state = self.lock_state();
        let system = self.system_scheme();
        self.apply_locked(&mut state, preference, system);
        self.refresh_indicator(&mut state);
    }

    /// Apply a preference given by name. Unknown names are ignored.
    ///
    /// Returns whether the theme was applied.
    pub fn set_theme_str(&self, name: &str) -> bool {
        match name.parse::<ThemePreference>() {
            Ok(preference) => {
                self.set_theme(preference);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid theme");
                false
            }
        }
    }

    /// State of the toggle control.
    pub fn indicator(&self) -> ToggleIndicator {
        self.lock_state().indicator
    }

    /// Icon name for the applied preference.
    pub fn current_icon(&self) -> &'static str {
        self.applied().icon()
    }

    /// Preference most recently applied.
    pub fn applied(&self) -> ThemePreference {
        self.lock_state().applied
    }

    /// Receive an event for every applied theme.
    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChanged> {
        self.inner.events.subscribe()
    }

    /// React to a host color scheme change.
    ///
    /// Returns `true` when `auto` was re-applied.
    pub fn handle_system_change(&self, scheme: ColorScheme) -> bool {
        let mut state = self.lock_state();
        if state.applied != ThemePreference::Auto {
            return false;
        }
        self.apply_locked(&mut state, ThemePreference::Auto, scheme);
        true
    }

    /// Poll the host color scheme and re-apply `auto` when it flips.
    ///
    /// Must be called from within a tokio runtime. Polling stops when the
    /// returned handle is stopped or dropped.
    pub fn watch_system(&self, interval: Duration) -> SystemWatch {
        let manager = self.clone();

        let handle = tokio::spawn(async move {
            let mut last = manager.detect_off_thread(None).await;
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let current = manager.detect_off_thread(Some(last)).await;
                if current != last {
                    tracing::debug!(from = %last, to = %current, "System color scheme changed");
                    last = current;
                    manager.handle_system_change(current);
                }
            }
        });

        SystemWatch { handle }
    }

    async fn detect_off_thread(&self, fallback: Option<ColorScheme>) -> ColorScheme {
        let system = Arc::clone(&self.inner.system);
        match tokio::task::spawn_blocking(move || system.current()).await {
            Ok(scheme) => scheme,
            Err(e) => {
                tracing::warn!(error = %e, "System color scheme probe failed");
                fallback.unwrap_or_default()
            }
        }
    }
}

/// Handle to a running system color scheme watcher.
#[derive(Debug)]
pub struct SystemWatch {
    handle: JoinHandle<()>,
}

impl SystemWatch {
    /// Stop polling.
    pub fn stop(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for SystemWatch {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn manager_with(stored: Option<&str>, system: ColorScheme) -> (ThemeManager, MemoryStore) {
        let store = MemoryStore::new();
        if let Some(value) = stored {
            store.set_item(THEME_KEY, value).unwrap();
        }
        let manager = ThemeManager::new(
            Arc::new(store.clone()),
            Arc::new(FixedColorScheme::new(system)),
        );
        (manager, store)
    }

    #[test]
    fn test_init_defaults_to_auto_and_persists_it() {
        let (manager, store) = manager_with(None, ColorScheme::Dark);

        assert_eq!(manager.applied(), ThemePreference::Auto);
        assert_eq!(store.get_item(THEME_KEY).as_deref(), Some("auto"));
        assert_eq!(manager.effective(), ColorScheme::Dark);
        assert_eq!(manager.indicator().icon, "brightness_auto");
    }

    #[test]
    fn test_init_sanitizes_invalid_stored_value() {
        let (manager, store) = manager_with(Some("purple"), ColorScheme::Light);

        assert_eq!(manager.preference(), ThemePreference::Auto);
        assert_eq!(store.get_item(THEME_KEY).as_deref(), Some("auto"));
    }

    #[test]
    fn test_explicit_preference_ignores_system() {
        let (manager, _) = manager_with(Some("light"), ColorScheme::Dark);
        assert_eq!(manager.effective(), ColorScheme::Light);
    }

    #[test]
    fn test_set_theme_str_ignores_invalid() {
        let (manager, store) = manager_with(Some("dark"), ColorScheme::Light);
        let mut rx = manager.subscribe();

        assert!(!manager.set_theme_str("Blue"));
        assert_eq!(store.get_item(THEME_KEY).as_deref(), Some("dark"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_current_icon_follows_preference() {
        let (manager, _) = manager_with(Some("dark"), ColorScheme::Light);
        assert_eq!(manager.current_icon(), "dark_mode");
    }
}

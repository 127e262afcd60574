//! Process-wide light/dark state.
//!
//! The store resolves the starting mode from storage and the OS, persists
//! every change, and pushes the result through a [`ThemeSink`]. The sink is
//! the only side effect, so tests swap in a recording one.

use std::time::{Duration, Instant};

use crate::storage::KeyValueStore;
use crate::theme::{ColorScheme, ThemeMode};
use crate::timer::Timeout;

pub const STORAGE_KEY: &str = "portfolio-theme";
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(450);

/// Where a resolved theme gets applied.
pub trait ThemeSink {
    fn apply(&mut self, mode: ThemeMode);
    fn set_transitioning(&mut self, on: bool);
}

/// Root style flags the view reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RootFlags {
    pub light: bool,
    pub transitioning: bool,
}

impl ThemeSink for RootFlags {
    fn apply(&mut self, mode: ThemeMode) {
        self.light = mode.is_light();
    }

    fn set_transitioning(&mut self, on: bool) {
        self.transitioning = on;
    }
}

/// Persisted value wins when valid, then an OS light preference, then dark.
pub fn resolve_initial(stored: Option<&str>, os: Option<ColorScheme>) -> ThemeMode {
    if let Some(mode) = stored.and_then(ThemeMode::parse) {
        return mode;
    }
    match os {
        Some(ColorScheme::Light) => ThemeMode::Light,
        _ => ThemeMode::Dark,
    }
}

pub struct ThemeStore {
    storage: Box<dyn KeyValueStore>,
    mode: ThemeMode,
    transition: Duration,
    marker: Timeout,
    /// When the last toggle landed, for cross-fading palettes.
    changed_at: Option<Instant>,
}

impl ThemeStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            mode: ThemeMode::default(),
            transition: DEFAULT_TRANSITION,
            marker: Timeout::new(),
            changed_at: None,
        }
    }

    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Resolve and apply the starting theme. Runs once per mount.
    pub fn init(&mut self, os: Option<ColorScheme>, sink: &mut dyn ThemeSink) -> ThemeMode {
        let stored = match self.storage.get(STORAGE_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Theme storage unreadable, using defaults: {e}");
                None
            }
        };
        self.mode = resolve_initial(stored.as_deref(), os);
        sink.apply(self.mode);
        tracing::info!("Theme initialised: {}", self.mode.as_str());
        self.mode
    }

    pub fn toggle(&mut self, now: Instant, sink: &mut dyn ThemeSink) -> ThemeMode {
        self.set(self.mode.toggled(), now, sink)
    }

    /// Persist, apply, and (re)start the transition window.
    pub fn set(&mut self, mode: ThemeMode, now: Instant, sink: &mut dyn ThemeSink) -> ThemeMode {
        self.mode = mode;
        if let Err(e) = self.storage.set(STORAGE_KEY, mode.as_str()) {
            tracing::debug!("Theme not persisted: {e}");
        }
        sink.apply(mode);
        sink.set_transitioning(true);
        self.marker.arm(now, self.transition);
        self.changed_at = Some(now);
        tracing::info!("Theme set to {}", mode.as_str());
        mode
    }

    /// Clears the transition marker once its window has elapsed.
    pub fn tick(&mut self, now: Instant, sink: &mut dyn ThemeSink) -> bool {
        if self.marker.fire(now) {
            sink.set_transitioning(false);
            self.changed_at = None;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub fn is_transitioning(&self) -> bool {
        self.marker.is_armed()
    }

    /// Fraction of the current transition window elapsed, if one is open.
    pub fn transition_progress(&self, now: Instant) -> Option<f32> {
        let start = self.changed_at?;
        if !self.marker.is_armed() {
            return None;
        }
        if self.transition.is_zero() {
            return Some(1.0);
        }
        let t = now.saturating_duration_since(start).as_secs_f32() / self.transition.as_secs_f32();
        Some(t.clamp(0.0, 1.0))
    }

    /// Cancel any pending marker removal immediately.
    pub fn teardown(&mut self, sink: &mut dyn ThemeSink) {
        if self.marker.is_armed() {
            self.marker.cancel();
            sink.set_transitioning(false);
        }
        self.changed_at = None;
    }

    #[cfg(test)]
    fn stored(&self) -> Option<String> {
        self.storage.get(STORAGE_KEY).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::BrokenStore;
    use crate::storage::{FileStore, MemoryStore};

    #[derive(Default)]
    struct Recorder {
        flags: RootFlags,
        applied: Vec<ThemeMode>,
    }

    impl ThemeSink for Recorder {
        fn apply(&mut self, mode: ThemeMode) {
            self.flags.apply(mode);
            self.applied.push(mode);
        }

        fn set_transitioning(&mut self, on: bool) {
            self.flags.set_transitioning(on);
        }
    }

    #[test]
    fn test_resolve_initial_matrix() {
        use ColorScheme::*;
        assert_eq!(resolve_initial(Some("light"), Some(Dark)), ThemeMode::Light);
        assert_eq!(resolve_initial(Some("dark"), Some(Light)), ThemeMode::Dark);
        assert_eq!(resolve_initial(Some("sepia"), Some(Light)), ThemeMode::Light);
        assert_eq!(resolve_initial(None, Some(Light)), ThemeMode::Light);
        assert_eq!(resolve_initial(None, Some(Dark)), ThemeMode::Dark);
        assert_eq!(resolve_initial(None, None), ThemeMode::Dark);
        assert_eq!(resolve_initial(Some("bogus"), None), ThemeMode::Dark);
    }

    #[test]
    fn test_init_applies_immediately() {
        let mut sink = Recorder::default();
        let mut store = ThemeStore::new(Box::new(MemoryStore::new().with_entry(STORAGE_KEY, "light")));
        assert_eq!(store.init(None, &mut sink), ThemeMode::Light);
        assert!(sink.flags.light);
        assert!(!sink.flags.transitioning);
    }

    #[test]
    fn test_file_backed_theme_survives_reload() {
        let dir = std::env::temp_dir().join(format!("folio-theme-reload-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let t0 = Instant::now();

        let mut sink = Recorder::default();
        let mut store = ThemeStore::new(Box::new(FileStore::in_dir(&dir)));
        assert_eq!(store.init(Some(ColorScheme::Dark), &mut sink), ThemeMode::Dark);
        assert_eq!(store.toggle(t0, &mut sink), ThemeMode::Light);
        drop(store);

        let mut sink = Recorder::default();
        let mut reloaded = ThemeStore::new(Box::new(FileStore::in_dir(&dir)));
        assert_eq!(reloaded.init(Some(ColorScheme::Dark), &mut sink), ThemeMode::Light);
        assert!(sink.flags.light);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_toggle_parity() {
        let t0 = Instant::now();
        for n in 0..7 {
            let mut sink = Recorder::default();
            let mut store = ThemeStore::new(Box::new(MemoryStore::new()));
            let initial = store.init(None, &mut sink);
            assert_eq!(initial, ThemeMode::Dark);
            for _ in 0..n {
                store.toggle(t0, &mut sink);
            }
            let expected = if n % 2 == 0 { ThemeMode::Dark } else { ThemeMode::Light };
            assert_eq!(store.mode(), expected);
            assert_eq!(sink.flags.light, expected.is_light());
            if n > 0 {
                assert_eq!(store.stored().as_deref(), Some(expected.as_str()));
            }
        }
    }

    #[test]
    fn test_transition_marker_last_toggle_wins() {
        let t0 = Instant::now();
        let mut sink = Recorder::default();
        let mut store = ThemeStore::new(Box::new(MemoryStore::new()));
        store.init(None, &mut sink);

        store.toggle(t0, &mut sink);
        assert!(sink.flags.transitioning);
        store.toggle(t0 + Duration::from_millis(300), &mut sink);

        // The first window would have closed at 450ms; the re-toggle moved it.
        assert!(!store.tick(t0 + Duration::from_millis(500), &mut sink));
        assert!(sink.flags.transitioning);
        assert!(store.tick(t0 + Duration::from_millis(750), &mut sink));
        assert!(!sink.flags.transitioning);
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_transition_progress() {
        let t0 = Instant::now();
        let mut sink = Recorder::default();
        let mut store = ThemeStore::new(Box::new(MemoryStore::new()));
        assert_eq!(store.transition_progress(t0), None);
        store.toggle(t0, &mut sink);
        let p = store.transition_progress(t0 + Duration::from_millis(225)).unwrap();
        assert!((p - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_disabled_storage_does_not_crash() {
        let t0 = Instant::now();
        let mut sink = Recorder::default();
        let mut store = ThemeStore::new(Box::new(BrokenStore));
        assert_eq!(store.init(Some(ColorScheme::Light), &mut sink), ThemeMode::Light);
        assert_eq!(store.toggle(t0, &mut sink), ThemeMode::Dark);
        assert_eq!(sink.applied, vec![ThemeMode::Light, ThemeMode::Dark]);
    }

    #[test]
    fn test_teardown_clears_marker() {
        let t0 = Instant::now();
        let mut sink = Recorder::default();
        let mut store = ThemeStore::new(Box::new(MemoryStore::new()));
        store.toggle(t0, &mut sink);
        store.teardown(&mut sink);
        assert!(!sink.flags.transitioning);
        assert!(!store.is_transitioning());
        assert!(!store.tick(t0 + Duration::from_secs(1), &mut sink));
    }
}

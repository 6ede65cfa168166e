//! Reactive theme state.
//!
//! One thread-local mode signal owns the dark/light flag. Reads go through
//! [`active_palette`], which tracks the signal, so any derived or effect
//! that colors cells re-runs when the mode flips.
//!
//! Document-level side effects are scoped: [`ThemeOwnership`] records the
//! mode at acquisition and restores it on release (or drop), so tearing a
//! session down never leaks a toggled theme into the next one.

use spark_signals::{Signal, signal};

use super::{Theme, ThemeMode, palette};

thread_local! {
    static MODE: Signal<ThemeMode> = signal(ThemeMode::Dark);
}

/// Current mode (tracked read).
pub fn theme_mode() -> ThemeMode {
    MODE.with(|s| s.get())
}

/// Set the mode directly.
pub fn set_theme_mode(mode: ThemeMode) {
    MODE.with(|s| s.set(mode));
}

/// Flip dark/light. Cannot fail; no inputs beyond the toggle event.
pub fn toggle_theme() {
    MODE.with(|s| {
        let flipped = s.get().flipped();
        s.set(flipped);
    });
}

/// Resolve the active palette (tracked read).
pub fn active_palette() -> Theme {
    match theme_mode() {
        ThemeMode::Dark => palette::dark(),
        ThemeMode::Light => palette::light(),
    }
}

/// Reset to the initial state (for testing).
pub fn reset_theme_state() {
    MODE.with(|s| s.set(ThemeMode::Dark));
}

// =============================================================================
// Scoped ownership
// =============================================================================

/// Scoped acquisition of the document-level theme side effect.
///
/// All document-wide visual writes route through the holder of this value.
/// Dropping it restores the mode that was active when it was taken.
#[derive(Debug)]
pub struct ThemeOwnership {
    prior: ThemeMode,
    released: bool,
}

impl ThemeOwnership {
    /// Record the current mode and take ownership of document styling.
    pub fn acquire() -> Self {
        Self {
            prior: MODE.with(|s| s.get()),
            released: false,
        }
    }

    /// Restore the prior mode and release ownership.
    pub fn release(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if !self.released {
            self.released = true;
            MODE.with(|s| s.set(self.prior));
        }
    }
}

impl Drop for ThemeOwnership {
    fn drop(&mut self) {
        self.restore();
    }
}

// =============================================================================
// Tests
// =============================================================================

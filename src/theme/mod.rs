//! Theme system for folio-tui.
//!
//! Two fixed palettes (dark and light) behind one session-scoped mode
//! signal. Every themed cell reads the active palette through the same
//! reactive accessor, so a toggle repaints the whole frame in a single
//! propagation - a partially-themed frame is not representable.

use crate::types::Rgba;

pub mod palette;
pub mod state;

pub use palette::{dark, light};
pub use state::{
    ThemeOwnership, active_palette, reset_theme_state, set_theme_mode, theme_mode, toggle_theme,
};

// =============================================================================
// Mode
// =============================================================================

/// The dark/light flag. Session-scoped; reset on restart, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    #[inline]
    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    /// The other mode.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

// =============================================================================
// Palette
// =============================================================================

/// Semantic colors for one theme variant.
///
/// Views never hardcode colors; they name a slot here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Document-level background, painted edge to edge.
    pub background: Rgba,
    /// Panels and cards.
    pub surface: Rgba,
    /// Body text.
    pub text: Rgba,
    /// Secondary text.
    pub text_muted: Rgba,
    /// Emphasized text (hero name).
    pub text_bright: Rgba,
    /// Headings, the active-tab marker.
    pub primary: Rgba,
    /// Links and highlights.
    pub accent: Rgba,
    /// Card and frame borders.
    pub border: Rgba,
    /// Technology chip background.
    pub chip: Rgba,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flip_is_involution() {
        assert_eq!(ThemeMode::Dark.flipped(), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.flipped().flipped(), ThemeMode::Dark);
    }

    #[test]
    fn test_default_mode_is_dark() {
        assert!(ThemeMode::default().is_dark());
    }
}

//! Scroll State Module
//!
//! One scrollable document (the stacked-sections layout) with a clamped
//! offset signal. Bounds come from the composed content height and the
//! viewport height; every mutation funnels through the same clamp.
//!
//! Offsets are in rows. Arrow keys, the mouse wheel, and page keys all
//! end up in [`scroll_by`].

use spark_signals::{Signal, signal};

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Scroll amount for arrow keys (rows).
pub const LINE_SCROLL: u16 = 1;

/// Scroll amount for one mouse wheel notch (rows).
pub const WHEEL_SCROLL: u16 = 3;

/// Page Up/Down scrolls 90% of the viewport.
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static SCROLL_Y: Signal<u16> = signal(0);
    static MAX_SCROLL: Signal<u16> = signal(0);
    static VIEWPORT: Signal<u16> = signal(0);
}

/// Current scroll offset (tracked read).
pub fn scroll_y() -> u16 {
    SCROLL_Y.with(|s| s.get())
}

/// Maximum scroll offset (tracked read).
pub fn max_scroll() -> u16 {
    MAX_SCROLL.with(|s| s.get())
}

/// Update the scroll bounds from composed content.
///
/// Re-clamps the current offset, so shrinking content never leaves the
/// viewport past the end of the document.
pub fn set_scroll_bounds(content_height: u16, viewport_height: u16) {
    let max = content_height.saturating_sub(viewport_height);
    MAX_SCROLL.with(|s| {
        if s.get() != max {
            s.set(max);
        }
    });
    VIEWPORT.with(|s| {
        if s.get() != viewport_height {
            s.set(viewport_height);
        }
    });
    SCROLL_Y.with(|s| {
        let current = s.get();
        if current > max {
            s.set(max);
        }
    });
}

// =============================================================================
// SCROLL OPERATIONS
// =============================================================================

/// Set the scroll offset (clamped to valid range).
pub fn scroll_to(y: u16) {
    let max = MAX_SCROLL.with(|s| s.get());
    let clamped = y.min(max);
    SCROLL_Y.with(|s| {
        if s.get() != clamped {
            s.set(clamped);
        }
    });
}

/// Scroll by a delta in rows.
///
/// Returns `true` if scrolling occurred, `false` if already at a boundary.
pub fn scroll_by(delta: i32) -> bool {
    let current = SCROLL_Y.with(|s| s.get());
    let max = MAX_SCROLL.with(|s| s.get());

    let new_y = ((current as i32) + delta).clamp(0, max as i32) as u16;
    if new_y == current {
        return false;
    }

    SCROLL_Y.with(|s| s.set(new_y));
    true
}

/// Scroll by wheel notches (3 rows per notch).
pub fn scroll_wheel(notches: i32) -> bool {
    scroll_by(notches * WHEEL_SCROLL as i32)
}

/// Scroll by a page (90% of the viewport). Negative = up.
pub fn scroll_page(direction: i32) -> bool {
    let viewport = VIEWPORT.with(|s| s.get());
    let page = (viewport as f32 * PAGE_SCROLL_FACTOR) as i32;
    scroll_by(direction.signum() * page.max(1))
}

/// Scroll to the top of the document.
pub fn scroll_to_top() {
    scroll_to(0);
}

/// Scroll to the bottom of the document.
pub fn scroll_to_bottom() {
    let max = MAX_SCROLL.with(|s| s.get());
    scroll_to(max);
}

/// Reset scroll state (for testing).
pub fn reset_scroll_state() {
    SCROLL_Y.with(|s| s.set(0));
    MAX_SCROLL.with(|s| s.set(0));
    VIEWPORT.with(|s| s.set(0));
}

// =============================================================================
// TESTS
// =============================================================================

//! State Module - Runtime state systems
//!
//! The reactive state that powers the portfolio UI:
//!
//! - **Keyboard** - Event types, dispatch, handler registry
//! - **Input** - crossterm event conversion and routing
//! - **Scroll** - Clamped document scroll offset
//! - **Nav** - Section registry, active-section strategies, marker animation
//! - **Animate** - Shared blink clocks
//! - **Reveal** - Hero typing sequence, session latch, group stagger

pub mod animate;
pub mod input;
pub mod keyboard;
pub mod nav;
pub mod reveal;
pub mod scroll;

pub use animate::{
    CURSOR_BLINK_HZ, advance_blink, blink_phase, is_blink_running, reset_blink_state,
    subscribe_blink,
};
pub use input::{InputEvent, poll_event, route_event};
pub use keyboard::{
    KeyState, KeyboardEvent, Modifiers, dispatch, on, on_key, reset_keyboard_state,
};
pub use nav::{
    ActiveSectionStrategy, LayoutMode, Marker, NavContext, ScrollStrategy, SectionGeometry,
    TabStrategy, active_section, advance_marker, marker, reset_nav_state, set_active_section,
    set_marker_now, set_marker_target,
};
pub use reveal::{
    FADE_DURATION_MS, HeroPhase, STAGGER_STEP_MS, advance_reveal, advance_stagger,
    begin_hero_reveal, bio_shown, has_played, hero_phase, name_shown, reset_reveal_state,
    restart_stagger, stagger_ms, stagger_progress,
};
pub use scroll::{
    LINE_SCROLL, PAGE_SCROLL_FACTOR, WHEEL_SCROLL, max_scroll, reset_scroll_state, scroll_by,
    scroll_page, scroll_to, scroll_to_bottom, scroll_to_top, scroll_wheel, scroll_y,
    set_scroll_bounds,
};

//! Runtime - session lifecycle and the event loop.
//!
//! [`mount`] wires the reactive pipeline and takes over the terminal:
//!
//! ```text
//! state signals -> frame derived -> render effect -> diff renderer
//! ```
//!
//! Everything global acquired at mount is released at unmount: the
//! alternate screen, raw mode, mouse capture, key handlers, the blink
//! subscription, and the theme mode (restored through [`ThemeOwnership`]).
//!
//! The loop is single-threaded and cooperative. Each tick polls input
//! (every callback runs to completion before the next), advances the
//! animation clocks, and then samples scroll position exactly once to
//! resolve the active section - scroll events mutate the offset signal
//! immediately, but resolution is frame-aligned.
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::content::Portfolio;
//! use folio_tui::runtime::{mount, run, unmount};
//! use folio_tui::state::nav::LayoutMode;
//!
//! let mut handle = mount(Portfolio::builtin(), LayoutMode::Tabs)?;
//! run(&mut handle)?; // blocks until quit
//! unmount(handle)?;
//! ```

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use spark_signals::{Derived, Signal, derived, effect, signal};

use crate::content::{Portfolio, SectionId};
use crate::render::{DiffRenderer, FrameBuffer};
use crate::state::nav::{self, ActiveSectionStrategy, LayoutMode, NavContext, strategy_for};
use crate::state::reveal::{self, HeroPhase};
use crate::state::{animate, input, keyboard, scroll};
use crate::theme::{ThemeOwnership, active_palette};
use crate::view::{self, RevealSnapshot, ViewContext, nav_bar};

/// Input poll timeout per tick (~60 fps).
const TICK: Duration = Duration::from_millis(16);

// =============================================================================
// Terminal size
// =============================================================================

thread_local! {
    static TERMINAL_SIZE: Signal<(u16, u16)> = signal((80, 24));
}

/// Current terminal size (tracked read).
pub fn terminal_size() -> (u16, u16) {
    TERMINAL_SIZE.with(|s| s.get())
}

/// Update the terminal size signal (resize events, detection).
pub fn set_terminal_size(width: u16, height: u16) {
    TERMINAL_SIZE.with(|s| {
        if s.get() != (width, height) {
            s.set((width, height));
        }
    });
}

/// Ask the terminal for its size. Falls back to the last known value.
pub fn detect_terminal_size() {
    if let Ok((width, height)) = crossterm::terminal::size() {
        set_terminal_size(width, height);
    }
}

// =============================================================================
// Frame derived
// =============================================================================

/// Build the derived that computes the frame from the reactive state.
///
/// Every tracked read here is a dependency: theme, active section, marker,
/// scroll, reveal, blink, terminal size. The derived stays pure - all
/// mutation happens in event callbacks and the tick.
pub fn create_frame_derived(
    portfolio: Rc<Portfolio>,
    layout: LayoutMode,
) -> Derived<FrameBuffer> {
    derived(move || {
        let (width, height) = terminal_size();
        let phase = reveal::hero_phase();
        let snapshot = RevealSnapshot {
            phase,
            name_shown: reveal::name_shown(),
            bio_shown: reveal::bio_shown(),
            cursor_visible: phase == HeroPhase::Idle
                && animate::blink_phase(animate::CURSOR_BLINK_HZ),
            stagger_ms: reveal::stagger_ms(),
        };
        let ctx = ViewContext {
            portfolio: &portfolio,
            theme: active_palette(),
            layout,
            active: nav::active_section(),
            marker: nav::marker(),
            scroll_y: scroll::scroll_y(),
            width,
            height,
            reveal: snapshot,
        };
        view::compose(&ctx)
    })
}

// =============================================================================
// Session handle
// =============================================================================

/// Handle returned by [`mount`]. Owns every global side effect of the
/// session and undoes all of them in [`unmount`].
pub struct SessionHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
    renderer: Rc<RefCell<DiffRenderer>>,
    portfolio: Rc<Portfolio>,
    strategy: Rc<dyn ActiveSectionStrategy>,
    layout: LayoutMode,
    cleanups: Vec<Box<dyn FnOnce()>>,
    theme: Option<ThemeOwnership>,
    last_tick: Instant,
    unmounted: bool,
}

impl SessionHandle {
    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Request a graceful shutdown.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Frame-aligned navigation sync: update scroll bounds, resolve the
    /// active section through the strategy, retarget the marker.
    fn sync_navigation(&self) {
        let (width, height) = terminal_size();
        let geometry = view::section_geometry(&self.portfolio, width);
        let viewport = height
            .saturating_sub(geometry.header_height)
            .saturating_sub(1);

        if self.layout == LayoutMode::Scroll {
            let document = view::document_height(&self.portfolio, width);
            scroll::set_scroll_bounds(document, viewport);
        }

        let ctx = NavContext {
            scroll_y: scroll::scroll_y(),
            viewport_height: viewport,
            geometry,
        };
        let active = self.strategy.resolve_active(&ctx);
        nav::set_active_section(active);

        if let Some(position) = self
            .portfolio
            .nav
            .iter()
            .position(|entry| entry.target == active)
        {
            let (x, w) = nav_bar::marker_target(&self.portfolio.nav, position, width);
            nav::set_marker_target(x, w);
        }
    }

    /// Tear down every global side effect, in reverse acquisition order.
    fn teardown(&mut self) -> io::Result<()> {
        if self.unmounted {
            return Ok(());
        }
        self.unmounted = true;
        self.running.store(false, Ordering::SeqCst);

        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        if let Some(theme) = self.theme.take() {
            theme.release();
        }

        let _ = input::disable_mouse();
        let result = self.renderer.borrow_mut().exit_fullscreen();
        let raw = disable_raw_mode();
        result?;
        raw?;
        Ok(())
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        // Best effort: never leave the terminal in the alternate screen
        let _ = self.teardown();
    }
}

// =============================================================================
// Mount
// =============================================================================

/// Mount the portfolio session.
///
/// Takes over the terminal (raw mode, alternate screen, hidden cursor,
/// mouse capture), starts the hero reveal against the session latch,
/// registers key handlers, and creates the one render effect.
pub fn mount(portfolio: Portfolio, layout: LayoutMode) -> io::Result<SessionHandle> {
    let portfolio = Rc::new(portfolio);
    let strategy: Rc<dyn ActiveSectionStrategy> = Rc::from(strategy_for(layout));

    enable_raw_mode()?;
    let renderer = Rc::new(RefCell::new(DiffRenderer::new()));
    renderer.borrow_mut().enter_fullscreen()?;
    input::enable_mouse()?;
    detect_terminal_size();

    let theme = ThemeOwnership::acquire();

    // Hero reveal: consults the session latch, so a remount in the same
    // session skips straight to the finished state
    reveal::begin_hero_reveal(&portfolio.name, &portfolio.tagline);
    reveal::restart_stagger();

    let mut cleanups: Vec<Box<dyn FnOnce()>> = Vec::new();
    cleanups.push(animate::subscribe_blink(animate::CURSOR_BLINK_HZ));

    let running = Arc::new(AtomicBool::new(true));
    register_key_handlers(&portfolio, &strategy, layout, &running, &mut cleanups);

    // The ONE render effect: reads the frame derived, paints the diff
    let fb_derived = create_frame_derived(portfolio.clone(), layout);
    let renderer_for_effect = renderer.clone();
    let running_for_effect = running.clone();
    let stop = effect(move || {
        let frame = fb_derived.get();
        if !running_for_effect.load(Ordering::SeqCst) {
            return;
        }
        let _ = renderer_for_effect.borrow_mut().render(&frame);
    });

    let mut handle = SessionHandle {
        stop_effect: Some(Box::new(stop)),
        running,
        renderer,
        portfolio,
        strategy,
        layout,
        cleanups,
        theme: Some(theme),
        last_tick: Instant::now(),
        unmounted: false,
    };

    // Resolve once so the first frame starts with the right section and
    // the marker placed, not sliding in from the origin
    handle.sync_navigation();
    let marker = nav::marker();
    nav::set_marker_now(marker.target_x, marker.target_width);

    Ok(handle)
}

/// Register the session's key bindings. Each returns its cleanup.
fn register_key_handlers(
    portfolio: &Rc<Portfolio>,
    strategy: &Rc<dyn ActiveSectionStrategy>,
    layout: LayoutMode,
    running: &Arc<AtomicBool>,
    cleanups: &mut Vec<Box<dyn FnOnce()>>,
) {
    // Explicit nav activation, shared by digits, Tab cycling and arrows
    let activate = {
        let portfolio = portfolio.clone();
        let strategy = strategy.clone();
        Rc::new(move |target: SectionId| {
            let (width, height) = terminal_size();
            let geometry = view::section_geometry(&portfolio, width);
            let viewport = height
                .saturating_sub(geometry.header_height)
                .saturating_sub(1);
            let ctx = NavContext {
                scroll_y: scroll::scroll_y(),
                viewport_height: viewport,
                geometry,
            };
            if layout == LayoutMode::Tabs && target != nav::active_section() {
                // Entering a panel replays its group entrance
                reveal::restart_stagger();
            }
            strategy.activate(target, &ctx);
        })
    };

    // Quit: q, Escape, Ctrl+C
    for key in ["q", "Escape"] {
        let running = running.clone();
        cleanups.push(keyboard::on_key(key, move || {
            running.store(false, Ordering::SeqCst);
            true
        }));
    }
    {
        let running = running.clone();
        cleanups.push(keyboard::on(move |event| {
            if event.key == "c" && event.modifiers.ctrl {
                running.store(false, Ordering::SeqCst);
                return true;
            }
            false
        }));
    }

    // Theme toggle
    cleanups.push(keyboard::on_key("t", || {
        crate::theme::toggle_theme();
        true
    }));

    // Digits jump straight to a nav entry
    for (i, entry) in portfolio.nav.iter().enumerate().take(9) {
        let activate = activate.clone();
        let target = entry.target;
        cleanups.push(keyboard::on_key((i + 1).to_string(), move || {
            activate(target);
            true
        }));
    }

    // Tab / BackTab cycle through the registry
    let cycle = {
        let portfolio = portfolio.clone();
        let activate = activate.clone();
        Rc::new(move |step: i32| {
            let entries = &portfolio.nav;
            let current = entries
                .iter()
                .position(|entry| entry.target == nav::active_section())
                .unwrap_or(0);
            let next = (current as i32 + step).rem_euclid(entries.len() as i32) as usize;
            activate(entries[next].target);
        })
    };
    {
        let cycle = cycle.clone();
        cleanups.push(keyboard::on_key("Tab", move || {
            cycle(1);
            true
        }));
    }
    {
        let cycle = cycle.clone();
        cleanups.push(keyboard::on_key("BackTab", move || {
            cycle(-1);
            true
        }));
    }

    match layout {
        LayoutMode::Tabs => {
            // Arrows also cycle in tab mode
            {
                let cycle = cycle.clone();
                cleanups.push(keyboard::on_key("ArrowRight", move || {
                    cycle(1);
                    true
                }));
            }
            {
                let cycle = cycle.clone();
                cleanups.push(keyboard::on_key("ArrowLeft", move || {
                    cycle(-1);
                    true
                }));
            }
        }
        LayoutMode::Scroll => {
            // Arrows and page keys move the document
            cleanups.push(keyboard::on_key("ArrowUp", || {
                scroll::scroll_by(-(scroll::LINE_SCROLL as i32));
                true
            }));
            cleanups.push(keyboard::on_key("ArrowDown", || {
                scroll::scroll_by(scroll::LINE_SCROLL as i32);
                true
            }));
            cleanups.push(keyboard::on_key("PageUp", || {
                scroll::scroll_page(-1);
                true
            }));
            cleanups.push(keyboard::on_key("PageDown", || {
                scroll::scroll_page(1);
                true
            }));
            cleanups.push(keyboard::on_key("Home", || {
                scroll::scroll_to_top();
                true
            }));
            cleanups.push(keyboard::on_key("End", || {
                scroll::scroll_to_bottom();
                true
            }));
        }
    }
}

// =============================================================================
// Event loop
// =============================================================================

/// Run the event loop once.
///
/// Polls input (callbacks run to completion, in delivery order), advances
/// the animation clocks by the elapsed wall time, and syncs navigation.
/// Returns `Ok(false)` when the session should stop.
pub fn tick(handle: &mut SessionHandle) -> io::Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    // One blocking poll, then drain whatever else is already queued
    if let Some(event) = input::poll_event(TICK)? {
        input::route_event(event);
        while let Some(event) = input::poll_event(Duration::ZERO)? {
            input::route_event(event);
        }
    }

    let now = Instant::now();
    let elapsed_ms = now.duration_since(handle.last_tick).as_millis() as u64;
    handle.last_tick = now;

    animate::advance_blink(elapsed_ms);
    reveal::advance_reveal(elapsed_ms);
    reveal::advance_stagger(elapsed_ms);
    nav::advance_marker();

    handle.sync_navigation();

    Ok(handle.is_running())
}

/// Run the event loop until the session stops.
pub fn run(handle: &mut SessionHandle) -> io::Result<()> {
    while tick(handle)? {
        // Event callbacks and animation do all the work
    }
    Ok(())
}

/// Unmount and release every global side effect.
pub fn unmount(mut handle: SessionHandle) -> io::Result<()> {
    handle.teardown()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ThemeMode, reset_theme_state, set_theme_mode, theme_mode};

    fn setup() {
        reset_theme_state();
        nav::reset_nav_state();
        scroll::reset_scroll_state();
        reveal::reset_reveal_state();
        keyboard::reset_keyboard_state();
        animate::reset_blink_state();
    }

    #[test]
    fn test_terminal_size_signal() {
        set_terminal_size(120, 50);
        assert_eq!(terminal_size(), (120, 50));
    }

    #[test]
    fn test_frame_derived_recomputes_on_theme_toggle() {
        setup();
        set_terminal_size(80, 24);

        let portfolio = Rc::new(Portfolio::builtin());
        let frame = create_frame_derived(portfolio, LayoutMode::Tabs);

        let dark_bg = frame.get().get(0, 0).unwrap().bg;
        set_theme_mode(ThemeMode::Light);
        let light_bg = frame.get().get(0, 0).unwrap().bg;
        assert_ne!(dark_bg, light_bg);

        // Toggle back: background restored exactly
        set_theme_mode(ThemeMode::Dark);
        assert_eq!(frame.get().get(0, 0).unwrap().bg, dark_bg);
        assert_eq!(theme_mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_frame_derived_tracks_terminal_size() {
        setup();
        set_terminal_size(80, 24);

        let portfolio = Rc::new(Portfolio::builtin());
        let frame = create_frame_derived(portfolio, LayoutMode::Tabs);
        assert_eq!(frame.get().width(), 80);

        set_terminal_size(100, 30);
        assert_eq!(frame.get().width(), 100);
        assert_eq!(frame.get().height(), 30);
    }

    #[test]
    fn test_frame_derived_tracks_active_section() {
        setup();
        set_terminal_size(100, 40);

        let portfolio = Rc::new(Portfolio::builtin());
        let frame = create_frame_derived(portfolio.clone(), LayoutMode::Tabs);
        // Latch the reveal so panel content is comparable
        reveal::begin_hero_reveal(&portfolio.name, &portfolio.tagline);
        reveal::advance_reveal(120_000);
        reveal::advance_reveal(120_000);
        reveal::advance_stagger(120_000);

        let about = frame.get();
        nav::set_active_section(SectionId::Projects);
        let projects = frame.get();
        assert_ne!(about, projects);
    }
}

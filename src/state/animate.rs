//! Blink Animation System - shared clocks per rate
//!
//! Cursor blink phases come from shared clocks: every subscriber at the
//! same rate reads one phase signal, so multiple cursors blink in sync and
//! one clock serves them all. A clock runs only while it has subscribers.
//!
//! Clocks are advanced by the runtime loop ([`advance_blink`]) rather than
//! background timers - every state mutation in this application happens on
//! the event loop.
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::state::animate::{subscribe_blink, blink_phase, CURSOR_BLINK_HZ};
//!
//! let unsubscribe = subscribe_blink(CURSOR_BLINK_HZ);
//! let visible = blink_phase(CURSOR_BLINK_HZ);
//! unsubscribe();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use spark_signals::{Signal, signal};

/// Standard cursor blink rate: 2 Hz = 500ms on/off cycle.
pub const CURSOR_BLINK_HZ: u8 = 2;

// =============================================================================
// BLINK REGISTRY
// =============================================================================

/// Per-rate clock state.
struct BlinkClock {
    /// Phase signal: true = visible.
    phase: Signal<bool>,
    /// Milliseconds accumulated toward the next toggle.
    acc_ms: u64,
    /// Number of active subscribers.
    subscribers: usize,
}

thread_local! {
    /// Map from rate (Hz) to its shared clock.
    static BLINK_CLOCKS: RefCell<HashMap<u8, BlinkClock>> = RefCell::new(HashMap::new());
}

/// Half-cycle length: a 2 Hz blink toggles every 250ms.
fn toggle_interval_ms(hz: u8) -> u64 {
    1000 / hz as u64 / 2
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Subscribe to the blink clock at the given rate.
///
/// Returns an unsubscribe function. The clock starts with the first
/// subscriber and stops (phase reset to visible) with the last.
/// A rate of 0 disables blinking and returns a no-op unsubscribe.
pub fn subscribe_blink(hz: u8) -> Box<dyn FnOnce()> {
    if hz == 0 {
        return Box::new(|| {});
    }

    BLINK_CLOCKS.with(|clocks| {
        let mut clocks = clocks.borrow_mut();
        let clock = clocks.entry(hz).or_insert_with(|| BlinkClock {
            phase: signal(true), // start visible
            acc_ms: 0,
            subscribers: 0,
        });
        clock.subscribers += 1;
    });

    Box::new(move || {
        // Collect the reset outside the borrow: setting a signal can run
        // effects that read back into this registry
        let reset = BLINK_CLOCKS.with(|clocks| {
            let mut clocks = clocks.borrow_mut();
            let clock = clocks.get_mut(&hz)?;
            clock.subscribers = clock.subscribers.saturating_sub(1);
            if clock.subscribers == 0 {
                clock.acc_ms = 0;
                return Some(clock.phase.clone());
            }
            None
        });
        if let Some(phase) = reset {
            phase.set(true);
        }
    })
}

/// Current blink phase for the given rate (tracked read).
///
/// Returns true (visible) if no clock is running at this rate.
pub fn blink_phase(hz: u8) -> bool {
    BLINK_CLOCKS.with(|clocks| {
        let clocks = clocks.borrow();
        clocks.get(&hz).map(|c| c.phase.get()).unwrap_or(true)
    })
}

/// Advance every running clock by `elapsed_ms`.
///
/// Called once per runtime tick. Toggles each phase signal as many times
/// as its half-cycle fits into the accumulated time.
pub fn advance_blink(elapsed_ms: u64) {
    // Compute toggles first, apply after the borrow ends: setting a phase
    // signal can run effects that read back into this registry
    let toggles = BLINK_CLOCKS.with(|clocks| {
        let mut clocks = clocks.borrow_mut();
        let mut toggles = Vec::new();
        for (hz, clock) in clocks.iter_mut() {
            if clock.subscribers == 0 {
                continue;
            }
            let interval = toggle_interval_ms(*hz);
            clock.acc_ms += elapsed_ms;
            let mut phase = clock.phase.get();
            let mut flipped = false;
            while clock.acc_ms >= interval {
                clock.acc_ms -= interval;
                phase = !phase;
                flipped = true;
            }
            if flipped {
                toggles.push((clock.phase.clone(), phase));
            }
        }
        toggles
    });
    for (signal, phase) in toggles {
        signal.set(phase);
    }
}

/// Check if a clock is running (has subscribers) at the given rate.
pub fn is_blink_running(hz: u8) -> bool {
    BLINK_CLOCKS.with(|clocks| {
        clocks
            .borrow()
            .get(&hz)
            .map(|c| c.subscribers > 0)
            .unwrap_or(false)
    })
}

/// Number of subscribers at the given rate.
pub fn subscriber_count(hz: u8) -> usize {
    BLINK_CLOCKS.with(|clocks| {
        clocks
            .borrow()
            .get(&hz)
            .map(|c| c.subscribers)
            .unwrap_or(0)
    })
}

/// Reset all clocks (for testing).
pub fn reset_blink_state() {
    BLINK_CLOCKS.with(|clocks| clocks.borrow_mut().clear());
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset_blink_state();
    }

    #[test]
    fn test_subscribe_returns_unsubscribe() {
        setup();

        let unsubscribe = subscribe_blink(2);
        assert_eq!(subscriber_count(2), 1);

        unsubscribe();
        assert_eq!(subscriber_count(2), 0);
    }

    #[test]
    fn test_shared_clock_same_rate() {
        setup();

        let unsub1 = subscribe_blink(2);
        let unsub2 = subscribe_blink(2);
        assert_eq!(subscriber_count(2), 2);

        let clock_count = BLINK_CLOCKS.with(|c| c.borrow().len());
        assert_eq!(clock_count, 1);

        unsub1();
        assert!(is_blink_running(2));
        unsub2();
        assert!(!is_blink_running(2));
    }

    #[test]
    fn test_phase_toggles_at_half_cycle() {
        setup();

        let _unsub = subscribe_blink(2);
        assert!(blink_phase(2));

        // 2 Hz toggles every 250ms
        advance_blink(249);
        assert!(blink_phase(2));
        advance_blink(1);
        assert!(!blink_phase(2));
        advance_blink(250);
        assert!(blink_phase(2));
    }

    #[test]
    fn test_large_elapsed_toggles_multiple_times() {
        setup();

        let _unsub = subscribe_blink(2);
        // 750ms = 3 toggles -> off
        advance_blink(750);
        assert!(!blink_phase(2));
    }

    #[test]
    fn test_unsubscribed_clock_does_not_advance() {
        setup();

        let unsub = subscribe_blink(2);
        unsub();
        advance_blink(500);
        assert!(blink_phase(2)); // reset to visible, untouched
    }

    #[test]
    fn test_zero_rate_is_noop() {
        setup();

        let unsub = subscribe_blink(0);
        assert_eq!(BLINK_CLOCKS.with(|c| c.borrow().len()), 0);
        assert!(blink_phase(0));
        unsub();
    }

    #[test]
    fn test_different_rates_have_separate_clocks() {
        setup();

        let _a = subscribe_blink(2);
        let _b = subscribe_blink(4);
        assert_eq!(BLINK_CLOCKS.with(|c| c.borrow().len()), 2);

        // 4 Hz toggles every 125ms; 2 Hz doesn't
        advance_blink(125);
        assert!(!blink_phase(4));
        assert!(blink_phase(2));
    }
}

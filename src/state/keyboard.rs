//! Keyboard Module - Keyboard event state and handler registry
//!
//! State and handler registry for keyboard events.
//! Does NOT own stdin (that is the input module).
//!
//! # API
//!
//! - `last_event` - Get last keyboard event
//! - `on(handler)` - Subscribe to all keyboard events
//! - `on_key(key, fn)` - Subscribe to a specific key
//! - `dispatch(event)` - Route an event through the registry

use spark_signals::{Signal, signal};
use std::cell::RefCell;
use std::collections::HashMap;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }
}

/// Key event state (press or repeat)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }
}

/// Handler for keyboard events. Return true to consume the event.
pub type KeyHandler = Box<dyn Fn(&KeyboardEvent) -> bool>;

/// Handler for a specific key. Return true to consume the event.
pub type KeySpecificHandler = Box<dyn Fn() -> bool>;

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

/// Get the last keyboard event
pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

struct HandlerRegistry {
    global_handlers: Vec<(usize, KeyHandler)>,
    key_handlers: HashMap<String, Vec<(usize, KeySpecificHandler)>>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            global_handlers: Vec::new(),
            key_handlers: HashMap::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Subscribe to all keyboard events. Returns a cleanup function.
pub fn on(handler: impl Fn(&KeyboardEvent) -> bool + 'static) -> Box<dyn FnOnce()> {
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.global_handlers.push((id, Box::new(handler)));
        id
    });

    Box::new(move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            reg.global_handlers.retain(|(h_id, _)| *h_id != id);
        });
    })
}

/// Subscribe to a specific key. Returns a cleanup function.
pub fn on_key(key: impl Into<String>, handler: impl Fn() -> bool + 'static) -> Box<dyn FnOnce()> {
    let key = key.into();
    let key_for_cleanup = key.clone();

    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        reg.key_handlers
            .entry(key)
            .or_default()
            .push((id, Box::new(handler)));
        id
    });

    Box::new(move || {
        REGISTRY.with(|reg| {
            let mut reg = reg.borrow_mut();
            if let Some(handlers) = reg.key_handlers.get_mut(&key_for_cleanup) {
                handlers.retain(|(h_id, _)| *h_id != id);
            }
        });
    })
}

// =============================================================================
// EVENT DISPATCH
// =============================================================================

/// Dispatch a keyboard event to all registered handlers.
/// Returns true if any handler consumed the event.
pub fn dispatch(event: KeyboardEvent) -> bool {
    // Always update reactive state
    LAST_EVENT.with(|s| s.set(Some(event.clone())));

    // Only dispatch press events to handlers
    if event.state != KeyState::Press {
        return false;
    }

    REGISTRY.with(|reg| {
        let reg = reg.borrow();

        // Key-specific handlers first
        if let Some(handlers) = reg.key_handlers.get(&event.key) {
            for (_, handler) in handlers {
                if handler() {
                    return true;
                }
            }
        }

        // Then global handlers
        for (_, handler) in &reg.global_handlers {
            if handler(&event) {
                return true;
            }
        }

        false
    })
}

/// Reset handler registry and event state (for testing).
pub fn reset_keyboard_state() {
    REGISTRY.with(|reg| *reg.borrow_mut() = HandlerRegistry::new());
    LAST_EVENT.with(|s| s.set(None));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() {
        reset_keyboard_state();
    }

    #[test]
    fn test_on_key_receives_matching_key() {
        setup();

        let hits = Rc::new(Cell::new(0));
        let hits_in_handler = hits.clone();
        let _cleanup = on_key("t", move || {
            hits_in_handler.set(hits_in_handler.get() + 1);
            true
        });

        assert!(dispatch(KeyboardEvent::new("t")));
        assert!(!dispatch(KeyboardEvent::new("x")));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_cleanup_removes_handler() {
        setup();

        let cleanup = on_key("q", || true);
        assert!(dispatch(KeyboardEvent::new("q")));

        cleanup();
        assert!(!dispatch(KeyboardEvent::new("q")));
    }

    #[test]
    fn test_global_handler_sees_all_keys() {
        setup();

        let seen = Rc::new(Cell::new(0));
        let seen_in_handler = seen.clone();
        let _cleanup = on(move |_| {
            seen_in_handler.set(seen_in_handler.get() + 1);
            false
        });

        dispatch(KeyboardEvent::new("a"));
        dispatch(KeyboardEvent::new("b"));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_key_specific_consumes_before_global() {
        setup();

        let global_hits = Rc::new(Cell::new(0));
        let global_in_handler = global_hits.clone();
        let _g = on(move |_| {
            global_in_handler.set(global_in_handler.get() + 1);
            false
        });
        let _k = on_key("Enter", || true);

        assert!(dispatch(KeyboardEvent::new("Enter")));
        // Consumed before the global handler ran
        assert_eq!(global_hits.get(), 0);
    }

    #[test]
    fn test_release_events_update_state_but_skip_handlers() {
        setup();

        let _cleanup = on_key("a", || true);
        let mut event = KeyboardEvent::new("a");
        event.state = KeyState::Release;

        assert!(!dispatch(event.clone()));
        assert_eq!(last_event(), Some(event));
    }
}

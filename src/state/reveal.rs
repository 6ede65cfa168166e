//! Reveal Module - hero typing sequence, session latch, group stagger
//!
//! The hero intro is a three-state sequence per render:
//!
//! ```text
//! TypingName -> TypingBio -> Idle (blinking cursor)
//! ```
//!
//! On the first visit the name types out grapheme by grapheme, then the
//! bio at its own faster interval, then the cursor starts blinking and the
//! session latch closes. On every later visit the latch short-circuits the
//! sequence straight to Idle: full text at once, cursor already blinking.
//!
//! The latch is session-scoped and owned here, at the composition root's
//! level, not inside any view - remounting a view must not replay the
//! intro. Views receive it as a read-only snapshot; only the sequencer and
//! the runtime write it.
//!
//! Group entrances (social links, project cards, about paragraphs) use a
//! stagger clock: child `i` starts its fade `i * STAGGER_STEP_MS` after
//! the group mounts and fades over [`FADE_DURATION_MS`]. Tab changes
//! restart the clock; the hero latch does not gate the stagger.

use std::cell::RefCell;

use spark_signals::{Signal, signal};
use unicode_segmentation::UnicodeSegmentation;

// =============================================================================
// TIMING
// =============================================================================

/// Per-grapheme interval for the hero name.
pub const NAME_INTERVAL_MS: u64 = 90;

/// Per-grapheme interval for the bio line (faster).
pub const BIO_INTERVAL_MS: u64 = 30;

/// Delay between successive children of a staggered group.
pub const STAGGER_STEP_MS: u64 = 100;

/// Length of one child's entrance fade.
pub const FADE_DURATION_MS: u64 = 600;

// =============================================================================
// HERO SEQUENCE
// =============================================================================

/// The three-state hero sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeroPhase {
    #[default]
    TypingName,
    TypingBio,
    Idle,
}

/// Clock-driven typing sequencer. Pure state machine; the runtime feeds it
/// elapsed time and it reports transitions through the reveal signals.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TypingSequence {
    phase: HeroPhase,
    name_total: usize,
    bio_total: usize,
    name_shown: usize,
    bio_shown: usize,
    acc_ms: u64,
}

impl TypingSequence {
    /// Start a fresh sequence, or a completed one if the intro already
    /// played this session.
    fn new(name_total: usize, bio_total: usize, skip: bool) -> Self {
        if skip {
            Self {
                phase: HeroPhase::Idle,
                name_total,
                bio_total,
                name_shown: name_total,
                bio_shown: bio_total,
                acc_ms: 0,
            }
        } else {
            Self {
                phase: HeroPhase::TypingName,
                name_total,
                bio_total,
                name_shown: 0,
                bio_shown: 0,
                acc_ms: 0,
            }
        }
    }

    /// Advance by elapsed wall time. Returns true if visible state changed.
    ///
    /// Phase transitions fire in order: the bio starts only once the name
    /// is complete, the cursor only once the bio is complete.
    fn advance(&mut self, elapsed_ms: u64) -> bool {
        if self.phase == HeroPhase::Idle {
            return false;
        }

        self.acc_ms += elapsed_ms;
        let mut changed = false;

        loop {
            let interval = match self.phase {
                HeroPhase::TypingName => NAME_INTERVAL_MS,
                HeroPhase::TypingBio => BIO_INTERVAL_MS,
                HeroPhase::Idle => break,
            };
            if self.acc_ms < interval {
                break;
            }
            self.acc_ms -= interval;
            changed = true;

            match self.phase {
                HeroPhase::TypingName => {
                    self.name_shown += 1;
                    if self.name_shown >= self.name_total {
                        self.name_shown = self.name_total;
                        self.phase = HeroPhase::TypingBio;
                        self.acc_ms = 0;
                    }
                }
                HeroPhase::TypingBio => {
                    self.bio_shown += 1;
                    if self.bio_shown >= self.bio_total {
                        self.bio_shown = self.bio_total;
                        self.phase = HeroPhase::Idle;
                    }
                }
                HeroPhase::Idle => {}
            }
        }

        changed
    }
}

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    /// One-way session latch: set true when the intro completes, never
    /// cleared for the lifetime of the session.
    static HAS_PLAYED: Signal<bool> = signal(false);
    static PHASE: Signal<HeroPhase> = signal(HeroPhase::TypingName);
    static NAME_SHOWN: Signal<usize> = signal(0);
    static BIO_SHOWN: Signal<usize> = signal(0);
    static SEQ: RefCell<Option<TypingSequence>> = const { RefCell::new(None) };

    /// Milliseconds since the current staggered group mounted.
    static STAGGER_CLOCK: Signal<u64> = signal(0);
}

/// Whether the intro has completed once this session (tracked read).
pub fn has_played() -> bool {
    HAS_PLAYED.with(|s| s.get())
}

/// Current hero phase (tracked read).
pub fn hero_phase() -> HeroPhase {
    PHASE.with(|s| s.get())
}

/// Graphemes of the name currently visible (tracked read).
pub fn name_shown() -> usize {
    NAME_SHOWN.with(|s| s.get())
}

/// Graphemes of the bio currently visible (tracked read).
pub fn bio_shown() -> usize {
    BIO_SHOWN.with(|s| s.get())
}

/// Begin a hero reveal for the given texts.
///
/// Consults the session latch: if the intro already played, the sequence
/// starts complete (Idle, full text). Called on mount and whenever the
/// hero view re-enters.
pub fn begin_hero_reveal(name: &str, bio: &str) {
    let name_total = name.graphemes(true).count();
    let bio_total = bio.graphemes(true).count();
    let skip = HAS_PLAYED.with(|s| s.get());

    let seq = TypingSequence::new(name_total, bio_total, skip);
    publish(&seq);
    SEQ.with(|cell| *cell.borrow_mut() = Some(seq));
}

/// Advance the typing sequence by elapsed wall time.
///
/// Latches `has_played` the moment the sequence reaches Idle. Safe to call
/// with no sequence in flight.
pub fn advance_reveal(elapsed_ms: u64) {
    SEQ.with(|cell| {
        let mut cell = cell.borrow_mut();
        let Some(seq) = cell.as_mut() else {
            return;
        };

        if seq.advance(elapsed_ms) {
            publish(seq);
            if seq.phase == HeroPhase::Idle {
                HAS_PLAYED.with(|s| {
                    if !s.get() {
                        s.set(true);
                    }
                });
            }
        }
    });
}

/// Mirror sequencer state into the reveal signals.
fn publish(seq: &TypingSequence) {
    PHASE.with(|s| {
        if s.get() != seq.phase {
            s.set(seq.phase);
        }
    });
    NAME_SHOWN.with(|s| {
        if s.get() != seq.name_shown {
            s.set(seq.name_shown);
        }
    });
    BIO_SHOWN.with(|s| {
        if s.get() != seq.bio_shown {
            s.set(seq.bio_shown);
        }
    });
}

// =============================================================================
// STAGGER
// =============================================================================

/// Milliseconds since the current group mounted (tracked read).
pub fn stagger_ms() -> u64 {
    STAGGER_CLOCK.with(|s| s.get())
}

/// Restart the group entrance clock (tab/section change).
pub fn restart_stagger() {
    STAGGER_CLOCK.with(|s| s.set(0));
}

/// Advance the group entrance clock.
///
/// Saturates shortly past the point where every realistic group has fully
/// entered, so an idle session stops producing repaints.
pub fn advance_stagger(elapsed_ms: u64) {
    const STAGGER_CEILING_MS: u64 = 20 * STAGGER_STEP_MS + FADE_DURATION_MS;
    STAGGER_CLOCK.with(|s| {
        let current = s.get();
        if current < STAGGER_CEILING_MS {
            s.set((current + elapsed_ms).min(STAGGER_CEILING_MS));
        }
    });
}

/// Entrance progress of child `index` in the current group: 0.0 = not yet
/// started, 1.0 = fully entered.
pub fn stagger_progress(index: usize) -> f32 {
    progress_at(stagger_ms(), index)
}

/// Pure form of [`stagger_progress`] for a given clock value.
pub fn progress_at(clock_ms: u64, index: usize) -> f32 {
    let start = index as u64 * STAGGER_STEP_MS;
    if clock_ms <= start {
        return 0.0;
    }
    let into = (clock_ms - start) as f32;
    (into / FADE_DURATION_MS as f32).min(1.0)
}

/// Reset all reveal state including the session latch (for testing).
pub fn reset_reveal_state() {
    HAS_PLAYED.with(|s| s.set(false));
    PHASE.with(|s| s.set(HeroPhase::TypingName));
    NAME_SHOWN.with(|s| s.set(0));
    BIO_SHOWN.with(|s| s.set(0));
    SEQ.with(|cell| *cell.borrow_mut() = None);
    STAGGER_CLOCK.with(|s| s.set(0));
}

// =============================================================================
// TESTS
// =============================================================================

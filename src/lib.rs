//! # folio-tui
//!
//! A personal portfolio rendered as a reactive terminal application.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity: state lives in signals, one derived computes the
//! frame, and a single render effect paints it through a diff renderer.
//!
//! ## Architecture
//!
//! ```text
//! content (static data)
//!    |
//! state signals (theme, nav, scroll, reveal) -> frame derived -> render effect
//!    ^                                                               |
//!    +--------------- event loop (keys, wheel, resize, clock) <------+
//! ```
//!
//! ## Modules
//!
//! - [`content`] - Static portfolio data: projects, links, nav registry
//! - [`theme`] - Dark/light palettes behind one mode signal
//! - [`state`] - Navigation strategies, scroll, reveal/typing, input
//! - [`view`] - Pure frame composition per layout
//! - [`render`] - FrameBuffer and the differential terminal renderer
//! - [`runtime`] - Mount/unmount lifecycle and the event loop

pub mod cli;
pub mod content;
pub mod error;
pub mod render;
pub mod runtime;
pub mod state;
pub mod theme;
pub mod types;
pub mod view;

// Re-export commonly used items
pub use types::*;

pub use content::{NavEntry, Portfolio, Project, Resume, SectionId, SocialLink};

pub use error::{Error, Result};

pub use render::{DiffRenderer, FrameBuffer};

pub use runtime::{
    SessionHandle, create_frame_derived, detect_terminal_size, mount, run, set_terminal_size,
    terminal_size, tick, unmount,
};

pub use state::{
    // Nav
    ActiveSectionStrategy, LayoutMode, Marker, NavContext, ScrollStrategy, SectionGeometry,
    TabStrategy, active_section,
    // Reveal
    HeroPhase, begin_hero_reveal, has_played,
    // Input
    InputEvent, KeyboardEvent,
};

pub use theme::{
    Theme, ThemeMode, ThemeOwnership, active_palette, dark, light, theme_mode, toggle_theme,
};

pub use view::{RevealSnapshot, ViewContext, compose, compose_document, section_geometry};

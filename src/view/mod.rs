//! View Renderer - pure frame composition.
//!
//! Given the content, the active palette, the resolved active section, the
//! scroll offset, and the reveal snapshot, [`compose`] produces the full
//! frame. Composition mutates no state: every input arrives by value or
//! shared reference, and the same inputs always produce the same frame.
//!
//! Two layouts share all the section views:
//!
//! - **Tabs**: chrome + the single active panel.
//! - **Scroll**: chrome + a window into one tall document with all three
//!   sections stacked ([`compose_document`]), cut by the scroll offset.

use crate::content::{Portfolio, SectionId};
use crate::render::FrameBuffer;
use crate::state::nav::{LayoutMode, Marker, SectionGeometry};
use crate::state::reveal::HeroPhase;
use crate::theme::Theme;
use crate::types::Attr;

pub mod about;
pub mod header;
pub mod nav_bar;
pub mod projects;
pub mod resume;
pub mod text;

use self::text::display_width;

// =============================================================================
// Inputs
// =============================================================================

/// Reveal state sampled for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSnapshot {
    pub phase: HeroPhase,
    pub name_shown: usize,
    pub bio_shown: usize,
    pub cursor_visible: bool,
    pub stagger_ms: u64,
}

/// Everything one frame needs.
#[derive(Debug, Clone)]
pub struct ViewContext<'a> {
    pub portfolio: &'a Portfolio,
    pub theme: Theme,
    pub layout: LayoutMode,
    pub active: SectionId,
    pub marker: Marker,
    pub scroll_y: u16,
    pub width: u16,
    pub height: u16,
    pub reveal: RevealSnapshot,
}

// =============================================================================
// Shared layout helpers
// =============================================================================

/// Left offset that centers `content_width` cells.
pub(crate) fn centered_x(width: u16, content_width: u16) -> u16 {
    width.saturating_sub(content_width) / 2
}

/// Width of the content column panels draw into.
pub(crate) fn panel_width(width: u16) -> u16 {
    width.saturating_sub(6).clamp(20, 96)
}

/// Left margin of the content column.
pub(crate) fn panel_margin(width: u16) -> u16 {
    centered_x(width, panel_width(width))
}

/// Display label for a section: its nav entry's name, or a fixed fallback.
fn section_label(portfolio: &Portfolio, section: SectionId) -> String {
    portfolio
        .nav
        .iter()
        .find(|entry| entry.target == section)
        .map(|entry| entry.name.clone())
        .unwrap_or_else(|| {
            match section {
                SectionId::About => "About",
                SectionId::Projects => "Projects",
                SectionId::Resume => "Resume",
            }
            .to_string()
        })
}

/// Rows of one section panel.
fn panel_height(portfolio: &Portfolio, section: SectionId, width: u16) -> u16 {
    match section {
        SectionId::About => about::height(portfolio, width),
        SectionId::Projects => projects::height(portfolio, width),
        SectionId::Resume => resume::height(portfolio, width),
    }
}

fn draw_panel(buffer: &mut FrameBuffer, y: u16, ctx: &ViewContext, section: SectionId) -> u16 {
    match section {
        SectionId::About => about::draw(buffer, y, ctx),
        SectionId::Projects => projects::draw(buffer, y, ctx),
        SectionId::Resume => resume::draw(buffer, y, ctx),
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Rows of heading chrome above each stacked section (label + blank).
const SECTION_HEADING_ROWS: u16 = 2;

/// Blank rows between stacked sections.
const SECTION_GAP: u16 = 2;

/// Fixed chrome height above the document: header + nav bar + one blank.
pub fn chrome_height(portfolio: &Portfolio, width: u16) -> u16 {
    header::height(portfolio, width) + nav_bar::NAV_BAR_ROWS + 1
}

/// Where each stacked section starts, for the scroll strategy.
///
/// Offsets are document-absolute (first section at 0); `header_height` is
/// the fixed chrome above the document.
pub fn section_geometry(portfolio: &Portfolio, width: u16) -> SectionGeometry {
    let mut offsets = Vec::with_capacity(SectionId::ALL.len());
    let mut y = 0u16;
    for section in SectionId::ALL {
        offsets.push(y);
        y += SECTION_HEADING_ROWS + panel_height(portfolio, section, width) + SECTION_GAP;
    }
    SectionGeometry {
        offsets,
        header_height: chrome_height(portfolio, width),
    }
}

/// Total rows of the stacked document.
pub fn document_height(portfolio: &Portfolio, width: u16) -> u16 {
    let geometry = section_geometry(portfolio, width);
    let last = SectionId::ALL[SectionId::ALL.len() - 1];
    geometry.offsets[last.index()] + SECTION_HEADING_ROWS + panel_height(portfolio, last, width)
        + 1
}

// =============================================================================
// Composition
// =============================================================================

/// Compose the full frame. Pure: no state is read or written here beyond
/// the passed context.
pub fn compose(ctx: &ViewContext) -> FrameBuffer {
    let theme = &ctx.theme;
    let mut screen =
        FrameBuffer::with_background(ctx.width, ctx.height, theme.text, theme.background);

    let mut y = header::draw(&mut screen, ctx);
    y += nav_bar::draw(&mut screen, y, ctx);
    y += 1;

    match ctx.layout {
        LayoutMode::Tabs => {
            draw_panel(&mut screen, y, ctx, ctx.active);
        }
        LayoutMode::Scroll => {
            let document = compose_document(ctx);
            let viewport = ctx.height.saturating_sub(y).saturating_sub(1);
            screen.blit_rows(&document, ctx.scroll_y, y, viewport);
        }
    }

    draw_footer(&mut screen, ctx);
    screen
}

/// Compose the stacked document (scroll layout): every section with its
/// heading, at its geometry offset.
pub fn compose_document(ctx: &ViewContext) -> FrameBuffer {
    let theme = &ctx.theme;
    let height = document_height(ctx.portfolio, ctx.width);
    let mut document =
        FrameBuffer::with_background(ctx.width, height, theme.text, theme.background);

    let geometry = section_geometry(ctx.portfolio, ctx.width);
    let x = panel_margin(ctx.width);
    for section in SectionId::ALL {
        let top = geometry.offsets[section.index()];
        let label = section_label(ctx.portfolio, section);
        document.draw_text(x, top, &label, theme.primary, theme.background, Attr::BOLD);
        draw_panel(&mut document, top + SECTION_HEADING_ROWS, ctx, section);
    }
    document
}

fn draw_footer(screen: &mut FrameBuffer, ctx: &ViewContext) {
    let theme = &ctx.theme;
    let hint = match ctx.layout {
        LayoutMode::Tabs => "1-3 switch \u{b7} t theme \u{b7} q quit",
        LayoutMode::Scroll => "1-3 jump \u{b7} \u{2191}\u{2193} scroll \u{b7} t theme \u{b7} q quit",
    };
    let x = centered_x(ctx.width, display_width(hint));
    let y = ctx.height.saturating_sub(1);
    screen.draw_text(x, y, hint, theme.text_muted, theme.background, Attr::NONE);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::reveal;
    use crate::theme::palette;

    fn snapshot(portfolio: &Portfolio) -> RevealSnapshot {
        RevealSnapshot {
            phase: HeroPhase::Idle,
            name_shown: text::grapheme_count(&portfolio.name),
            bio_shown: text::grapheme_count(&portfolio.tagline),
            cursor_visible: true,
            stagger_ms: 60_000,
        }
    }

    fn ctx<'a>(portfolio: &'a Portfolio, layout: LayoutMode, active: SectionId) -> ViewContext<'a> {
        ViewContext {
            portfolio,
            theme: palette::dark(),
            layout,
            active,
            marker: Marker::default(),
            scroll_y: 0,
            width: 100,
            height: 40,
            reveal: snapshot(portfolio),
        }
    }

    fn buffer_text(buffer: &FrameBuffer) -> String {
        let mut out = String::new();
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                if let Some(c) = char::from_u32(buffer.get(x, y).unwrap().char) {
                    out.push(c);
                }
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_tab_frame_shows_only_active_panel() {
        let portfolio = Portfolio::builtin();

        let about = buffer_text(&compose(&ctx(&portfolio, LayoutMode::Tabs, SectionId::About)));
        assert!(about.contains("sophomore"));
        assert!(!about.contains(&portfolio.projects[0].title));

        let projects =
            buffer_text(&compose(&ctx(&portfolio, LayoutMode::Tabs, SectionId::Projects)));
        assert!(projects.contains(&portfolio.projects[0].title));
        assert!(!projects.contains("sophomore"));
    }

    #[test]
    fn test_frame_background_follows_theme() {
        let portfolio = Portfolio::builtin();
        let mut c = ctx(&portfolio, LayoutMode::Tabs, SectionId::About);

        let dark_frame = compose(&c);
        c.theme = palette::light();
        let light_frame = compose(&c);

        assert_eq!(
            dark_frame.get(0, 0).unwrap().bg,
            palette::dark().background
        );
        assert_eq!(
            light_frame.get(0, 0).unwrap().bg,
            palette::light().background
        );

        // Every cell switched: no partial-theme render
        let dark_bg = palette::dark().background;
        for y in 0..light_frame.height() {
            for x in 0..light_frame.width() {
                assert_ne!(light_frame.get(x, y).unwrap().bg, dark_bg);
            }
        }
    }

    #[test]
    fn test_geometry_offsets_are_increasing() {
        let portfolio = Portfolio::builtin();
        let geometry = section_geometry(&portfolio, 100);
        assert_eq!(geometry.offsets.len(), 3);
        assert_eq!(geometry.offsets[0], 0);
        assert!(geometry.offsets[0] < geometry.offsets[1]);
        assert!(geometry.offsets[1] < geometry.offsets[2]);
        assert_eq!(
            geometry.header_height,
            chrome_height(&portfolio, 100)
        );
    }

    #[test]
    fn test_document_contains_all_sections() {
        let portfolio = Portfolio::builtin();
        let c = ctx(&portfolio, LayoutMode::Scroll, SectionId::About);
        let document = compose_document(&c);
        let text = buffer_text(&document);

        assert!(text.contains("sophomore"));
        assert!(text.contains(&portfolio.projects[0].title));
        assert!(text.contains("Resume coming soon!"));
        assert!(document.height() >= document_height(&portfolio, c.width));
    }

    #[test]
    fn test_scroll_frame_windows_the_document() {
        let portfolio = Portfolio::builtin();
        let mut c = ctx(&portfolio, LayoutMode::Scroll, SectionId::About);

        // Scrolled to the projects section: its heading is on screen,
        // the about copy is above the window
        let geometry = section_geometry(&portfolio, c.width);
        c.scroll_y = geometry.offsets[1];
        let frame = buffer_text(&compose(&c));
        assert!(frame.contains(&portfolio.projects[0].title));
        assert!(!frame.contains("sophomore"));
    }

    #[test]
    fn test_footer_hint_present() {
        let portfolio = Portfolio::builtin();
        let frame = buffer_text(&compose(&ctx(&portfolio, LayoutMode::Tabs, SectionId::About)));
        assert!(frame.contains("t theme"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let portfolio = Portfolio::builtin();
        let c = ctx(&portfolio, LayoutMode::Tabs, SectionId::Projects);
        assert_eq!(compose(&c), compose(&c));
    }

    #[test]
    fn test_compose_survives_tiny_terminal() {
        let portfolio = Portfolio::builtin();
        let mut c = ctx(&portfolio, LayoutMode::Scroll, SectionId::About);
        c.width = 8;
        c.height = 4;
        let frame = compose(&c);
        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 4);
    }

    #[test]
    fn test_reveal_module_feeds_snapshot() {
        // The snapshot fields mirror the reveal signals one-to-one
        reveal::reset_reveal_state();
        reveal::begin_hero_reveal("ab", "cd");
        let snap = RevealSnapshot {
            phase: reveal::hero_phase(),
            name_shown: reveal::name_shown(),
            bio_shown: reveal::bio_shown(),
            cursor_visible: false,
            stagger_ms: reveal::stagger_ms(),
        };
        assert_eq!(snap.phase, HeroPhase::TypingName);
        assert_eq!(snap.name_shown, 0);
    }
}

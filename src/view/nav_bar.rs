//! Navigation bar: tab labels plus the sliding active marker.
//!
//! The marker is one visual - it never jumps between tabs, it glides. Its
//! geometry comes from [`tab_spans`]; the runtime retargets the marker
//! whenever the active section changes and the motion interpolates frame
//! by frame.

use crate::content::NavEntry;
use crate::render::FrameBuffer;
use crate::types::Attr;

use super::text::display_width;
use super::{ViewContext, centered_x};

/// Horizontal padding inside a tab, each side.
const TAB_PADDING: u16 = 2;

/// Gap between tabs.
const TAB_GAP: u16 = 2;

/// Rows the nav bar occupies (labels + marker).
pub const NAV_BAR_ROWS: u16 = 2;

/// The (x, width) span of each tab at this terminal width.
pub fn tab_spans(nav: &[NavEntry], width: u16) -> Vec<(u16, u16)> {
    let widths: Vec<u16> = nav
        .iter()
        .map(|entry| display_width(&entry.name) + TAB_PADDING * 2)
        .collect();
    let total: u16 = widths.iter().sum::<u16>() + nav.len().saturating_sub(1) as u16 * TAB_GAP;

    let mut x = centered_x(width, total);
    let mut spans = Vec::with_capacity(nav.len());
    for w in widths {
        spans.push((x, w));
        x += w + TAB_GAP;
    }
    spans
}

/// Marker geometry for the tab at `active_index`.
pub fn marker_target(nav: &[NavEntry], active_index: usize, width: u16) -> (f32, f32) {
    let spans = tab_spans(nav, width);
    let (x, w) = spans
        .get(active_index)
        .copied()
        .unwrap_or((centered_x(width, 0), 0));
    (x as f32, w as f32)
}

/// Draw the nav bar. Returns rows used.
pub fn draw(buffer: &mut FrameBuffer, y: u16, ctx: &ViewContext) -> u16 {
    let theme = &ctx.theme;
    let bg = theme.background;
    let spans = tab_spans(&ctx.portfolio.nav, ctx.width);

    for (entry, &(x, w)) in ctx.portfolio.nav.iter().zip(&spans) {
        let is_active = entry.target == ctx.active;
        let (fg, attrs) = if is_active {
            (theme.primary, Attr::BOLD)
        } else {
            (theme.text_muted, Attr::NONE)
        };
        buffer.fill_rect(x, y, w, 1, crate::types::Cell::blank(fg, bg));
        buffer.draw_text(x + TAB_PADDING, y, &entry.name, fg, bg, attrs);
    }

    // The sliding marker, at its interpolated position
    let marker = ctx.marker;
    let marker_x = marker.x.round().max(0.0) as u16;
    let marker_w = marker.width.round().max(0.0) as u16;
    buffer.draw_hline(marker_x, y + 1, marker_w, '\u{2501}', theme.primary, bg);

    NAV_BAR_ROWS
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Portfolio, SectionId};
    use crate::state::nav::{LayoutMode, Marker};
    use crate::state::reveal::HeroPhase;
    use crate::theme::palette;
    use crate::view::RevealSnapshot;

    fn ctx(portfolio: &Portfolio, active: SectionId, marker: Marker) -> ViewContext<'_> {
        ViewContext {
            portfolio,
            theme: palette::dark(),
            layout: LayoutMode::Tabs,
            active,
            marker,
            scroll_y: 0,
            width: 80,
            height: 24,
            reveal: RevealSnapshot {
                phase: HeroPhase::Idle,
                name_shown: 0,
                bio_shown: 0,
                cursor_visible: false,
                stagger_ms: 0,
            },
        }
    }

    #[test]
    fn test_spans_are_ordered_and_disjoint() {
        let portfolio = Portfolio::builtin();
        let spans = tab_spans(&portfolio.nav, 80);
        assert_eq!(spans.len(), 3);
        for pair in spans.windows(2) {
            assert!(pair[0].0 + pair[0].1 < pair[1].0);
        }
    }

    #[test]
    fn test_marker_target_matches_span() {
        let portfolio = Portfolio::builtin();
        let spans = tab_spans(&portfolio.nav, 80);
        let (x, w) = marker_target(&portfolio.nav, 1, 80);
        assert_eq!(x, spans[1].0 as f32);
        assert_eq!(w, spans[1].1 as f32);
    }

    #[test]
    fn test_exactly_one_tab_highlighted() {
        let portfolio = Portfolio::builtin();
        for active in SectionId::ALL {
            let c = ctx(&portfolio, active, Marker::default());
            let mut buffer = FrameBuffer::new(80, 24);
            draw(&mut buffer, 0, &c);

            let spans = tab_spans(&portfolio.nav, 80);
            let highlighted = c
                .portfolio
                .nav
                .iter()
                .zip(&spans)
                .filter(|&(_, &(x, _))| {
                    buffer.get(x + TAB_PADDING, 0).unwrap().attrs.contains(Attr::BOLD)
                })
                .count();
            assert_eq!(highlighted, 1);
        }
    }

    #[test]
    fn test_marker_drawn_at_interpolated_position() {
        let portfolio = Portfolio::builtin();
        let marker = Marker {
            x: 10.4,
            width: 9.0,
            target_x: 40.0,
            target_width: 9.0,
        };
        let c = ctx(&portfolio, SectionId::About, marker);
        let mut buffer = FrameBuffer::new(80, 24);
        draw(&mut buffer, 0, &c);

        assert_eq!(buffer.get(10, 1).unwrap().char, '\u{2501}' as u32);
        assert_eq!(buffer.get(18, 1).unwrap().char, '\u{2501}' as u32);
        assert_ne!(buffer.get(19, 1).unwrap().char, '\u{2501}' as u32);
    }
}

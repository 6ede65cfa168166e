//! About panel: the biography paragraphs with a staggered entrance.

use crate::content::Portfolio;
use crate::render::FrameBuffer;
use crate::state::reveal::progress_at;
use crate::types::{Attr, Rgba};

use super::text::wrap_text;
use super::{ViewContext, panel_margin, panel_width};

/// Panel rows at this width.
pub fn height(portfolio: &Portfolio, width: u16) -> u16 {
    let pw = panel_width(width);
    let mut rows = 0u16;
    for (i, paragraph) in portfolio.about.iter().enumerate() {
        if i > 0 {
            rows += 1; // blank line between paragraphs
        }
        rows += wrap_text(paragraph, pw).len() as u16;
    }
    rows
}

/// Draw the panel starting at `y`. Returns rows used.
pub fn draw(buffer: &mut FrameBuffer, y: u16, ctx: &ViewContext) -> u16 {
    let theme = &ctx.theme;
    let bg = theme.background;
    let pw = panel_width(ctx.width);
    let x = panel_margin(ctx.width);

    let mut row = y;
    for (i, paragraph) in ctx.portfolio.about.iter().enumerate() {
        if i > 0 {
            row += 1;
        }

        // Each paragraph is one staggered child fading up from the ground
        let progress = progress_at(ctx.reveal.stagger_ms, i);
        let fg = Rgba::lerp(bg, theme.text, progress);

        for line in wrap_text(paragraph, pw) {
            if progress > 0.0 {
                buffer.draw_text(x, row, &line, fg, bg, Attr::NONE);
            }
            row += 1;
        }
    }
    row - y
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SectionId;
    use crate::state::nav::{LayoutMode, Marker};
    use crate::state::reveal::HeroPhase;
    use crate::theme::palette;
    use crate::view::RevealSnapshot;

    fn ctx(portfolio: &Portfolio, stagger_ms: u64) -> ViewContext<'_> {
        ViewContext {
            portfolio,
            theme: palette::dark(),
            layout: LayoutMode::Tabs,
            active: SectionId::About,
            marker: Marker::default(),
            scroll_y: 0,
            width: 90,
            height: 200,
            reveal: RevealSnapshot {
                phase: HeroPhase::Idle,
                name_shown: 0,
                bio_shown: 0,
                cursor_visible: false,
                stagger_ms,
            },
        }
    }

    #[test]
    fn test_height_matches_draw() {
        let portfolio = Portfolio::builtin();
        let c = ctx(&portfolio, 60_000);
        let mut buffer = FrameBuffer::new(c.width, c.height);
        assert_eq!(draw(&mut buffer, 0, &c), height(&portfolio, c.width));
    }

    #[test]
    fn test_fully_entered_text_uses_body_color() {
        let portfolio = Portfolio::builtin();
        let c = ctx(&portfolio, 60_000);
        let mut buffer = FrameBuffer::new(c.width, c.height);
        draw(&mut buffer, 0, &c);

        let x = panel_margin(c.width);
        assert_eq!(buffer.get(x, 0).unwrap().fg, palette::dark().text);
    }

    #[test]
    fn test_second_paragraph_lags_the_first() {
        let portfolio = Portfolio::builtin();
        // Clock inside paragraph 0's fade, before paragraph 1 starts
        let c = ctx(&portfolio, crate::state::reveal::STAGGER_STEP_MS / 2);
        let mut buffer = FrameBuffer::new(c.width, c.height);
        draw(&mut buffer, 0, &c);

        let x = panel_margin(c.width);
        let p0_rows = wrap_text(&portfolio.about[0], panel_width(c.width)).len() as u16;

        let first = buffer.get(x, 0).unwrap();
        let second = buffer.get(x, p0_rows + 1).unwrap();
        // First paragraph is mid-fade (not background), second not drawn yet
        assert_ne!(first.fg, palette::dark().background);
        assert_eq!(second.char, b' ' as u32);
    }
}

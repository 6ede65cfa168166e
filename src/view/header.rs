//! Hero header: typed name, typed bio line, cursor, social links.
//!
//! The header is fixed chrome - it never scrolls. Both typed texts center
//! on their final width so glyphs don't shift while the reveal runs.

use crate::content::Portfolio;
use crate::render::FrameBuffer;
use crate::state::reveal::{HeroPhase, progress_at};
use crate::types::{Attr, Rgba};

use super::text::{display_width, grapheme_count, take_graphemes, wrap_text};
use super::{ViewContext, centered_x};

/// Tagline wrap width for a given terminal width.
fn tagline_width(width: u16) -> u16 {
    width.saturating_sub(8).clamp(10, 80)
}

/// Header rows for this portfolio at this width.
pub fn height(portfolio: &Portfolio, width: u16) -> u16 {
    let tagline_rows = wrap_text(&portfolio.tagline, tagline_width(width)).len() as u16;
    // blank, name, blank, tagline..., blank, links, blank
    6 + tagline_rows
}

/// Draw the header at the top of the screen. Returns rows used.
pub fn draw(buffer: &mut FrameBuffer, ctx: &ViewContext) -> u16 {
    let theme = &ctx.theme;
    let portfolio = ctx.portfolio;
    let bg = theme.background;
    let mut y = 1;

    // Name, revealed grapheme by grapheme, centered on its final width
    let name_x = centered_x(ctx.width, display_width(&portfolio.name));
    let visible_name = take_graphemes(&portfolio.name, ctx.reveal.name_shown);
    buffer.draw_text(name_x, y, visible_name, theme.text_bright, bg, Attr::BOLD);
    y += 2;

    // Tagline, typed at its own rate once the name is done
    let lines = wrap_text(&portfolio.tagline, tagline_width(ctx.width));
    let mut remaining = ctx.reveal.bio_shown;
    let mut cursor_pos: Option<(u16, u16)> = None;

    for line in &lines {
        let count = grapheme_count(line);
        let shown = remaining.min(count);
        let visible = take_graphemes(line, shown);
        let line_x = centered_x(ctx.width, display_width(line));

        buffer.draw_text(line_x, y, visible, theme.text, bg, Attr::NONE);
        if shown > 0 || cursor_pos.is_none() {
            cursor_pos = Some((line_x + display_width(visible), y));
        }

        // One budget unit for the space the line break replaced
        remaining = remaining.saturating_sub(count + 1);
        y += 1;
    }

    // Terminal-style cursor, appended after the text once the bio is done
    if ctx.reveal.phase == HeroPhase::Idle && ctx.reveal.cursor_visible {
        if let Some((cx, cy)) = cursor_pos {
            buffer.draw_text(cx, cy, "\u{2588}", theme.accent, bg, Attr::NONE);
        }
    }
    y += 1;

    // Social links, staggered entrance left to right
    draw_social_links(buffer, ctx, y);
    y += 2;

    y
}

fn draw_social_links(buffer: &mut FrameBuffer, ctx: &ViewContext, y: u16) {
    let theme = &ctx.theme;
    let bg = theme.background;
    let links = &ctx.portfolio.social_links;

    let total: u16 = links
        .iter()
        .map(|l| display_width(&l.icon) + 1 + display_width(&l.name))
        .sum::<u16>()
        + links.len().saturating_sub(1) as u16 * 3;

    let mut x = centered_x(ctx.width, total);
    for (i, link) in links.iter().enumerate() {
        let progress = progress_at(ctx.reveal.stagger_ms, i);
        if progress > 0.0 {
            let icon_fg = Rgba::lerp(bg, theme.accent, progress);
            let name_fg = Rgba::lerp(bg, theme.text_muted, progress);
            x += buffer.draw_text(x, y, &link.icon, icon_fg, bg, Attr::NONE);
            x += 1;
            x += buffer.draw_text(x, y, &link.name, name_fg, bg, Attr::NONE);
        } else {
            x += display_width(&link.icon) + 1 + display_width(&link.name);
        }
        x += 3;
    }
}

// =============================================================================
// Tests
// =============================================================================

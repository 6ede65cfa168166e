//! Projects panel: one bordered card per project.
//!
//! A card shows the title, the description, and every technology in the
//! record's order as chip-styled tags. N projects always produce exactly
//! N cards. Cards enter with the group stagger, fading up from the page
//! background.

use crate::content::{Portfolio, Project};
use crate::render::FrameBuffer;
use crate::state::reveal::progress_at;
use crate::types::{Attr, Rgba};

use super::text::{display_width, wrap_text};
use super::{ViewContext, panel_margin, panel_width};

/// Blank rows between cards.
const CARD_GAP: u16 = 1;

/// Border + one pad column each side.
const CARD_INSET: u16 = 2;

fn inner_width(width: u16) -> u16 {
    panel_width(width).saturating_sub(CARD_INSET * 2)
}

/// Rows for one card at this width.
fn card_height(project: &Project, width: u16) -> u16 {
    let iw = inner_width(width);
    let desc_rows = wrap_text(&project.description, iw).len() as u16;
    let link_rows = if project.link.is_some() { 1 } else { 0 };
    // top border, title, blank, description, blank, chips, [link], bottom border
    6 + desc_rows + link_rows
}

/// Panel rows at this width.
pub fn height(portfolio: &Portfolio, width: u16) -> u16 {
    let cards: u16 = portfolio
        .projects
        .iter()
        .map(|p| card_height(p, width))
        .sum();
    cards + portfolio.projects.len().saturating_sub(1) as u16 * CARD_GAP
}

/// Draw the panel starting at `y`. Returns rows used.
pub fn draw(buffer: &mut FrameBuffer, y: u16, ctx: &ViewContext) -> u16 {
    let pw = panel_width(ctx.width);
    let x = panel_margin(ctx.width);

    let mut row = y;
    for (i, project) in ctx.portfolio.projects.iter().enumerate() {
        if i > 0 {
            row += CARD_GAP;
        }
        let progress = progress_at(ctx.reveal.stagger_ms, i);
        if progress > 0.0 {
            draw_card(buffer, x, row, pw, project, ctx, progress);
        }
        row += card_height(project, ctx.width);
    }
    row - y
}

fn draw_card(
    buffer: &mut FrameBuffer,
    x: u16,
    y: u16,
    pw: u16,
    project: &Project,
    ctx: &ViewContext,
    progress: f32,
) {
    let theme = &ctx.theme;
    let page = theme.background;

    // The whole card fades up from the page background
    let surface = Rgba::lerp(page, theme.surface, progress);
    let border = Rgba::lerp(page, theme.border, progress);
    let title_fg = Rgba::lerp(page, theme.text_bright, progress);
    let text_fg = Rgba::lerp(page, theme.text_muted, progress);
    let chip_bg = Rgba::lerp(page, theme.chip, progress);
    let chip_fg = Rgba::lerp(page, theme.text, progress);
    let accent = Rgba::lerp(page, theme.accent, progress);

    let h = card_height(project, ctx.width);
    buffer.draw_box(x, y, pw, h, border, surface);

    let ix = x + CARD_INSET;
    let iw = inner_width(ctx.width);
    let mut row = y + 1;

    buffer.draw_text(ix, row, &project.title, title_fg, surface, Attr::BOLD);
    row += 2;

    for line in wrap_text(&project.description, iw) {
        buffer.draw_text(ix, row, &line, text_fg, surface, Attr::NONE);
        row += 1;
    }
    row += 1;

    // Technology chips, in record order
    let mut chip_x = ix;
    for tech in &project.technologies {
        let label_width = display_width(tech) + 2;
        if chip_x + label_width > x + pw - CARD_INSET {
            break; // out of room; never wrap chips onto the border
        }
        buffer.draw_text(chip_x, row, &format!(" {tech} "), chip_fg, chip_bg, Attr::NONE);
        chip_x += label_width + 1;
    }
    row += 1;

    if let Some(link) = &project.link {
        buffer.draw_text(ix, row, &format!("\u{2197} {link}"), accent, surface, Attr::NONE);
    }
}

// =============================================================================
// Tests
// =============================================================================

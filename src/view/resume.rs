//! Resume panel: an embedding frame around an opaque document.
//!
//! The document itself is never read - the frame shows where it lives, or
//! the placeholder copy when none is configured. A missing or unreadable
//! file is the viewer's problem, matching the browser-default posture of
//! the original.

use crate::content::Portfolio;
use crate::render::FrameBuffer;
use crate::types::Attr;

use super::text::{display_width, wrap_text};
use super::{ViewContext, centered_x, panel_margin, panel_width};

/// The embedding frame is a fixed-size viewport, like the original's
/// full-page PDF frame cut down to terminal proportions.
pub const FRAME_ROWS: u16 = 12;

/// Panel rows (frame only).
pub fn height(_portfolio: &Portfolio, _width: u16) -> u16 {
    FRAME_ROWS
}

/// Draw the panel starting at `y`. Returns rows used.
pub fn draw(buffer: &mut FrameBuffer, y: u16, ctx: &ViewContext) -> u16 {
    let theme = &ctx.theme;
    let pw = panel_width(ctx.width);
    let x = panel_margin(ctx.width);

    buffer.draw_box(x, y, pw, FRAME_ROWS, theme.border, theme.surface);

    let inner = pw.saturating_sub(6);
    let mut lines: Vec<(String, crate::types::Rgba, Attr)> = Vec::new();

    match &ctx.portfolio.resume.path {
        Some(path) => {
            lines.push((
                "Embedded document".to_string(),
                theme.text_muted,
                Attr::NONE,
            ));
            lines.push((String::new(), theme.text, Attr::NONE));
            lines.push((path.clone(), theme.accent, Attr::UNDERLINE));
        }
        None => {
            for (i, paragraph) in ctx.portfolio.resume.placeholder.iter().enumerate() {
                if i > 0 {
                    lines.push((String::new(), theme.text, Attr::NONE));
                }
                let style = if i == 0 {
                    (theme.text_bright, Attr::BOLD)
                } else {
                    (theme.text_muted, Attr::NONE)
                };
                for line in wrap_text(paragraph, inner) {
                    lines.push((line, style.0, style.1));
                }
            }
        }
    }

    // Center the block vertically inside the frame
    let content_rows = lines.len() as u16;
    let mut row = y + (FRAME_ROWS.saturating_sub(content_rows)) / 2;
    for (line, fg, attrs) in lines {
        let line_x = x + centered_x(pw, display_width(&line));
        buffer.draw_text(line_x, row, &line, fg, theme.surface, attrs);
        row += 1;
    }

    FRAME_ROWS
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

    fn ctx(portfolio: &Portfolio) -> ViewContext<'_> {
        ViewContext {
            portfolio,
            theme: palette::dark(),
            layout: LayoutMode::Tabs,
            active: SectionId::Resume,
            marker: Marker::default(),
            scroll_y: 0,
            width: 90,
            height: 40,
            reveal: RevealSnapshot {
                phase: HeroPhase::Idle,
                name_shown: 0,
                bio_shown: 0,
                cursor_visible: false,
                stagger_ms: 0,
            },
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
    fn test_placeholder_when_no_document() {
        let portfolio = Portfolio::builtin();
        let c = ctx(&portfolio);
        let mut buffer = FrameBuffer::new(c.width, c.height);
        draw(&mut buffer, 0, &c);

        assert!(buffer_text(&buffer).contains("Resume coming soon!"));
    }

    #[test]
    fn test_configured_path_is_shown() {
        let mut portfolio = Portfolio::builtin();
        portfolio.resume.path = Some("docs/resume.pdf".to_string());
        let c = ctx(&portfolio);
        let mut buffer = FrameBuffer::new(c.width, c.height);
        draw(&mut buffer, 0, &c);

        let text = buffer_text(&buffer);
        assert!(text.contains("docs/resume.pdf"));
        assert!(!text.contains("Resume coming soon!"));
    }

    #[test]
    fn test_frame_is_fixed_height() {
        let portfolio = Portfolio::builtin();
        let c = ctx(&portfolio);
        let mut buffer = FrameBuffer::new(c.width, c.height);
        assert_eq!(draw(&mut buffer, 0, &c), FRAME_ROWS);
        assert_eq!(height(&portfolio, c.width), FRAME_ROWS);
    }
}

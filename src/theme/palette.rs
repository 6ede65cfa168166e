//! The two fixed palettes.
//!
//! The dark palette follows the original site's navy scheme; the light
//! palette mirrors it on a near-white ground. Both are plain RGB values -
//! no runtime color math beyond the entrance fades.

use super::Theme;
use crate::types::Rgba;

/// Dark variant (initial).
pub fn dark() -> Theme {
    Theme {
        background: Rgba::from_rgb_int(0x0a192f),
        surface: Rgba::from_rgb_int(0x112240),
        text: Rgba::from_rgb_int(0xccd6f6),
        text_muted: Rgba::from_rgb_int(0x8892b0),
        text_bright: Rgba::from_rgb_int(0xe6f1ff),
        primary: Rgba::from_rgb_int(0x60a5fa),
        accent: Rgba::from_rgb_int(0x93c5fd),
        border: Rgba::from_rgb_int(0x233554),
        chip: Rgba::from_rgb_int(0x1e3a5f),
    }
}

/// Light variant.
pub fn light() -> Theme {
    Theme {
        background: Rgba::from_rgb_int(0xf8fafc),
        surface: Rgba::from_rgb_int(0xe9eef5),
        text: Rgba::from_rgb_int(0x1e293b),
        text_muted: Rgba::from_rgb_int(0x64748b),
        text_bright: Rgba::from_rgb_int(0x0f172a),
        primary: Rgba::from_rgb_int(0x2563eb),
        accent: Rgba::from_rgb_int(0x3b82f6),
        border: Rgba::from_rgb_int(0xcbd5e1),
        chip: Rgba::from_rgb_int(0xbfdbfe),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ_everywhere_it_matters() {
        let d = dark();
        let l = light();
        assert_ne!(d.background, l.background);
        assert_ne!(d.text, l.text);
        assert_ne!(d.primary, l.primary);
    }
}

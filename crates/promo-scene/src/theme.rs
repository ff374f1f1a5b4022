//! Color tokens and font stacks shared by every scene.

use promo_core::Color;

use crate::markup::StyleSet;

pub const BG0: Color = Color::from_rgb_u32(0x0a0e14);
pub const BG1: Color = Color::from_rgb_u32(0x0d1117);
pub const BG2: Color = Color::from_rgb_u32(0x161b22);
pub const BG3: Color = Color::from_rgb_u32(0x1c2333);
pub const BORDER: Color = Color::from_rgb_u32(0x30363d);
pub const T1: Color = Color::from_rgb_u32(0xe6edf3);
pub const T2: Color = Color::from_rgb_u32(0x8b949e);
pub const T3: Color = Color::from_rgb_u32(0x484f58);
pub const BLUE: Color = Color::from_rgb_u32(0x58a6ff);
pub const GREEN: Color = Color::from_rgb_u32(0x3fb950);
pub const ORANGE: Color = Color::from_rgb_u32(0xd29922);
pub const PURPLE: Color = Color::from_rgb_u32(0xbc8cff);
pub const RED: Color = Color::from_rgb_u32(0xf85149);
pub const TEAL: Color = Color::from_rgb_u32(0x39d2c0);

/// Faint separator between rows.
pub const ROW_RULE: Color = Color::rgba(48.0 / 255.0, 54.0 / 255.0, 61.0 / 255.0, 0.3);

pub const FONT_SANS: &str = "Inter, sans-serif";
pub const FONT_MONO: &str = "monospace";

pub const DASHBOARD_FONT: StyleSet = &[(
    "font-family",
    "'JetBrains Mono', 'Fira Code', Consolas, monospace",
)];
pub const MOBILE_FONT: StyleSet = &[(
    "font-family",
    "-apple-system, BlinkMacSystemFont, 'SF Pro Text', 'Helvetica Neue', sans-serif",
)];

/// Clipped text filled with the blue → purple brand gradient.
pub fn brand_gradient_text(angle_deg: u32) -> [(&'static str, String); 4] {
    [
        (
            "background",
            format!(
                "linear-gradient({}deg, {}, {})",
                angle_deg,
                BLUE.to_css(),
                PURPLE.to_css()
            ),
        ),
        ("-webkit-background-clip", "text".to_string()),
        ("background-clip", "text".to_string()),
        ("-webkit-text-fill-color", "transparent".to_string()),
    ]
}

/// Blur filter applied to anything that would show real project data.
pub fn redacted(radius_px: u32) -> [(&'static str, String); 2] {
    [
        ("filter", format!("blur({}px)", radius_px)),
        ("user-select", "none".to_string()),
    ]
}

use promo_core::anim::{interpolate, InterpolateOptions, Spring, SpringConfig};

use crate::composition::{Component, VideoConfig};
use crate::markup::{fmt_num, Element};
use crate::mock::mock_mobile;
use crate::theme;

const RISE: Spring = Spring::unit(SpringConfig::new(80.0, 12.0));

const BULLETS: [&str; 3] = [
    "Auto-detect mobile devices",
    "Bottom tab navigation",
    "Touch-friendly interface",
];

/// Copy on the left, a phone frame rising in on the right.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileScene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MobileStyle {
    pub opacity: f64,
    pub phone_y: f64,
}

impl MobileScene {
    pub fn styles(frame: u32, fps: f64) -> MobileStyle {
        let s = RISE.at(frame as f64, fps);
        MobileStyle {
            opacity: s,
            phone_y: interpolate(s, &[0.0, 1.0], &[120.0, 0.0], InterpolateOptions::default()),
        }
    }
}

impl Component for MobileScene {
    fn render(&self, frame: u32, config: &VideoConfig) -> Element {
        let s = Self::styles(frame, config.fps);

        let mut bullets = Element::div()
            .px("font-size", 22.0)
            .style("color", theme::T2.to_css())
            .style("font-family", theme::FONT_SANS)
            .num("line-height", 1.6);
        for line in BULLETS {
            bullets = bullets.child(Element::div().text(line));
        }

        let copy = Element::div()
            .style("position", "absolute")
            .px("left", 180.0)
            .style("top", "50%")
            .style("transform", "translateY(-50%)")
            .num("opacity", s.opacity)
            .child(
                Element::div()
                    .px("font-size", 44.0)
                    .style("font-weight", "700")
                    .style("color", theme::T1.to_css())
                    .style("font-family", theme::FONT_SANS)
                    .px("margin-bottom", 12.0)
                    .text("Mobile Ready"),
            )
            .child(bullets);

        let screen = Element::div()
            .style("transform", "scale(0.82)")
            .style("transform-origin", "top left")
            .px("width", 390.0)
            .px("height", 793.0)
            .child(mock_mobile());

        let phone = Element::div()
            .style("position", "absolute")
            .px("right", 240.0)
            .style("transform", format!("translateY({}px)", fmt_num(s.phone_y)))
            .num("opacity", s.opacity)
            .child(
                Element::div()
                    .px("width", 320.0)
                    .px("height", 650.0)
                    .px("border-radius", 36.0)
                    .style("border", format!("3px solid {}", theme::T3.to_css()))
                    .style("overflow", "hidden")
                    .style(
                        "box-shadow",
                        format!(
                            "0 20px 60px rgba(0, 0, 0, 0.5), 0 0 40px {}",
                            theme::BLUE.with_alpha(0.08).to_css()
                        ),
                    )
                    .style("background", theme::BG0.to_css())
                    .child(screen),
            );

        super::centered_backdrop().child(copy).child(phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_rises_into_place() {
        let start = MobileScene::styles(0, 30.0);
        assert_eq!(start.phone_y, 120.0);
        assert_eq!(start.opacity, 0.0);
        let end = MobileScene::styles(59, 30.0);
        assert!(end.phone_y.abs() < 2.5, "phone_y at 59 was {}", end.phone_y);
    }

    #[test]
    fn test_render_embeds_mobile_mock() {
        let cfg = VideoConfig {
            fps: 30.0,
            width: 1920,
            height: 1080,
            duration_in_frames: 540,
        };
        let text = MobileScene.render(30, &cfg).text_content();
        assert!(text.contains("Mobile Ready"));
        assert!(text.contains("Bottom tab navigation"));
        assert!(text.contains("Live Sessions"));
    }
}

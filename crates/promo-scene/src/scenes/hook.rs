use promo_core::anim::{interpolate, InterpolateOptions, Spring, SpringConfig};

use crate::composition::{Component, VideoConfig};
use crate::markup::{fmt_num, Element};
use crate::theme;

const OPACITY_FRAMES: [f64; 4] = [0.0, 20.0, 45.0, 60.0];
const OPACITY_VALUES: [f64; 4] = [0.0, 1.0, 1.0, 0.0];
const SCALE: Spring = Spring::unit(SpringConfig::new(80.0, 12.0)).range(0.8, 1.0);

/// Opening line: fades in, holds, fades out while springing up to full size.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookScene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookStyle {
    pub opacity: f64,
    pub scale: f64,
}

impl HookScene {
    pub fn styles(frame: u32, fps: f64) -> HookStyle {
        let f = frame as f64;
        HookStyle {
            opacity: interpolate(
                f,
                &OPACITY_FRAMES,
                &OPACITY_VALUES,
                InterpolateOptions::CLAMP_RIGHT,
            ),
            scale: SCALE.at(f, fps),
        }
    }
}

impl Component for HookScene {
    fn render(&self, frame: u32, config: &VideoConfig) -> Element {
        let s = Self::styles(frame, config.fps);
        let headline = |el: Element| {
            el.px("font-size", 52.0)
                .style("font-weight", "700")
                .style("font-family", theme::FONT_SANS)
        };

        super::centered_backdrop().num("opacity", s.opacity).child(
            Element::div()
                .style("transform", format!("scale({})", fmt_num(s.scale)))
                .style("text-align", "center")
                .child(
                    headline(Element::div())
                        .style("color", theme::T1.to_css())
                        .text("When you run multiple"),
                )
                .child(
                    headline(Element::div())
                        .decls(theme::brand_gradient_text(135))
                        .px("margin-top", 8.0)
                        .text("Claude Code sessions..."),
                ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_envelope() {
        assert_eq!(HookScene::styles(0, 30.0).opacity, 0.0);
        assert!((HookScene::styles(10, 30.0).opacity - 0.5).abs() < 1e-9);
        assert_eq!(HookScene::styles(30, 30.0).opacity, 1.0);
        assert_eq!(HookScene::styles(60, 30.0).opacity, 0.0);
    }

    #[test]
    fn test_opacity_clamps_past_the_last_keyframe() {
        for frame in [61, 90, 500] {
            assert_eq!(HookScene::styles(frame, 30.0).opacity, 0.0);
        }
    }

    #[test]
    fn test_scale_springs_from_point_eight() {
        assert_eq!(HookScene::styles(0, 30.0).scale, 0.8);
        let late = HookScene::styles(59, 30.0).scale;
        assert!((late - 1.0).abs() < 0.02, "scale at 59 was {}", late);
    }

    #[test]
    fn test_render_contains_copy() {
        let cfg = VideoConfig {
            fps: 30.0,
            width: 1920,
            height: 1080,
            duration_in_frames: 540,
        };
        let el = HookScene.render(30, &cfg);
        assert_eq!(el.style_value("opacity"), Some("1"));
        assert_eq!(
            el.text_content(),
            "When you run multipleClaude Code sessions..."
        );
    }
}

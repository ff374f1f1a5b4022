use promo_core::anim::{interpolate, InterpolateOptions, Spring, SpringConfig};

use crate::composition::{Component, VideoConfig};
use crate::markup::{fmt_num, Element};
use crate::theme;

const TITLE: Spring = Spring::unit(SpringConfig::new(80.0, 12.0));
const BADGE: Spring = Spring::unit(SpringConfig::new(120.0, 10.0)).delayed(15.0);

pub const REPOSITORY: &str = "github.com/nieao/claude-monitor";

/// Closing card: product name, repository badge and tagline.
#[derive(Debug, Clone, Copy, Default)]
pub struct CtaScene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CtaStyle {
    pub opacity: f64,
    pub scale: f64,
    pub badge_opacity: f64,
    pub badge_y: f64,
}

impl CtaScene {
    pub fn styles(frame: u32, fps: f64) -> CtaStyle {
        let f = frame as f64;
        let o = InterpolateOptions::default();
        let s = TITLE.at(f, fps);
        let badge = BADGE.at(f, fps);
        CtaStyle {
            opacity: s,
            scale: interpolate(s, &[0.0, 1.0], &[0.8, 1.0], o),
            badge_opacity: badge,
            badge_y: interpolate(badge, &[0.0, 1.0], &[20.0, 0.0], o),
        }
    }
}

impl Component for CtaScene {
    fn render(&self, frame: u32, config: &VideoConfig) -> Element {
        let s = Self::styles(frame, config.fps);

        let title = Element::div()
            .px("font-size", 64.0)
            .style("font-weight", "800")
            .style("font-family", theme::FONT_SANS)
            .decls(theme::brand_gradient_text(135))
            .px("margin-bottom", 24.0)
            .text("Claude Code Monitor");

        let badge = Element::div()
            .style("display", "inline-flex")
            .style("align-items", "center")
            .px("gap", 12.0)
            .style("background", theme::BG2.to_css())
            .style("border", format!("1px solid {}", theme::T3.to_css()))
            .px("border-radius", 12.0)
            .style("padding", "14px 32px")
            .num("opacity", s.badge_opacity)
            .style("transform", format!("translateY({}px)", fmt_num(s.badge_y)))
            .child(
                Element::span()
                    .px("font-size", 24.0)
                    .style("color", theme::T1.to_css())
                    .style("font-family", theme::FONT_MONO)
                    .text(REPOSITORY),
            );

        let tagline = Element::div()
            .px("margin-top", 28.0)
            .px("font-size", 22.0)
            .style("color", theme::T2.to_css())
            .style("font-family", theme::FONT_SANS)
            .text("Open Source \u{00b7} Free \u{00b7} Real-time");

        super::centered_backdrop().child(
            Element::div()
                .style("text-align", "center")
                .num("opacity", s.opacity)
                .style("transform", format!("scale({})", fmt_num(s.scale)))
                .child(title)
                .child(badge)
                .child(tagline),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_lags_title() {
        let s = CtaScene::styles(10, 30.0);
        assert!(s.opacity > 0.0);
        assert_eq!(s.badge_opacity, 0.0);
        assert_eq!(s.badge_y, 20.0);

        let later = CtaScene::styles(40, 30.0);
        assert!(later.badge_opacity > 0.5);
    }

    #[test]
    fn test_scale_range() {
        assert_eq!(CtaScene::styles(0, 30.0).scale, 0.8);
        assert!((CtaScene::styles(59, 30.0).scale - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_render_has_repository_badge() {
        let cfg = VideoConfig {
            fps: 30.0,
            width: 1920,
            height: 1080,
            duration_in_frames: 540,
        };
        assert!(CtaScene.render(59, &cfg).text_content().contains(REPOSITORY));
    }
}

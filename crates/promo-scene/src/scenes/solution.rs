use promo_core::anim::{interpolate, InterpolateOptions, Spring, SpringConfig};

use crate::composition::{Component, VideoConfig};
use crate::markup::{fmt_num, pct, Element};
use crate::theme;

const REVEAL: Spring = Spring::unit(SpringConfig::new(80.0, 12.0));

/// Product name reveal with an underline that grows with the spring.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolutionScene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionStyle {
    pub opacity: f64,
    pub scale: f64,
    /// Underline width in percent of the title block.
    pub line_width: f64,
}

impl SolutionScene {
    pub fn styles(frame: u32, fps: f64) -> SolutionStyle {
        let s = REVEAL.at(frame as f64, fps);
        let o = InterpolateOptions::default();
        SolutionStyle {
            opacity: s,
            scale: interpolate(s, &[0.0, 1.0], &[0.7, 1.0], o),
            line_width: interpolate(s, &[0.0, 1.0], &[0.0, 100.0], o),
        }
    }
}

impl Component for SolutionScene {
    fn render(&self, frame: u32, config: &VideoConfig) -> Element {
        let s = Self::styles(frame, config.fps);
        let title = Element::div()
            .px("font-size", 72.0)
            .style("font-weight", "800")
            .style("font-family", theme::FONT_SANS)
            .decls(theme::brand_gradient_text(135))
            .text("Claude Code Monitor");
        let underline = Element::div()
            .style("width", pct(s.line_width))
            .px("height", 3.0)
            .style(
                "background",
                format!(
                    "linear-gradient(90deg, {}, {})",
                    theme::BLUE.to_css(),
                    theme::PURPLE.to_css()
                ),
            )
            .style("margin", "16px auto 20px")
            .px("border-radius", 2.0);
        let tagline = Element::div()
            .px("font-size", 28.0)
            .style("color", theme::T2.to_css())
            .style("font-family", theme::FONT_SANS)
            .text("Real-time monitoring dashboard");

        super::centered_backdrop().child(
            Element::div()
                .style("text-align", "center")
                .num("opacity", s.opacity)
                .style("transform", format!("scale({})", fmt_num(s.scale)))
                .child(title)
                .child(underline)
                .child(tagline),
        )
    }
}

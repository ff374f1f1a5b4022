use promo_core::anim::{interpolate, InterpolateOptions, Spring, SpringConfig};
use promo_core::Color;

use crate::composition::{Component, VideoConfig};
use crate::markup::{fmt_num, Element};
use crate::mock::mock_dashboard;
use crate::theme;

const ZOOM: Spring = Spring::unit(SpringConfig::new(60.0, 14.0));
const CALLOUT: SpringConfig = SpringConfig::new(120.0, 12.0);

/// A feature label pinned over the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Callout {
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
    pub delay: f64,
    pub color: Color,
}

pub const CALLOUTS: [Callout; 4] = [
    Callout {
        text: "Live Sessions",
        x: 160.0,
        y: 230.0,
        delay: 20.0,
        color: theme::GREEN,
    },
    Callout {
        text: "Token Analytics",
        x: 1400.0,
        y: 750.0,
        delay: 40.0,
        color: theme::PURPLE,
    },
    Callout {
        text: "Conversation Preview",
        x: 200.0,
        y: 600.0,
        delay: 60.0,
        color: theme::ORANGE,
    },
    Callout {
        text: "Agent Topology",
        x: 800.0,
        y: 160.0,
        delay: 80.0,
        color: theme::BLUE,
    },
];

/// The desktop dashboard zooms into view, then feature callouts pop in.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardScene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalloutStyle {
    pub opacity: f64,
    pub scale: f64,
    pub translate_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStyle {
    pub opacity: f64,
    pub scale: f64,
    pub translate_y: f64,
    pub callouts: [CalloutStyle; 4],
}

impl DashboardScene {
    pub fn styles(frame: u32, fps: f64) -> DashboardStyle {
        let f = frame as f64;
        let o = InterpolateOptions::default();
        let s = ZOOM.at(f, fps);
        let callouts = CALLOUTS.map(|c| {
            let cs = Spring::unit(CALLOUT).delayed(c.delay).at(f, fps);
            CalloutStyle {
                opacity: cs,
                scale: cs,
                translate_y: interpolate(cs, &[0.0, 1.0], &[10.0, 0.0], o),
            }
        });
        DashboardStyle {
            opacity: s,
            scale: interpolate(s, &[0.0, 1.0], &[0.9, 0.72], o),
            translate_y: interpolate(s, &[0.0, 1.0], &[80.0, 20.0], o),
            callouts,
        }
    }
}

fn callout(c: &Callout, style: &CalloutStyle) -> Element {
    let color = c.color.to_css();
    Element::div()
        .style("position", "absolute")
        .px("left", c.x)
        .px("top", c.y)
        .num("opacity", style.opacity)
        .style(
            "transform",
            format!(
                "scale({}) translateY({}px)",
                fmt_num(style.scale),
                fmt_num(style.translate_y)
            ),
        )
        .child(
            Element::div()
                .style("background", theme::BG2.to_css())
                .style("border", format!("2px solid {}", color))
                .px("border-radius", 10.0)
                .style("padding", "8px 18px")
                .px("font-size", 18.0)
                .style("font-weight", "600")
                .style("color", color.clone())
                .style("font-family", theme::FONT_SANS)
                .style(
                    "box-shadow",
                    format!("0 4px 20px {}", c.color.with_alpha(0.2).to_css()),
                )
                .style("white-space", "nowrap")
                .text(c.text),
        )
}

impl Component for DashboardScene {
    fn render(&self, frame: u32, config: &VideoConfig) -> Element {
        let s = Self::styles(frame, config.fps);
        let window = Element::div()
            .style(
                "transform",
                format!(
                    "scale({}) translateY({}px)",
                    fmt_num(s.scale),
                    fmt_num(s.translate_y)
                ),
            )
            .style("transform-origin", "top center")
            .num("opacity", s.opacity)
            .px("border-radius", 16.0)
            .style("overflow", "hidden")
            .style("box-shadow", "0 20px 80px rgba(0, 0, 0, 0.6)")
            .style("border", format!("1px solid {}", theme::T3.to_css()))
            .style("position", "absolute")
            .style("top", "0")
            .style("left", "0")
            .style("right", "0")
            .child(mock_dashboard());

        Element::absolute_fill()
            .style("background-color", theme::BG0.to_css())
            .child(window)
            .children(
                CALLOUTS
                    .iter()
                    .zip(s.callouts.iter())
                    .map(|(c, st)| callout(c, st)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_endpoints() {
        let start = DashboardScene::styles(0, 30.0);
        assert_eq!(start.opacity, 0.0);
        assert_eq!(start.scale, 0.9);
        assert_eq!(start.translate_y, 80.0);

        let end = DashboardScene::styles(149, 30.0);
        assert!((end.scale - 0.72).abs() < 0.005);
        assert!((end.translate_y - 20.0).abs() < 1.0);
    }

    #[test]
    fn test_callouts_wait_for_their_delay() {
        let s = DashboardScene::styles(50, 30.0);
        assert!(s.callouts[0].opacity > 0.0);
        assert!(s.callouts[1].opacity > 0.0);
        assert_eq!(s.callouts[2].opacity, 0.0);
        assert_eq!(s.callouts[3].opacity, 0.0);
        assert_eq!(s.callouts[3].translate_y, 10.0);
    }

    #[test]
    fn test_render_includes_dashboard_and_callouts() {
        let cfg = VideoConfig {
            fps: 30.0,
            width: 1920,
            height: 1080,
            duration_in_frames: 540,
        };
        let text = DashboardScene.render(140, &cfg).text_content();
        assert!(text.contains("Agent Topology & Flow"));
        for c in CALLOUTS {
            assert!(text.contains(c.text));
        }
    }
}

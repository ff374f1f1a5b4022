use promo_core::anim::{interpolate, InterpolateOptions, Spring, SpringConfig};

use crate::composition::{Component, VideoConfig};
use crate::markup::{fmt_num, Element};
use crate::theme;

/// One problem statement with its icon glyph and entrance delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PainPoint {
    pub icon: &'static str,
    pub text: &'static str,
    pub delay: f64,
}

pub const PAIN_POINTS: [PainPoint; 3] = [
    PainPoint {
        icon: "?",
        text: "No visibility into active sessions",
        delay: 0.0,
    },
    PainPoint {
        icon: "!",
        text: "Can't track token consumption",
        delay: 20.0,
    },
    PainPoint {
        icon: "~",
        text: "Team agent status is invisible",
        delay: 40.0,
    },
];

const ENTRANCE: SpringConfig = SpringConfig::new(100.0, 14.0);

/// Three problem statements slide in one after another, then the scene fades out.
#[derive(Debug, Clone, Copy, Default)]
pub struct PainPointsScene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PainPointStyle {
    pub opacity: f64,
    pub translate_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PainPointsStyle {
    pub opacity: f64,
    pub points: [PainPointStyle; 3],
}

impl PainPointsScene {
    pub fn styles(frame: u32, fps: f64) -> PainPointsStyle {
        let f = frame as f64;
        let points = PAIN_POINTS.map(|p| {
            let s = Spring::unit(ENTRANCE).delayed(p.delay).at(f, fps);
            PainPointStyle {
                opacity: s,
                translate_x: interpolate(s, &[0.0, 1.0], &[60.0, 0.0], InterpolateOptions::default()),
            }
        });
        PainPointsStyle {
            opacity: interpolate(f, &[120.0, 150.0], &[1.0, 0.0], InterpolateOptions::CLAMP),
            points,
        }
    }
}

fn point_row(point: &PainPoint, style: &PainPointStyle) -> Element {
    let icon = Element::div()
        .px("width", 56.0)
        .px("height", 56.0)
        .px("border-radius", 12.0)
        .style("background", theme::RED.with_alpha(0.15).to_css())
        .style("border", format!("2px solid {}", theme::RED.to_css()))
        .style("display", "flex")
        .style("align-items", "center")
        .style("justify-content", "center")
        .px("font-size", 28.0)
        .style("font-weight", "700")
        .style("color", theme::RED.to_css())
        .style("flex-shrink", "0")
        .style("font-family", theme::FONT_MONO)
        .text(point.icon);

    let label = Element::div()
        .px("font-size", 32.0)
        .style("color", theme::T1.to_css())
        .style("font-weight", "500")
        .style("font-family", theme::FONT_SANS)
        .text(point.text);

    Element::div()
        .style("display", "flex")
        .style("align-items", "center")
        .px("gap", 24.0)
        .num("opacity", style.opacity)
        .style("transform", format!("translateX({}px)", fmt_num(style.translate_x)))
        .child(icon)
        .child(label)
}

impl Component for PainPointsScene {
    fn render(&self, frame: u32, config: &VideoConfig) -> Element {
        let s = Self::styles(frame, config.fps);
        let list = Element::div()
            .style("display", "flex")
            .style("flex-direction", "column")
            .px("gap", 32.0)
            .px("max-width", 800.0)
            .children(
                PAIN_POINTS
                    .iter()
                    .zip(s.points.iter())
                    .map(|(p, st)| point_row(p, st)),
            );
        super::centered_backdrop().num("opacity", s.opacity).child(list)
    }
}

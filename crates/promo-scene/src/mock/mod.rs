//! Static replicas of the monitor UI used as props in the video.
//!
//! Anything resembling real project data (names, paths, prompts) is rendered
//! blurred.

mod dashboard;
mod mobile;

pub use dashboard::{mock_dashboard, DashboardData, DASHBOARD};
pub use mobile::{mock_mobile, MobileData, MOBILE};

use promo_core::Color;

use crate::markup::Element;
use crate::theme;

/// Session / project liveness, which drives dot and border colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Recent,
    Idle,
}

impl Status {
    pub fn color(&self) -> Color {
        match self {
            Status::Active => theme::GREEN,
            Status::Recent => theme::ORANGE,
            Status::Idle => theme::T3,
        }
    }
}

/// Round status indicator, optionally glowing.
fn dot(color: Color, glow: Option<u32>) -> Element {
    let el = Element::div()
        .px("width", 8.0)
        .px("height", 8.0)
        .style("border-radius", "50%")
        .style("background", color.to_css())
        .style("flex-shrink", "0");
    match glow {
        Some(radius) => el.style("box-shadow", format!("0 0 {}px {}", radius, color.to_css())),
        None => el,
    }
}

/// Small rounded pill label.
fn badge(text: impl Into<String>, bg: Color, color: Color) -> Element {
    Element::span()
        .px("font-size", 10.0)
        .style("padding", "2px 8px")
        .px("border-radius", 8.0)
        .style("background", bg.to_css())
        .style("color", color.to_css())
        .style("font-weight", "500")
        .text(text)
}

/// Single-line text that ellipsizes when it overflows.
fn ellipsis(el: Element) -> Element {
    el.style("overflow", "hidden")
        .style("text-overflow", "ellipsis")
        .style("white-space", "nowrap")
}

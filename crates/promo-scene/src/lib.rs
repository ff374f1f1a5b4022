//! # promo-scene
//!
//! The promo video expressed as pure functions of the frame index: the
//! six-scene [`Timeline`], the static dashboard and phone mocks, and the
//! [`CompositionRegistry`] the bundler serializes.

pub mod composition;
pub mod markup;
pub mod mock;
pub mod scenes;
pub mod theme;
pub mod timeline;

pub use composition::{
    Component, Composition, CompositionDescriptor, CompositionKind, CompositionRegistry,
    VideoConfig,
};
pub use markup::{Element, Node};
pub use timeline::{Sequence, Timeline, TimelineBuilder};

use promo_core::{PromoError, PromoResult};

use crate::scenes::{CtaScene, DashboardScene, HookScene, MobileScene, PainPointsScene, SolutionScene};

pub const PROMO_VIDEO: &str = "PromoVideo";
pub const DASHBOARD_STILL: &str = "DashboardStill";
pub const MOBILE_STILL: &str = "MobileStill";

pub const PROMO_FPS: f64 = 30.0;
pub const PROMO_WIDTH: u32 = 1920;
pub const PROMO_HEIGHT: u32 = 1080;
pub const PROMO_DURATION_IN_FRAMES: u32 = 540;

/// The six scenes back to back, 540 frames in total.
pub fn promo_timeline() -> Timeline {
    Timeline::builder(theme::BG0)
        .then("Hook", 60, HookScene)
        .then("PainPoints", 150, PainPointsScene)
        .then("Solution", 60, SolutionScene)
        .then("Dashboard", 150, DashboardScene)
        .then("Mobile", 60, MobileScene)
        .then("CTA", 60, CtaScene)
        .build()
}

/// Every composition the promo project exposes.
pub fn promo_registry() -> PromoResult<CompositionRegistry> {
    let timeline = promo_timeline();
    timeline.validate()?;
    if timeline.duration_in_frames() != PROMO_DURATION_IN_FRAMES {
        return Err(PromoError::Timeline(format!(
            "scenes cover {} frames but {} declares {}",
            timeline.duration_in_frames(),
            PROMO_VIDEO,
            PROMO_DURATION_IN_FRAMES
        )));
    }

    let mut registry = CompositionRegistry::new();
    registry.register(Composition::video(
        PROMO_VIDEO,
        PROMO_DURATION_IN_FRAMES,
        PROMO_FPS,
        PROMO_WIDTH,
        PROMO_HEIGHT,
        timeline,
    ))?;
    registry.register(Composition::still(
        DASHBOARD_STILL,
        1920,
        1080,
        |_: u32, _: &VideoConfig| mock::mock_dashboard(),
    ))?;
    registry.register(Composition::still(
        MOBILE_STILL,
        390,
        844,
        |_: u32, _: &VideoConfig| mock::mock_mobile(),
    ))?;

    tracing::debug!(compositions = ?registry.ids(), "registered compositions");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_windows() {
        let tl = promo_timeline();
        let windows: Vec<(&str, u32, u32)> = tl
            .sequences()
            .iter()
            .map(|s| (s.name.as_str(), s.from, s.duration_in_frames))
            .collect();
        assert_eq!(
            windows,
            vec![
                ("Hook", 0, 60),
                ("PainPoints", 60, 150),
                ("Solution", 210, 60),
                ("Dashboard", 270, 150),
                ("Mobile", 420, 60),
                ("CTA", 480, 60),
            ]
        );
        tl.validate().unwrap();
    }

    #[test]
    fn test_timeline_covers_whole_video() {
        let tl = promo_timeline();
        assert_eq!(tl.duration_in_frames(), PROMO_DURATION_IN_FRAMES);
        for frame in 0..PROMO_DURATION_IN_FRAMES {
            assert!(tl.active(frame).is_some(), "frame {} uncovered", frame);
        }
        assert!(tl.active(PROMO_DURATION_IN_FRAMES).is_none());
    }

    #[test]
    fn test_scene_receives_local_frame() {
        let tl = promo_timeline();
        let (seq, local) = tl.active(275).unwrap();
        assert_eq!(seq.name, "Dashboard");
        assert_eq!(local, 5);
    }

    #[test]
    fn test_registry_descriptors() {
        let reg = promo_registry().unwrap();
        assert_eq!(reg.ids(), vec![PROMO_VIDEO, DASHBOARD_STILL, MOBILE_STILL]);

        let video = reg.select(PROMO_VIDEO).unwrap();
        assert_eq!(video.descriptor.duration_in_frames, 540);
        assert_eq!(video.descriptor.fps, 30.0);
        assert_eq!((video.descriptor.width, video.descriptor.height), (1920, 1080));
        assert!((video.descriptor.duration_seconds() - 18.0).abs() < 1e-9);

        let mobile = reg.select(MOBILE_STILL).unwrap();
        assert_eq!(mobile.descriptor.kind, CompositionKind::Still);
        assert_eq!((mobile.descriptor.width, mobile.descriptor.height), (390, 844));
    }

    #[test]
    fn test_video_frames_render_each_scene() {
        let reg = promo_registry().unwrap();
        let video = reg.select(PROMO_VIDEO).unwrap();
        assert!(video.render_frame(30).unwrap().text_content().contains("Claude Code sessions"));
        assert!(video.render_frame(230).unwrap().text_content().contains("Real-time monitoring dashboard"));
        assert!(video.render_frame(500).unwrap().text_content().contains(scenes::REPOSITORY));
        assert!(video.render_frame(540).is_err());
    }

    #[test]
    fn test_still_renders_mock() {
        let reg = promo_registry().unwrap();
        let el = reg.select(DASHBOARD_STILL).unwrap().render_frame(0).unwrap();
        assert!(el.text_content().contains("Agent Topology & Flow"));
    }
}

use serde::{Deserialize, Serialize};

use promo_core::{PromoError, PromoResult};

use crate::markup::Element;

/// Frame rate and size a component is rendered at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoConfig {
    pub fps: f64,
    pub width: u32,
    pub height: u32,
    pub duration_in_frames: u32,
}

/// Whether a composition is an animation or a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionKind {
    Video,
    Still,
}

/// Metadata of a named composition, as resolved before rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionDescriptor {
    pub id: String,
    pub kind: CompositionKind,
    pub duration_in_frames: u32,
    pub fps: f64,
    pub width: u32,
    pub height: u32,
}

impl CompositionDescriptor {
    pub fn video_config(&self) -> VideoConfig {
        VideoConfig {
            fps: self.fps,
            width: self.width,
            height: self.height,
            duration_in_frames: self.duration_in_frames,
        }
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.fps <= 0.0 {
            return 0.0;
        }
        self.duration_in_frames as f64 / self.fps
    }
}

/// Something that turns a frame index into an element tree.
pub trait Component: Send + Sync {
    fn render(&self, frame: u32, config: &VideoConfig) -> Element;
}

impl<F> Component for F
where
    F: Fn(u32, &VideoConfig) -> Element + Send + Sync,
{
    fn render(&self, frame: u32, config: &VideoConfig) -> Element {
        self(frame, config)
    }
}

/// A named, time-bounded component.
pub struct Composition {
    pub descriptor: CompositionDescriptor,
    component: Box<dyn Component>,
}

impl std::fmt::Debug for Composition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composition")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl Composition {
    pub fn video(
        id: impl Into<String>,
        duration_in_frames: u32,
        fps: f64,
        width: u32,
        height: u32,
        component: impl Component + 'static,
    ) -> Self {
        Self {
            descriptor: CompositionDescriptor {
                id: id.into(),
                kind: CompositionKind::Video,
                duration_in_frames,
                fps,
                width,
                height,
            },
            component: Box::new(component),
        }
    }

    /// A single-frame composition.
    pub fn still(
        id: impl Into<String>,
        width: u32,
        height: u32,
        component: impl Component + 'static,
    ) -> Self {
        Self {
            descriptor: CompositionDescriptor {
                id: id.into(),
                kind: CompositionKind::Still,
                duration_in_frames: 1,
                fps: 30.0,
                width,
                height,
            },
            component: Box::new(component),
        }
    }

    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    /// Render the element tree of `frame`.
    pub fn render_frame(&self, frame: u32) -> PromoResult<Element> {
        if frame >= self.descriptor.duration_in_frames {
            return Err(PromoError::Composition(format!(
                "frame {} is outside '{}' (0..{})",
                frame, self.descriptor.id, self.descriptor.duration_in_frames
            )));
        }
        Ok(self
            .component
            .render(frame, &self.descriptor.video_config()))
    }
}

/// All compositions known to a bundle.
#[derive(Debug, Default)]
pub struct CompositionRegistry {
    compositions: Vec<Composition>,
}

impl CompositionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a composition. Ids must be unique and dimensions non-zero.
    pub fn register(&mut self, composition: Composition) -> PromoResult<()> {
        let d = &composition.descriptor;
        if self.get(&d.id).is_some() {
            return Err(PromoError::Composition(format!(
                "duplicate composition id: {}",
                d.id
            )));
        }
        if d.width == 0 || d.height == 0 {
            return Err(PromoError::Composition(format!(
                "composition '{}' must have a non-zero size",
                d.id
            )));
        }
        if d.fps <= 0.0 || d.duration_in_frames == 0 {
            return Err(PromoError::Composition(format!(
                "composition '{}' must have positive fps and duration",
                d.id
            )));
        }
        self.compositions.push(composition);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Composition> {
        self.compositions.iter().find(|c| c.id() == id)
    }

    /// Like [`get`](Self::get), but an unknown id is an error listing the known ones.
    pub fn select(&self, id: &str) -> PromoResult<&Composition> {
        self.get(id)
            .ok_or_else(|| PromoError::unknown_composition(id, &self.ids()))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.compositions.iter().map(|c| c.id()).collect()
    }

    pub fn descriptors(&self) -> Vec<CompositionDescriptor> {
        self.compositions
            .iter()
            .map(|c| c.descriptor.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Composition> {
        self.compositions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(frame: u32, _: &VideoConfig) -> Element {
        Element::div().text(format!("frame {}", frame))
    }

    #[test]
    fn test_render_frame_bounds() {
        let comp = Composition::video("Clip", 10, 30.0, 64, 64, label);
        assert_eq!(comp.render_frame(9).unwrap().text_content(), "frame 9");
        assert!(comp.render_frame(10).is_err());
    }

    #[test]
    fn test_still_has_one_frame() {
        let comp = Composition::still("Card", 390, 844, label);
        assert_eq!(comp.descriptor.kind, CompositionKind::Still);
        assert_eq!(comp.descriptor.duration_in_frames, 1);
        assert!(comp.render_frame(0).is_ok());
    }

    #[test]
    fn test_registry_rejects_duplicates_and_empty_sizes() {
        let mut reg = CompositionRegistry::new();
        reg.register(Composition::video("A", 10, 30.0, 64, 64, label))
            .unwrap();
        assert!(reg
            .register(Composition::video("A", 10, 30.0, 64, 64, label))
            .is_err());
        assert!(reg
            .register(Composition::video("B", 10, 30.0, 0, 64, label))
            .is_err());
        assert_eq!(reg.ids(), vec!["A"]);
    }

    #[test]
    fn test_select_unknown_lists_ids() {
        let mut reg = CompositionRegistry::new();
        reg.register(Composition::still("Card", 10, 10, label)).unwrap();
        let err = reg.select("Missing").unwrap_err().to_string();
        assert!(err.contains("Missing"));
        assert!(err.contains("Card"));
    }

    #[test]
    fn test_duration_seconds() {
        let comp = Composition::video("A", 540, 30.0, 1920, 1080, label);
        assert!((comp.descriptor.duration_seconds() - 18.0).abs() < 1e-9);
    }
}

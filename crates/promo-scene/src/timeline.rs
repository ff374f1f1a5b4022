//! Sequences of time-boxed scenes composed into one component.

use promo_core::{Color, PromoError, PromoResult};

use crate::composition::{Component, VideoConfig};
use crate::markup::Element;

/// A scene occupying the frame window `[from, from + duration_in_frames)`.
pub struct Sequence {
    pub name: String,
    pub from: u32,
    pub duration_in_frames: u32,
    scene: Box<dyn Component>,
}

impl Sequence {
    pub fn new(
        name: impl Into<String>,
        from: u32,
        duration_in_frames: u32,
        scene: impl Component + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            from,
            duration_in_frames,
            scene: Box::new(scene),
        }
    }

    /// First frame after this sequence.
    pub fn end(&self) -> u32 {
        self.from + self.duration_in_frames
    }

    pub fn contains(&self, frame: u32) -> bool {
        frame >= self.from && frame < self.end()
    }
}

impl std::fmt::Debug for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence")
            .field("name", &self.name)
            .field("from", &self.from)
            .field("duration_in_frames", &self.duration_in_frames)
            .finish_non_exhaustive()
    }
}

/// An ordered list of sequences over a solid background.
#[derive(Debug)]
pub struct Timeline {
    pub background: Color,
    sequences: Vec<Sequence>,
}

impl Timeline {
    pub fn builder(background: Color) -> TimelineBuilder {
        TimelineBuilder {
            timeline: Timeline {
                background,
                sequences: Vec::new(),
            },
        }
    }

    /// Build from explicit windows. Call [`validate`](Self::validate) before use.
    pub fn from_sequences(background: Color, sequences: Vec<Sequence>) -> Self {
        Self {
            background,
            sequences,
        }
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Sum of all sequence durations.
    pub fn duration_in_frames(&self) -> u32 {
        self.sequences.iter().map(|s| s.duration_in_frames).sum()
    }

    /// Check that windows start at 0, are non-empty, and follow each other without gaps or overlaps.
    pub fn validate(&self) -> PromoResult<()> {
        let first = self
            .sequences
            .first()
            .ok_or_else(|| PromoError::Timeline("timeline has no sequences".into()))?;
        if first.from != 0 {
            return Err(PromoError::Timeline(format!(
                "first sequence '{}' starts at frame {}, expected 0",
                first.name, first.from
            )));
        }
        for seq in &self.sequences {
            if seq.duration_in_frames == 0 {
                return Err(PromoError::Timeline(format!(
                    "sequence '{}' is empty",
                    seq.name
                )));
            }
        }
        for pair in self.sequences.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.end() != b.from {
                let kind = if a.end() < b.from { "gap" } else { "overlap" };
                return Err(PromoError::Timeline(format!(
                    "{} between '{}' (ends at {}) and '{}' (starts at {})",
                    kind,
                    a.name,
                    a.end(),
                    b.name,
                    b.from
                )));
            }
        }
        Ok(())
    }

    /// The sequence covering `frame` and the frame index local to it.
    pub fn active(&self, frame: u32) -> Option<(&Sequence, u32)> {
        self.sequences
            .iter()
            .find(|s| s.contains(frame))
            .map(|s| (s, frame - s.from))
    }
}

impl Component for Timeline {
    fn render(&self, frame: u32, config: &VideoConfig) -> Element {
        let root = Element::absolute_fill().style("background-color", self.background.to_css());
        match self.active(frame) {
            Some((seq, local)) => root.child(seq.scene.render(local, config)),
            None => root,
        }
    }
}

/// Appends sequences back to back, so windows are contiguous by construction.
pub struct TimelineBuilder {
    timeline: Timeline,
}

impl TimelineBuilder {
    pub fn then(
        mut self,
        name: impl Into<String>,
        duration_in_frames: u32,
        scene: impl Component + 'static,
    ) -> Self {
        let from = self
            .timeline
            .sequences
            .last()
            .map(Sequence::end)
            .unwrap_or(0);
        self.timeline
            .sequences
            .push(Sequence::new(name, from, duration_in_frames, scene));
        self
    }

    pub fn build(self) -> Timeline {
        self.timeline
    }
}

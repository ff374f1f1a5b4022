//! # promo-render
//!
//! The three-step render contract (bundle, select a composition, render
//! media) behind the [`RenderPipeline`] trait, and its implementation that
//! drives a headless browser and ffmpeg.

pub mod pipeline;

pub use pipeline::{
    BrowserRenderPipeline, MediaOptions, ProgressFn, RenderPipeline, RenderResult,
};

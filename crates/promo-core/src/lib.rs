//! # promo-core
//!
//! Core types and primitives for the promo video renderer.
//! This crate contains the foundational types shared across all promo crates:
//! colors, frame buffers, interpolation and spring helpers, configuration,
//! and error types.

pub mod anim;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;

pub use config::*;

pub use anim::{interpolate, spring, Extrapolate, InterpolateOptions, SpringConfig};
pub use color::Color;
pub use error::{PromoError, PromoResult};
pub use frame::{FrameBuffer, PixelFormat};

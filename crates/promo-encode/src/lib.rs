//! # promo-encode
//!
//! Encoding module: streams captured FrameBuffers into an ffmpeg process and
//! writes single frames as PNG stills.

pub mod ffmpeg;
pub mod still;

pub use ffmpeg::{EncodeSettings, FfmpegEncoder, FfmpegSession};
pub use still::write_png;

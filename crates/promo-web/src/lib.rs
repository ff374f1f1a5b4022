//! # promo-web
//!
//! The browser side of rendering: [`Bundler`] writes every frame of every
//! composition as a static page, and a [`CaptureBackend`] turns those pages
//! into frame buffers.

pub mod backend;
pub mod bundle;
pub mod headless;
pub mod session;

pub use backend::{CaptureBackend, CaptureSessionConfig};
pub use bundle::{Bundle, BundleManifest, Bundler};
pub use headless::HeadlessShellBackend;
pub use session::CaptureSession;

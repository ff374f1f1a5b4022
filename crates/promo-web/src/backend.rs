use std::path::PathBuf;

use async_trait::async_trait;
use promo_core::frame::{FrameBuffer, PixelFormat};
use promo_core::PromoResult;

#[derive(Debug, Clone)]
pub struct CaptureSessionConfig {
    /// Browser executable that takes the screenshots.
    pub browser: PathBuf,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub no_sandbox: bool,
    pub format: PixelFormat,
}

/// Turns a page URL into a rasterized frame.
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    async fn start_session(&mut self, config: CaptureSessionConfig) -> PromoResult<()>;

    async fn capture_frame(&mut self, url: &str) -> PromoResult<FrameBuffer>;

    async fn stop_session(&mut self) -> PromoResult<()>;
}

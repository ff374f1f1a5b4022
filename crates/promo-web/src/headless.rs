use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use image::ImageFormat;
use tempfile::TempDir;
use tokio::process::Command;

use promo_core::frame::{FrameBuffer, PixelFormat};
use promo_core::{PromoError, PromoResult};

use crate::backend::{CaptureBackend, CaptureSessionConfig};

const SCREENSHOT_FILE: &str = "frame.png";

/// Screenshots pages with a Chrome headless shell binary, one process per frame.
#[derive(Default)]
pub struct HeadlessShellBackend {
    config: Option<CaptureSessionConfig>,
    scratch: Option<TempDir>,
}

impl HeadlessShellBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn session(&self) -> PromoResult<(&CaptureSessionConfig, &TempDir)> {
        match (&self.config, &self.scratch) {
            (Some(config), Some(scratch)) => Ok((config, scratch)),
            _ => Err(PromoError::Capture("capture session not started".into())),
        }
    }
}

/// Command-line arguments for a single screenshot.
pub fn screenshot_args(config: &CaptureSessionConfig, out: &std::path::Path, url: &str) -> Vec<String> {
    let mut args = vec![
        "--headless".to_string(),
        "--hide-scrollbars".to_string(),
        "--disable-gpu".to_string(),
        "--force-device-scale-factor=1".to_string(),
        format!(
            "--window-size={},{}",
            config.viewport_width, config.viewport_height
        ),
        format!("--screenshot={}", out.display()),
    ];
    if config.no_sandbox {
        args.push("--no-sandbox".to_string());
    }
    args.push(url.to_string());
    args
}

#[async_trait]
impl CaptureBackend for HeadlessShellBackend {
    async fn start_session(&mut self, config: CaptureSessionConfig) -> PromoResult<()> {
        if !config.browser.exists() {
            return Err(PromoError::Capture(format!(
                "browser executable not found: {}",
                config.browser.display()
            )));
        }
        let scratch = tempfile::Builder::new().prefix("promo-capture").tempdir()?;
        tracing::debug!(
            browser = %config.browser.display(),
            scratch = %scratch.path().display(),
            "capture session started"
        );
        self.config = Some(config);
        self.scratch = Some(scratch);
        Ok(())
    }

    async fn capture_frame(&mut self, url: &str) -> PromoResult<FrameBuffer> {
        let (config, scratch) = self.session()?;
        let out: PathBuf = scratch.path().join(SCREENSHOT_FILE);
        if out.exists() {
            std::fs::remove_file(&out)?;
        }

        let output = Command::new(&config.browser)
            .args(screenshot_args(config, &out, url))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                PromoError::Capture(format!(
                    "failed to launch {}: {}",
                    config.browser.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PromoError::Capture(format!(
                "browser exited with {} for {}: {}",
                output.status,
                url,
                stderr.trim()
            )));
        }

        let bytes = std::fs::read(&out).map_err(|e| {
            PromoError::Capture(format!("no screenshot written for {}: {}", url, e))
        })?;
        let img = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .map_err(|e| PromoError::Capture(format!("invalid screenshot for {}: {}", url, e)))?;

        if img.width() != config.viewport_width || img.height() != config.viewport_height {
            return Err(PromoError::Capture(format!(
                "screenshot is {}x{}, expected {}x{}",
                img.width(),
                img.height(),
                config.viewport_width,
                config.viewport_height
            )));
        }

        let fb = match config.format {
            PixelFormat::Rgba8 => {
                let rgba = img.to_rgba8();
                FrameBuffer::from_raw(rgba.width(), rgba.height(), PixelFormat::Rgba8, rgba.into_raw())?
            }
            PixelFormat::Rgb8 => {
                let rgb = img.to_rgb8();
                FrameBuffer::from_raw(rgb.width(), rgb.height(), PixelFormat::Rgb8, rgb.into_raw())?
            }
        };
        Ok(fb)
    }

    async fn stop_session(&mut self) -> PromoResult<()> {
        self.config = None;
        if let Some(scratch) = self.scratch.take() {
            scratch.close()?;
        }
        Ok(())
    }
}

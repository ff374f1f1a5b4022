use promo_core::frame::FrameBuffer;
use promo_core::PromoResult;

use crate::backend::{CaptureBackend, CaptureSessionConfig};

/// Starts a backend lazily and stops it when done or dropped.
pub struct CaptureSession {
    config: CaptureSessionConfig,
    backend: Box<dyn CaptureBackend>,
    is_active: bool,
}

impl CaptureSession {
    pub fn new(config: CaptureSessionConfig, backend: Box<dyn CaptureBackend>) -> Self {
        Self {
            config,
            backend,
            is_active: false,
        }
    }

    pub fn config(&self) -> &CaptureSessionConfig {
        &self.config
    }

    pub async fn start(&mut self) -> PromoResult<()> {
        if !self.is_active {
            self.backend.start_session(self.config.clone()).await?;
            self.is_active = true;
        }
        Ok(())
    }

    pub async fn capture_frame(&mut self, url: &str) -> PromoResult<FrameBuffer> {
        if !self.is_active {
            self.start().await?;
        }
        self.backend.capture_frame(url).await
    }

    pub async fn stop(&mut self) -> PromoResult<()> {
        if self.is_active {
            self.backend.stop_session().await?;
            self.is_active = false;
        }
        Ok(())
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        if self.is_active {
            // Without a multi-threaded runtime the backend's own Drop cleans up.
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                if handle.runtime_flavor() == tokio::runtime::RuntimeFlavor::MultiThread {
                    tokio::task::block_in_place(|| {
                        handle.block_on(async {
                            let _ = self.backend.stop_session().await;
                        })
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use promo_core::frame::PixelFormat;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recording {
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl CaptureBackend for Recording {
        async fn start_session(&mut self, config: CaptureSessionConfig) -> PromoResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("start {}x{}", config.viewport_width, config.viewport_height));
            Ok(())
        }

        async fn capture_frame(&mut self, url: &str) -> PromoResult<FrameBuffer> {
            self.calls.lock().unwrap().push(format!("capture {}", url));
            Ok(FrameBuffer::new(2, 2, PixelFormat::Rgba8))
        }

        async fn stop_session(&mut self) -> PromoResult<()> {
            self.calls.lock().unwrap().push("stop".into());
            Ok(())
        }
    }

    fn config() -> CaptureSessionConfig {
        CaptureSessionConfig {
            browser: "chrome-headless-shell".into(),
            viewport_width: 2,
            viewport_height: 2,
            no_sandbox: false,
            format: PixelFormat::Rgba8,
        }
    }

    #[tokio::test]
    async fn test_session_starts_lazily_once() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let backend = Recording {
            calls: calls.clone(),
        };
        let mut session = CaptureSession::new(config(), Box::new(backend));
        session.capture_frame("file:///a").await.unwrap();
        session.capture_frame("file:///b").await.unwrap();
        session.stop().await.unwrap();
        session.stop().await.unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["start 2x2", "capture file:///a", "capture file:///b", "stop"]
        );
    }
}

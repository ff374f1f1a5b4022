use std::path::{Path, PathBuf};

use async_trait::async_trait;

use promo_core::frame::PixelFormat;
use promo_core::{Codec, PromoError, PromoResult};
use promo_encode::{write_png, EncodeSettings, FfmpegEncoder};
use promo_scene::{CompositionDescriptor, CompositionKind, CompositionRegistry};
use promo_web::{Bundle, Bundler, CaptureBackend, CaptureSession, CaptureSessionConfig, HeadlessShellBackend};

/// Called after each captured frame with `(rendered, total)`.
pub type ProgressFn<'a> = &'a (dyn Fn(u32, u32) + Send + Sync);

/// Output options of [`RenderPipeline::render_media`].
#[derive(Debug, Clone, PartialEq)]
pub struct MediaOptions {
    pub codec: Codec,
    pub output: PathBuf,
    pub browser: PathBuf,
    pub crf: u8,
}

/// Result of a complete render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    pub output: PathBuf,
    /// Total number of frames.
    pub frame_count: u32,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

/// Bundle, resolve and render a composition.
///
/// Callers invoke the steps in order: [`bundle`](Self::bundle) once, then
/// [`select_composition`](Self::select_composition) against that bundle, then
/// [`render_media`](Self::render_media) or [`render_still`](Self::render_still).
#[async_trait]
pub trait RenderPipeline: Send + Sync {
    async fn bundle(&self, out_dir: &Path) -> PromoResult<Bundle>;

    async fn select_composition(
        &self,
        bundle: &Bundle,
        id: &str,
        browser: &Path,
    ) -> PromoResult<CompositionDescriptor>;

    async fn render_media(
        &self,
        composition: &CompositionDescriptor,
        bundle: &Bundle,
        options: &MediaOptions,
        on_progress: ProgressFn<'_>,
    ) -> PromoResult<RenderResult>;

    async fn render_still(
        &self,
        composition: &CompositionDescriptor,
        bundle: &Bundle,
        output: &Path,
        browser: &Path,
    ) -> PromoResult<PathBuf>;
}

/// Renders through a headless browser and ffmpeg.
pub struct BrowserRenderPipeline {
    registry: CompositionRegistry,
    encoder: FfmpegEncoder,
    no_sandbox: bool,
    new_backend: fn() -> Box<dyn CaptureBackend>,
}

fn headless_shell() -> Box<dyn CaptureBackend> {
    Box::new(HeadlessShellBackend::new())
}

impl BrowserRenderPipeline {
    pub fn new(registry: CompositionRegistry) -> Self {
        Self {
            registry,
            encoder: FfmpegEncoder::new(),
            no_sandbox: false,
            new_backend: headless_shell,
        }
    }

    /// Pass `--no-sandbox` to the browser.
    pub fn no_sandbox(mut self, no_sandbox: bool) -> Self {
        self.no_sandbox = no_sandbox;
        self
    }

    pub fn with_encoder(mut self, encoder: FfmpegEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Replace the capture backend, e.g. with an in-process one.
    pub fn with_backend(mut self, new_backend: fn() -> Box<dyn CaptureBackend>) -> Self {
        self.new_backend = new_backend;
        self
    }

    fn session(&self, composition: &CompositionDescriptor, browser: &Path) -> CaptureSession {
        CaptureSession::new(
            CaptureSessionConfig {
                browser: browser.to_path_buf(),
                viewport_width: composition.width,
                viewport_height: composition.height,
                no_sandbox: self.no_sandbox,
                format: PixelFormat::Rgba8,
            },
            (self.new_backend)(),
        )
    }
}

fn require_browser(browser: &Path) -> PromoResult<()> {
    if browser.is_file() {
        Ok(())
    } else {
        Err(PromoError::Capture(format!(
            "browser executable not found: {}",
            browser.display()
        )))
    }
}

#[async_trait]
impl RenderPipeline for BrowserRenderPipeline {
    async fn bundle(&self, out_dir: &Path) -> PromoResult<Bundle> {
        Bundler::new(out_dir).bundle(&self.registry)
    }

    async fn select_composition(
        &self,
        bundle: &Bundle,
        id: &str,
        browser: &Path,
    ) -> PromoResult<CompositionDescriptor> {
        require_browser(browser)?;
        bundle.verify()?;
        let composition = bundle.select(id)?.clone();
        tracing::debug!(
            id,
            frames = composition.duration_in_frames,
            fps = composition.fps,
            "composition selected"
        );
        Ok(composition)
    }

    async fn render_media(
        &self,
        composition: &CompositionDescriptor,
        bundle: &Bundle,
        options: &MediaOptions,
        on_progress: ProgressFn<'_>,
    ) -> PromoResult<RenderResult> {
        require_browser(&options.browser)?;
        if composition.kind != CompositionKind::Video {
            return Err(PromoError::InvalidArgument(format!(
                "'{}' is a still; render it with render_still",
                composition.id
            )));
        }

        let mut encoder = self.encoder.start(EncodeSettings {
            width: composition.width,
            height: composition.height,
            fps: composition.fps,
            codec: options.codec,
            crf: options.crf,
            format: PixelFormat::Rgba8,
            output: options.output.clone(),
        })?;
        let mut session = self.session(composition, &options.browser);

        let total = composition.duration_in_frames;
        for frame in 0..total {
            let url = bundle.frame_url(&composition.id, frame)?;
            let fb = session.capture_frame(&url).await?;
            encoder.write_frame(&fb)?;
            on_progress(frame + 1, total);
        }
        session.stop().await?;
        let output = encoder.finish()?;

        Ok(RenderResult {
            output,
            frame_count: total,
            width: composition.width,
            height: composition.height,
            fps: composition.fps,
        })
    }

    async fn render_still(
        &self,
        composition: &CompositionDescriptor,
        bundle: &Bundle,
        output: &Path,
        browser: &Path,
    ) -> PromoResult<PathBuf> {
        require_browser(browser)?;
        let url = bundle.frame_url(&composition.id, 0)?;
        let mut session = self.session(composition, browser);
        let fb = session.capture_frame(&url).await?;
        session.stop().await?;
        write_png(&fb, output)?;
        Ok(output.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promo_core::frame::FrameBuffer;
    use promo_core::Color;
    use promo_scene::{Composition, Element, VideoConfig};
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Captures solid frames without launching anything.
    #[derive(Default)]
    struct SolidBackend {
        size: Option<(u32, u32)>,
    }

    #[async_trait]
    impl CaptureBackend for SolidBackend {
        async fn start_session(&mut self, config: CaptureSessionConfig) -> PromoResult<()> {
            self.size = Some((config.viewport_width, config.viewport_height));
            Ok(())
        }

        async fn capture_frame(&mut self, url: &str) -> PromoResult<FrameBuffer> {
            assert!(url.starts_with("file://"), "{}", url);
            let (w, h) = self
                .size
                .ok_or_else(|| PromoError::Capture("not started".into()))?;
            Ok(FrameBuffer::solid(w, h, &Color::from_rgb_u32(0x0a0e14)))
        }

        async fn stop_session(&mut self) -> PromoResult<()> {
            self.size = None;
            Ok(())
        }
    }

    fn solid_backend() -> Box<dyn CaptureBackend> {
        Box::new(SolidBackend::default())
    }

    /// Captures the first frame, then fails.
    #[cfg(unix)]
    #[derive(Default)]
    struct CrashingBackend {
        inner: SolidBackend,
        captured: u32,
    }

    #[cfg(unix)]
    #[async_trait]
    impl CaptureBackend for CrashingBackend {
        async fn start_session(&mut self, config: CaptureSessionConfig) -> PromoResult<()> {
            self.inner.start_session(config).await
        }

        async fn capture_frame(&mut self, url: &str) -> PromoResult<FrameBuffer> {
            if self.captured == 1 {
                return Err(PromoError::Capture("browser crashed".into()));
            }
            self.captured += 1;
            self.inner.capture_frame(url).await
        }

        async fn stop_session(&mut self) -> PromoResult<()> {
            self.inner.stop_session().await
        }
    }

    #[cfg(unix)]
    fn crashing_backend() -> Box<dyn CaptureBackend> {
        Box::new(CrashingBackend::default())
    }

    fn registry() -> CompositionRegistry {
        let mut reg = CompositionRegistry::new();
        reg.register(Composition::video(
            "Clip",
            3,
            30.0,
            8,
            4,
            |frame: u32, _: &VideoConfig| Element::div().text(frame.to_string()),
        ))
        .unwrap();
        reg.register(Composition::still("Card", 6, 4, |_: u32, _: &VideoConfig| {
            Element::div().text("card")
        }))
        .unwrap();
        reg
    }

    fn pipeline() -> BrowserRenderPipeline {
        BrowserRenderPipeline::new(registry()).with_backend(solid_backend)
    }

    fn fake_browser(dir: &Path) -> PathBuf {
        let path = dir.join("chrome-headless-shell");
        std::fs::write(&path, b"").unwrap();
        path
    }

    #[tokio::test]
    async fn test_select_requires_browser_and_known_id() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline();
        let bundle = p.bundle(&dir.path().join("bundle")).await.unwrap();
        let browser = fake_browser(dir.path());

        let clip = p.select_composition(&bundle, "Clip", &browser).await.unwrap();
        assert_eq!((clip.width, clip.height, clip.duration_in_frames), (8, 4, 3));

        let err = p
            .select_composition(&bundle, "Clip", &dir.path().join("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::Capture(_)));

        let err = p
            .select_composition(&bundle, "Nope", &browser)
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("Clip, Card"), "{}", err);
    }

    #[tokio::test]
    async fn test_select_rejects_a_modified_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline();
        let bundle = p.bundle(&dir.path().join("bundle")).await.unwrap();
        let browser = fake_browser(dir.path());
        std::fs::write(bundle.root.join("Clip").join("00001.html"), "edited").unwrap();

        let err = p
            .select_composition(&bundle, "Clip", &browser)
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::Bundle(_)), "{:?}", err);
        assert!(err.to_string().contains("Clip/00001.html"), "{}", err);
    }

    #[tokio::test]
    async fn test_render_still_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline();
        let bundle = p.bundle(&dir.path().join("bundle")).await.unwrap();
        let browser = fake_browser(dir.path());
        let card = p.select_composition(&bundle, "Card", &browser).await.unwrap();

        let out = dir.path().join("card.png");
        p.render_still(&card, &bundle, &out, &browser).await.unwrap();
        let img = image::open(&out).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (6, 4));
        assert_eq!(img.get_pixel(0, 0).0, [0x0a, 0x0e, 0x14, 255]);
    }

    #[tokio::test]
    async fn test_render_media_rejects_stills() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline();
        let bundle = p.bundle(&dir.path().join("bundle")).await.unwrap();
        let browser = fake_browser(dir.path());
        let card = p.select_composition(&bundle, "Card", &browser).await.unwrap();
        let options = MediaOptions {
            codec: Codec::H264,
            output: dir.path().join("card.mp4"),
            browser,
            crf: 23,
        };
        let err = p
            .render_media(&card, &bundle, &options, &|_, _| {})
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::InvalidArgument(_)));
    }

    /// Stand-in for ffmpeg that copies stdin to the last argument.
    #[cfg(unix)]
    fn fake_ffmpeg(dir: &Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let ffmpeg = dir.join("fake-ffmpeg");
        std::fs::write(&ffmpeg, "#!/bin/sh\nfor last in \"$@\"; do :; done\ncat > \"$last\"\n").unwrap();
        std::fs::set_permissions(&ffmpeg, std::fs::Permissions::from_mode(0o755)).unwrap();
        ffmpeg
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_render_media_streams_every_frame() {
        let dir = tempfile::tempdir().unwrap();
        let p = pipeline().with_encoder(FfmpegEncoder::with_program(fake_ffmpeg(dir.path())));
        let bundle = p.bundle(&dir.path().join("bundle")).await.unwrap();
        let browser = fake_browser(dir.path());
        let clip = p.select_composition(&bundle, "Clip", &browser).await.unwrap();

        let seen = AtomicU32::new(0);
        let options = MediaOptions {
            codec: Codec::H264,
            output: dir.path().join("out").join("clip.mp4"),
            browser,
            crf: 23,
        };
        let result = p
            .render_media(&clip, &bundle, &options, &|done, total| {
                assert_eq!(total, 3);
                seen.store(done, Ordering::SeqCst);
            })
            .await
            .unwrap();

        assert_eq!(seen.load(Ordering::SeqCst), 3);
        assert_eq!(result.frame_count, 3);
        assert_eq!(result.output, options.output);
        assert_eq!(std::fs::metadata(&result.output).unwrap().len(), 3 * 8 * 4 * 4);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_capture_leaves_no_partial_video() {
        let dir = tempfile::tempdir().unwrap();
        let p = BrowserRenderPipeline::new(registry())
            .with_backend(crashing_backend)
            .with_encoder(FfmpegEncoder::with_program(fake_ffmpeg(dir.path())));
        let bundle = p.bundle(&dir.path().join("bundle")).await.unwrap();
        let browser = fake_browser(dir.path());
        let clip = p.select_composition(&bundle, "Clip", &browser).await.unwrap();

        let out_dir = dir.path().join("out");
        let options = MediaOptions {
            codec: Codec::H264,
            output: out_dir.join("clip.mp4"),
            browser,
            crf: 23,
        };
        let err = p
            .render_media(&clip, &bundle, &options, &|_, _| {})
            .await
            .unwrap_err();
        assert!(matches!(err, PromoError::Capture(_)), "{:?}", err);
        assert!(!options.output.exists());
        assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 0);
    }
}

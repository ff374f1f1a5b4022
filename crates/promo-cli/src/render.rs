use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};

use promo_core::Codec;
use promo_render::{MediaOptions, RenderPipeline, RenderResult};
use promo_scene::{CompositionKind, CompositionRegistry};

/// Everything needed to render one video composition.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub bundle_dir: PathBuf,
    pub composition: String,
    pub codec: Codec,
    pub output: PathBuf,
    pub browser: PathBuf,
    pub crf: u8,
}

fn require_browser(browser: &Path) -> Result<()> {
    if !browser.is_file() {
        bail!(
            "headless shell not found at {} (run `promo fetch-browser` first)",
            browser.display()
        );
    }
    Ok(())
}

/// Bundle, select and render, each exactly once and in that order.
pub async fn run_render(pipeline: &dyn RenderPipeline, job: &RenderJob) -> Result<RenderResult> {
    require_browser(&job.browser)?;
    println!("🎬 Using headless shell: {}", job.browser.display());
    let start = Instant::now();

    println!("   Bundling...");
    let bundle = pipeline
        .bundle(&job.bundle_dir)
        .await
        .context("bundling failed")?;

    println!("   Selecting composition...");
    let composition = pipeline
        .select_composition(&bundle, &job.composition, &job.browser)
        .await
        .with_context(|| format!("failed to select composition '{}'", job.composition))?;

    println!(
        "   Rendering {} frames at {}fps ({}x{})...",
        composition.duration_in_frames, composition.fps, composition.width, composition.height
    );
    let options = MediaOptions {
        codec: job.codec,
        output: job.output.clone(),
        browser: job.browser.clone(),
        crf: job.crf,
    };
    let progress = |done: u32, total: u32| {
        print!("\r   Frame {}/{}", done, total);
        let _ = std::io::stdout().flush();
    };
    let result = pipeline
        .render_media(&composition, &bundle, &options, &progress)
        .await
        .with_context(|| format!("failed to render '{}'", composition.id))?;
    println!();

    println!(
        "   ✓ Done! Output: {} ({:.1}s)",
        result.output.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(result)
}

/// Render frame 0 of a still composition to PNG.
pub async fn run_still(
    pipeline: &dyn RenderPipeline,
    bundle_dir: &Path,
    id: &str,
    output: &Path,
    browser: &Path,
) -> Result<PathBuf> {
    require_browser(browser)?;
    println!("🖼  Rendering still '{}'", id);
    let bundle = pipeline.bundle(bundle_dir).await.context("bundling failed")?;
    let composition = pipeline
        .select_composition(&bundle, id, browser)
        .await
        .with_context(|| format!("failed to select composition '{}'", id))?;
    if composition.kind != CompositionKind::Still {
        tracing::warn!(id, "not a still composition; capturing its first frame");
    }
    let out = pipeline
        .render_still(&composition, &bundle, output, browser)
        .await
        .with_context(|| format!("failed to render still '{}'", id))?;
    println!("   ✓ Done! Output: {}", out.display());
    Ok(out)
}

/// One line per registered composition.
pub fn composition_lines(registry: &CompositionRegistry) -> Vec<String> {
    registry
        .descriptors()
        .iter()
        .map(|d| match d.kind {
            CompositionKind::Video => format!(
                "{:<16} video  {}x{}  {} frames @ {}fps ({:.1}s)",
                d.id,
                d.width,
                d.height,
                d.duration_in_frames,
                d.fps,
                d.duration_seconds()
            ),
            CompositionKind::Still => {
                format!("{:<16} still  {}x{}", d.id, d.width, d.height)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use promo_core::{PromoError, PromoResult};
    use promo_render::ProgressFn;
    use promo_scene::CompositionDescriptor;
    use promo_web::{Bundle, BundleManifest};

    /// Records calls and returns canned values.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
        fail_select: bool,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn descriptor(id: &str, kind: CompositionKind) -> CompositionDescriptor {
        CompositionDescriptor {
            id: id.to_string(),
            kind,
            duration_in_frames: 540,
            fps: 30.0,
            width: 1920,
            height: 1080,
        }
    }

    #[async_trait]
    impl RenderPipeline for Recorder {
        async fn bundle(&self, out_dir: &Path) -> PromoResult<Bundle> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("bundle {}", out_dir.display()));
            Ok(Bundle {
                root: out_dir.to_path_buf(),
                serve_url: reqwest::Url::parse("file:///bundle/").unwrap(),
                manifest: BundleManifest {
                    version: 1,
                    compositions: vec![],
                    files: Default::default(),
                },
            })
        }

        async fn select_composition(
            &self,
            _bundle: &Bundle,
            id: &str,
            browser: &Path,
        ) -> PromoResult<CompositionDescriptor> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("select {} {}", id, browser.display()));
            if self.fail_select {
                return Err(PromoError::unknown_composition(id, &["PromoVideo"]));
            }
            Ok(descriptor(id, CompositionKind::Video))
        }

        async fn render_media(
            &self,
            composition: &CompositionDescriptor,
            _bundle: &Bundle,
            options: &MediaOptions,
            on_progress: ProgressFn<'_>,
        ) -> PromoResult<RenderResult> {
            self.calls.lock().unwrap().push(format!(
                "render {} {} {} {}",
                composition.id,
                options.codec,
                options.output.display(),
                options.browser.display()
            ));
            on_progress(1, 1);
            Ok(RenderResult {
                output: options.output.clone(),
                frame_count: composition.duration_in_frames,
                width: composition.width,
                height: composition.height,
                fps: composition.fps,
            })
        }

        async fn render_still(
            &self,
            composition: &CompositionDescriptor,
            _bundle: &Bundle,
            output: &Path,
            _browser: &Path,
        ) -> PromoResult<PathBuf> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("still {} {}", composition.id, output.display()));
            Ok(output.to_path_buf())
        }
    }

    fn job(browser: PathBuf) -> RenderJob {
        RenderJob {
            bundle_dir: PathBuf::from(".promo/bundle"),
            composition: "PromoVideo".into(),
            codec: Codec::H264,
            output: PathBuf::from("promo.mp4"),
            browser,
            crf: 23,
        }
    }

    fn browser_file(dir: &Path) -> PathBuf {
        let p = dir.join("chrome-headless-shell.exe");
        std::fs::write(&p, b"").unwrap();
        p
    }

    #[tokio::test]
    async fn test_run_render_calls_each_step_once_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let browser = browser_file(dir.path());
        let stub = Recorder::default();

        let result = run_render(&stub, &job(browser.clone())).await.unwrap();
        assert_eq!(result.output, PathBuf::from("promo.mp4"));
        assert_eq!(result.frame_count, 540);
        assert_eq!(
            stub.calls(),
            vec![
                format!("bundle {}", Path::new(".promo/bundle").display()),
                format!("select PromoVideo {}", browser.display()),
                format!("render PromoVideo h264 promo.mp4 {}", browser.display()),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_browser_stops_before_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let stub = Recorder::default();
        let err = run_render(&stub, &job(dir.path().join("absent.exe")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("fetch-browser"), "{}", err);
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_select_failure_skips_render() {
        let dir = tempfile::tempdir().unwrap();
        let stub = Recorder {
            fail_select: true,
            ..Default::default()
        };
        let err = run_render(&stub, &job(browser_file(dir.path())))
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("no composition with id"));
        assert_eq!(stub.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_run_still_forwards_output() {
        let dir = tempfile::tempdir().unwrap();
        let browser = browser_file(dir.path());
        let stub = Recorder::default();
        let out = run_still(
            &stub,
            Path::new("b"),
            "MobileStill",
            Path::new("mobile.png"),
            &browser,
        )
        .await
        .unwrap();
        assert_eq!(out, PathBuf::from("mobile.png"));
        assert_eq!(stub.calls().last().unwrap(), "still MobileStill mobile.png");
    }

    #[test]
    fn test_composition_lines() {
        let reg = promo_scene::promo_registry().unwrap();
        let lines = composition_lines(&reg);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("PromoVideo"));
        assert!(lines[0].contains("540 frames @ 30fps (18.0s)"));
        assert!(lines[2].contains("still  390x844"));
    }
}

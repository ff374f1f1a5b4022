use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use promo_core::frame::{FrameBuffer, PixelFormat};
use promo_core::{Codec, PromoError, PromoResult};

/// Output parameters of one encode.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSettings {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub codec: Codec,
    /// Constant rate factor; lower is higher quality.
    pub crf: u8,
    /// Layout of the frames that will be written.
    pub format: PixelFormat,
    pub output: PathBuf,
}

impl EncodeSettings {
    fn validate(&self) -> PromoResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PromoError::Encode(format!(
                "invalid frame size {}x{}",
                self.width, self.height
            )));
        }
        // yuv420p needs even dimensions.
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(PromoError::Encode(format!(
                "frame size {}x{} must be even for yuv420p",
                self.width, self.height
            )));
        }
        if !(self.fps > 0.0) {
            return Err(PromoError::Encode(format!("invalid fps {}", self.fps)));
        }
        Ok(())
    }

    /// Check that `frame` can be streamed with these settings.
    pub fn check_frame(&self, frame: &FrameBuffer) -> PromoResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(PromoError::Encode(format!(
                "frame has dimensions {}x{}, expected {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        if frame.format != self.format {
            return Err(PromoError::Encode(format!(
                "frame is {:?}, expected {:?}",
                frame.format, self.format
            )));
        }
        Ok(())
    }
}

/// Encoder that shells out to FFmpeg, reading raw frames from stdin.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: PathBuf,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
        }
    }
}

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific ffmpeg binary instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Full ffmpeg argument list for `settings`.
    pub fn args(settings: &EncodeSettings) -> Vec<String> {
        let crf = settings.crf.to_string();
        let mut args: Vec<String> = vec![
            "-y".into(),
            "-hide_banner".into(),
            "-nostats".into(),
            "-loglevel".into(),
            "error".into(),
            "-f".into(),
            "rawvideo".into(),
            "-pixel_format".into(),
            settings.format.ffmpeg_name().into(),
            "-video_size".into(),
            format!("{}x{}", settings.width, settings.height),
            "-framerate".into(),
            settings.fps.to_string(),
            "-i".into(),
            "-".into(),
        ];

        let codec_args: &[&str] = match settings.codec {
            Codec::H264 => &[
                "-c:v", "libx264",
                "-pix_fmt", "yuv420p",
                "-preset", "medium",
                "-crf", &crf,
                "-movflags", "+faststart",
            ],
            Codec::H265 => &[
                "-c:v", "libx265",
                "-pix_fmt", "yuv420p",
                "-preset", "medium",
                "-crf", &crf,
                "-tag:v", "hvc1",
                "-movflags", "+faststart",
            ],
            Codec::Vp9 => &[
                "-c:v", "libvpx-vp9",
                "-pix_fmt", "yuv420p",
                "-crf", &crf,
                "-b:v", "0",
            ],
        };
        args.extend(codec_args.iter().map(|s| s.to_string()));
        args.push(settings.output.to_string_lossy().into_owned());
        args
    }

    /// Spawn ffmpeg and return a session frames can be streamed into.
    ///
    /// ffmpeg writes to a staging file next to `settings.output`, which
    /// [`FfmpegSession::finish`] renames into place. A session dropped before
    /// that kills ffmpeg and removes the staging file.
    pub fn start(&self, settings: EncodeSettings) -> PromoResult<FfmpegSession> {
        settings.validate()?;

        let ext = settings
            .output
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if !ext.eq_ignore_ascii_case(settings.codec.extension()) {
            tracing::warn!(
                output = %settings.output.display(),
                codec = %settings.codec,
                "output extension does not match the usual container for this codec"
            );
        }

        if let Some(parent) = settings.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let staging = staging_path(&settings.output);
        let mut child = Command::new(&self.program)
            .args(Self::args(&EncodeSettings {
                output: staging.clone(),
                ..settings.clone()
            }))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                PromoError::Encode(format!(
                    "failed to start {}: {}. Install FFmpeg: https://ffmpeg.org/download.html",
                    self.program.display(),
                    e
                ))
            })?;

        let Some(stdin) = child.stdin.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(PromoError::Encode("failed to open ffmpeg stdin".into()));
        };
        // Drained continuously so ffmpeg never blocks on a full pipe.
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                String::from_utf8_lossy(&buf).into_owned()
            })
        });

        tracing::debug!(
            output = %settings.output.display(),
            codec = %settings.codec,
            "ffmpeg started"
        );
        Ok(FfmpegSession {
            child,
            stdin: Some(stdin),
            stderr,
            settings,
            staging,
            frames_written: 0,
            finished: false,
        })
    }
}

/// A running ffmpeg process accepting raw frames.
#[derive(Debug)]
pub struct FfmpegSession {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<String>>,
    settings: EncodeSettings,
    staging: PathBuf,
    frames_written: u64,
    finished: bool,
}

impl FfmpegSession {
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Stream one frame. Frames must match the session's size and format.
    pub fn write_frame(&mut self, frame: &FrameBuffer) -> PromoResult<()> {
        self.settings.check_frame(frame)?;
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| PromoError::Encode("ffmpeg stdin already closed".into()))?;
        if let Err(e) = stdin.write_all(&frame.data) {
            // A broken pipe means ffmpeg died; its stderr says why.
            self.stdin = None;
            let _ = self.child.wait();
            let frames_written = self.frames_written;
            let stderr = self.collect_stderr();
            return Err(PromoError::Encode(format!(
                "failed to write frame {} to ffmpeg: {}. FFmpeg stderr: {}",
                frames_written, e, stderr
            )));
        }
        self.frames_written += 1;
        Ok(())
    }

    /// Close stdin, wait for ffmpeg to finalize the file and move it to the
    /// configured output path.
    pub fn finish(mut self) -> PromoResult<PathBuf> {
        if self.frames_written == 0 {
            return Err(PromoError::Encode("no frames to encode".into()));
        }
        drop(self.stdin.take());

        let status = self
            .child
            .wait()
            .map_err(|e| PromoError::Encode(format!("ffmpeg process error: {}", e)))?;
        let stderr = self.collect_stderr();
        if !status.success() {
            return Err(PromoError::Encode(format!(
                "ffmpeg failed with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        let output = self.settings.output.clone();
        std::fs::rename(&self.staging, &output).map_err(|e| {
            PromoError::Encode(format!(
                "failed to move {} to {}: {}",
                self.staging.display(),
                output.display(),
                e
            ))
        })?;
        self.finished = true;

        tracing::info!(
            "Encoded {} frames to {} ({}x{} @ {}fps, {})",
            self.frames_written,
            output.display(),
            self.settings.width,
            self.settings.height,
            self.settings.fps,
            self.settings.codec
        );
        Ok(output)
    }

    /// Text ffmpeg wrote to stderr. Only complete once the process exited.
    fn collect_stderr(&mut self) -> String {
        self.stderr
            .take()
            .and_then(|h| h.join().ok())
            .unwrap_or_default()
    }
}

impl Drop for FfmpegSession {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        drop(self.stdin.take());
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = self.collect_stderr();
        if self.staging.exists() {
            tracing::debug!(path = %self.staging.display(), "removing unfinished encode");
            let _ = std::fs::remove_file(&self.staging);
        }
    }
}

/// Hidden sibling of `output` that keeps its extension, so ffmpeg still
/// picks the container from it.
fn staging_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!(".{}.partial.{}", stem, ext.to_string_lossy()),
        None => format!(".{}.partial", stem),
    };
    output.with_file_name(name)
}

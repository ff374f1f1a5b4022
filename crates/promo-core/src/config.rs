use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PromoError, PromoResult};

/// Chrome-for-Testing platform tag of a headless shell build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "linux64")]
    Linux64,
    #[serde(rename = "mac-arm64")]
    MacArm64,
    #[serde(rename = "mac-x64")]
    MacX64,
    #[serde(rename = "win64")]
    Win64,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Linux64,
        Platform::MacArm64,
        Platform::MacX64,
        Platform::Win64,
    ];

    /// Platform of the running host, if a headless shell build exists for it.
    pub fn detect() -> Option<Platform> {
        match (std::env::consts::OS, std::env::consts::ARCH) {
            ("linux", "x86_64") => Some(Platform::Linux64),
            ("macos", "aarch64") => Some(Platform::MacArm64),
            ("macos", "x86_64") => Some(Platform::MacX64),
            ("windows", "x86_64") => Some(Platform::Win64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux64 => "linux64",
            Platform::MacArm64 => "mac-arm64",
            Platform::MacX64 => "mac-x64",
            Platform::Win64 => "win64",
        }
    }

    /// Name of the top-level folder inside the downloaded archive.
    pub fn archive_root(&self) -> String {
        format!("chrome-headless-shell-{}", self.as_str())
    }

    pub fn executable_name(&self) -> &'static str {
        match self {
            Platform::Win64 => "chrome-headless-shell.exe",
            _ => "chrome-headless-shell",
        }
    }

    /// Path of the executable relative to the extraction directory.
    pub fn executable_relative_path(&self) -> PathBuf {
        PathBuf::from(self.archive_root()).join(self.executable_name())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PromoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PromoError::InvalidArgument(format!("unknown platform '{}'", s)))
    }
}

/// Video codec handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    #[default]
    H264,
    H265,
    Vp9,
}

impl Codec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Codec::H264 => "h264",
            Codec::H265 => "h265",
            Codec::Vp9 => "vp9",
        }
    }

    /// Container extension the codec is written into.
    pub fn extension(&self) -> &'static str {
        match self {
            Codec::H264 | Codec::H265 => "mp4",
            Codec::Vp9 => "webm",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Codec {
    type Err = PromoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h264" => Ok(Codec::H264),
            "h265" | "hevc" => Ok(Codec::H265),
            "vp9" => Ok(Codec::Vp9),
            other => Err(PromoError::InvalidArgument(format!("unknown codec '{}'", other))),
        }
    }
}

/// Where the headless shell comes from and where it lands.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Mirror serving Chrome-for-Testing archives.
    pub mirror: String,
    /// Chrome-for-Testing version to download.
    pub version: String,
    /// Override for the host platform.
    pub platform: Option<Platform>,
    /// Directory the archive is extracted into.
    pub install_dir: PathBuf,
    /// Temporary archive path.
    pub archive_path: PathBuf,
    /// Socket read timeout for the download.
    pub read_timeout_secs: u64,
    /// Explicit executable path, bypassing the install layout.
    pub executable: Option<PathBuf>,
    /// Pass `--no-sandbox` to the browser (needed when running as root in containers).
    pub no_sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            mirror: "https://registry.npmmirror.com/-/binary/chrome-for-testing".to_string(),
            version: "144.0.7559.20".to_string(),
            platform: None,
            install_dir: PathBuf::from("chrome-headless-shell"),
            archive_path: PathBuf::from("chrome-hs.zip"),
            read_timeout_secs: 300,
            executable: None,
            no_sandbox: false,
        }
    }
}

impl BrowserConfig {
    /// Configured platform, falling back to the host platform.
    pub fn resolve_platform(&self) -> PromoResult<Platform> {
        self.platform.or_else(Platform::detect).ok_or_else(|| {
            PromoError::Config(format!(
                "no headless shell build for {}/{}; set browser.platform",
                std::env::consts::OS,
                std::env::consts::ARCH
            ))
        })
    }

    /// Archive URL for `platform` on the configured mirror.
    pub fn download_url(&self, platform: Platform) -> String {
        format!(
            "{}/{}/{}/{}.zip",
            self.mirror.trim_end_matches('/'),
            self.version,
            platform.as_str(),
            platform.archive_root()
        )
    }

    /// Executable path the fetcher installs and the renderer launches.
    pub fn executable_path(&self, platform: Platform) -> PathBuf {
        match &self.executable {
            Some(p) => p.clone(),
            None => self.install_dir.join(platform.executable_relative_path()),
        }
    }

    /// Executable to launch. An explicit `executable` is used as is, without
    /// requiring a known platform.
    pub fn resolve_executable(&self) -> PromoResult<PathBuf> {
        match &self.executable {
            Some(p) => Ok(p.clone()),
            None => Ok(self.executable_path(self.resolve_platform()?)),
        }
    }
}

/// What to render and where the result goes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Composition rendered by default.
    pub composition: String,
    /// Output media file.
    pub output: PathBuf,
    pub codec: Codec,
    /// Directory the bundle is written into.
    pub bundle_dir: PathBuf,
    /// x264/x265 constant rate factor.
    pub crf: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            composition: "PromoVideo".to_string(),
            output: PathBuf::from("promo.mp4"),
            codec: Codec::H264,
            bundle_dir: PathBuf::from(".promo/bundle"),
            crf: 23,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PromoConfig {
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl PromoConfig {
    /// Default config file looked up in the working directory.
    pub const FILE_NAME: &'static str = "promo.toml";

    pub fn load_from_file(path: &Path) -> PromoResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| PromoError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load `path` if given, else `promo.toml` when present, else defaults.
    pub fn load(path: Option<&Path>) -> PromoResult<Self> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => {
                let default_path = Path::new(Self::FILE_NAME);
                if default_path.exists() {
                    Self::load_from_file(default_path)
                } else {
                    tracing::debug!("no {} found, using defaults", Self::FILE_NAME);
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_download_url_matches_mirror_layout() {
        let cfg = BrowserConfig::default();
        assert_eq!(
            cfg.download_url(Platform::Win64),
            "https://registry.npmmirror.com/-/binary/chrome-for-testing/144.0.7559.20/win64/chrome-headless-shell-win64.zip"
        );
    }

    #[test]
    fn test_executable_path_layout() {
        let cfg = BrowserConfig::default();
        assert_eq!(
            cfg.executable_path(Platform::Win64),
            Path::new("chrome-headless-shell")
                .join("chrome-headless-shell-win64")
                .join("chrome-headless-shell.exe")
        );
        assert_eq!(
            cfg.executable_path(Platform::Linux64),
            Path::new("chrome-headless-shell")
                .join("chrome-headless-shell-linux64")
                .join("chrome-headless-shell")
        );
    }

    #[test]
    fn test_executable_override_wins() {
        let cfg = BrowserConfig {
            executable: Some(PathBuf::from("/opt/shell")),
            ..Default::default()
        };
        assert_eq!(cfg.executable_path(Platform::MacArm64), PathBuf::from("/opt/shell"));
        assert_eq!(cfg.resolve_executable().unwrap(), PathBuf::from("/opt/shell"));
    }

    #[test]
    fn test_resolve_executable_uses_configured_platform() {
        let cfg = BrowserConfig {
            platform: Some(Platform::MacX64),
            ..Default::default()
        };
        assert_eq!(
            cfg.resolve_executable().unwrap(),
            cfg.executable_path(Platform::MacX64)
        );
    }

    #[test]
    fn test_platform_and_codec_parse() {
        assert_eq!("mac-arm64".parse::<Platform>().unwrap(), Platform::MacArm64);
        assert!("amiga".parse::<Platform>().is_err());
        assert_eq!("H264".parse::<Codec>().unwrap(), Codec::H264);
        assert_eq!("hevc".parse::<Codec>().unwrap(), Codec::H265);
        assert!("mpeg2".parse::<Codec>().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg: PromoConfig = toml::from_str(
            r#"
            [browser]
            platform = "linux64"
            no_sandbox = true

            [render]
            codec = "vp9"
            output = "out/promo.webm"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.browser.platform, Some(Platform::Linux64));
        assert!(cfg.browser.no_sandbox);
        assert_eq!(cfg.browser.read_timeout_secs, 300);
        assert_eq!(cfg.render.codec, Codec::Vp9);
        assert_eq!(cfg.render.composition, "PromoVideo");
    }

    #[test]
    fn test_load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promo.toml");
        let mut cfg = PromoConfig::default();
        cfg.render.composition = "MobileStill".to_string();
        std::fs::write(&path, toml::to_string_pretty(&cfg).unwrap()).unwrap();

        let loaded = PromoConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.render.composition, "MobileStill");
        assert_eq!(loaded.browser.version, "144.0.7559.20");
    }
}

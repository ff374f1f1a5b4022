//! One-shot download of the headless shell: follow redirects by hand,
//! stream the archive to disk, unzip it, and check the executable landed
//! where the renderer expects it.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{redirect, Client, StatusCode, Url};
use tokio::io::AsyncWriteExt;

use promo_core::{BrowserConfig, Platform, PromoError, PromoResult};

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 10;

/// Outcome of checking the extracted layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Found(PathBuf),
    /// The executable is not at the expected nested path. `contents` lists
    /// the top level of the extraction directory.
    Missing {
        expected: PathBuf,
        contents: Vec<String>,
    },
}

/// HTTP client with automatic redirects disabled.
pub fn client(read_timeout: Duration) -> PromoResult<Client> {
    Client::builder()
        .redirect(redirect::Policy::none())
        .read_timeout(read_timeout)
        .build()
        .map_err(|e| PromoError::Network(format!("failed to build HTTP client: {}", e)))
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Download `url` to `dest`, following each redirect with exactly one new
/// request. `on_progress` receives `(downloaded, total)` after every chunk.
pub async fn download(
    client: &Client,
    url: &str,
    dest: &Path,
    on_progress: &mut dyn FnMut(u64, Option<u64>),
) -> PromoResult<u64> {
    let mut current =
        Url::parse(url).map_err(|e| PromoError::Network(format!("invalid URL {}: {}", url, e)))?;

    let mut hops = 0;
    let mut response = loop {
        let response = client
            .get(current.clone())
            .send()
            .await
            .map_err(|e| PromoError::Network(format!("GET {} failed: {}", current, e)))?;
        let status = response.status();

        if !is_redirect(status) {
            if !status.is_success() {
                return Err(PromoError::Network(format!("GET {} returned {}", current, status)));
            }
            break response;
        }

        hops += 1;
        if hops > MAX_REDIRECTS {
            return Err(PromoError::Network(format!(
                "too many redirects (more than {}) starting at {}",
                MAX_REDIRECTS, url
            )));
        }
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                PromoError::Network(format!("{} from {} without a Location header", status, current))
            })?;
        let next = current.join(location).map_err(|e| {
            PromoError::Network(format!("bad redirect target '{}': {}", location, e))
        })?;
        tracing::debug!(from = %current, to = %next, %status, "following redirect");
        current = next;
    };

    let total = response.content_length();
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let mut file = tokio::fs::File::create(dest).await?;
    let mut downloaded: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| PromoError::Network(format!("reading body of {} failed: {}", current, e)))?
    {
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        on_progress(downloaded, total);
    }
    file.flush().await?;

    if let Some(expected) = total {
        if downloaded != expected {
            drop(file);
            let _ = tokio::fs::remove_file(dest).await;
            return Err(PromoError::Network(format!(
                "download truncated: got {} of {} bytes",
                downloaded, expected
            )));
        }
    }
    tracing::info!(url = %current, bytes = downloaded, dest = %dest.display(), "download complete");
    Ok(downloaded)
}

/// Unzip `archive` into `dir` and delete the archive.
pub fn extract(archive: &Path, dir: &Path) -> PromoResult<()> {
    let file = fs::File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)
        .map_err(|e| PromoError::archive(format!("not a zip archive: {}", e), archive))?;
    fs::create_dir_all(dir)?;
    zip.extract(dir)
        .map_err(|e| PromoError::archive(format!("extraction failed: {}", e), archive))?;
    let entries = zip.len();
    drop(zip);
    fs::remove_file(archive)?;
    tracing::debug!(entries, dir = %dir.display(), "archive extracted");
    Ok(())
}

/// Check for `relative_exe` under `dir`.
pub fn verify(dir: &Path, relative_exe: &Path) -> PromoResult<Verification> {
    let expected = dir.join(relative_exe);
    if expected.is_file() {
        return Ok(Verification::Found(expected));
    }
    let mut contents = Vec::new();
    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            contents.push(entry?.file_name().to_string_lossy().into_owned());
        }
    }
    contents.sort();
    Ok(Verification::Missing { expected, contents })
}

/// Single-line progress text, e.g. `  42.0% (12.3MB / 29.3MB)`.
pub fn format_progress(downloaded: u64, total: Option<u64>) -> String {
    const MB: f64 = 1e6;
    match total {
        Some(total) if total > 0 => format!(
            "  {:.1}% ({:.1}MB / {:.1}MB)",
            downloaded as f64 / total as f64 * 100.0,
            downloaded as f64 / MB,
            total as f64 / MB
        ),
        _ => format!("  {:.1}MB", downloaded as f64 / MB),
    }
}

/// Progress callback that rewrites one terminal line.
pub fn print_progress(downloaded: u64, total: Option<u64>) {
    print!("\r{}", format_progress(downloaded, total));
    let _ = std::io::stdout().flush();
}

/// Remove the previous install, then download, extract and verify.
pub async fn fetch_browser(
    config: &BrowserConfig,
    platform: Platform,
    url: &str,
    on_progress: &mut dyn FnMut(u64, Option<u64>),
) -> PromoResult<Verification> {
    if config.install_dir.exists() {
        tracing::info!(dir = %config.install_dir.display(), "removing previous install");
        fs::remove_dir_all(&config.install_dir)?;
    }
    if config.archive_path.exists() {
        fs::remove_file(&config.archive_path)?;
    }

    let client = client(Duration::from_secs(config.read_timeout_secs))?;
    download(&client, url, &config.archive_path, on_progress).await?;
    extract(&config.archive_path, &config.install_dir)?;

    let verification = verify(&config.install_dir, &platform.executable_relative_path())?;
    if let Verification::Missing { expected, contents } = &verification {
        tracing::warn!(
            expected = %expected.display(),
            contents = ?contents,
            "headless shell executable not found after extraction"
        );
    }
    Ok(verification)
}

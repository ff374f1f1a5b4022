mod fetch;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use promo_core::{Codec, Platform, PromoConfig};
use promo_render::BrowserRenderPipeline;

use crate::fetch::Verification;
use crate::render::RenderJob;

#[derive(Parser)]
#[command(
    name = "promo",
    version,
    about = "Render the Claude Code Monitor promo video with a headless browser"
)]
struct Cli {
    /// Config file (default: promo.toml in the working directory, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and unpack the Chrome headless shell
    FetchBrowser {
        /// Target platform: linux64, mac-arm64, mac-x64, win64 (default: host)
        #[arg(long)]
        platform: Option<Platform>,

        /// Download this archive instead of the configured mirror URL
        #[arg(long)]
        url: Option<String>,
    },

    /// Bundle the scenes and render a video composition
    Render {
        /// Composition id (default: PromoVideo)
        #[arg(short, long)]
        composition: Option<String>,

        /// Output file (default: promo.mp4)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Video codec: h264, h265, vp9
        #[arg(long)]
        codec: Option<Codec>,

        /// Headless shell executable (default: the fetched one)
        #[arg(long)]
        browser: Option<PathBuf>,
    },

    /// Render a still composition to PNG
    Still {
        /// Composition id, e.g. DashboardStill or MobileStill
        #[arg()]
        id: String,

        /// Output file (default: <id>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Headless shell executable (default: the fetched one)
        #[arg(long)]
        browser: Option<PathBuf>,
    },

    /// List the registered compositions
    Compositions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = PromoConfig::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Commands::FetchBrowser { platform, url } => run_async(cmd_fetch_browser(config, platform, url)),
        Commands::Render {
            composition,
            output,
            codec,
            browser,
        } => run_async(cmd_render(config, composition, output, codec, browser)),
        Commands::Still {
            id,
            output,
            browser,
        } => run_async(cmd_still(config, id, output, browser)),
        Commands::Compositions => cmd_compositions(),
    }
}

fn run_async<F>(future: F) -> Result<()>
where
    F: std::future::Future<Output = Result<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize async runtime")?;
    runtime.block_on(future)
}

async fn cmd_fetch_browser(
    mut config: PromoConfig,
    platform: Option<Platform>,
    url: Option<String>,
) -> Result<()> {
    if platform.is_some() {
        config.browser.platform = platform;
    }
    let platform = config.browser.resolve_platform()?;
    let url = url.unwrap_or_else(|| config.browser.download_url(platform));

    println!("📥 Downloading Chrome Headless Shell ({})", platform);
    println!("   URL: {}", url);
    let verification = fetch::fetch_browser(&config.browser, platform, &url, &mut fetch::print_progress)
        .await
        .context("failed to fetch the headless shell")?;
    println!();
    println!("   ✓ Extracted to: {}", config.browser.install_dir.display());

    match verification {
        Verification::Found(path) => println!("   ✓ Chrome Headless Shell ready at: {}", path.display()),
        Verification::Missing { expected, contents } => {
            println!("   ⚠️  Expected executable not found at: {}", expected.display());
            println!("   Contents: {}", contents.join(", "));
        }
    }
    Ok(())
}

fn pipeline(config: &PromoConfig) -> Result<BrowserRenderPipeline> {
    let registry = promo_scene::promo_registry().context("invalid composition registry")?;
    Ok(BrowserRenderPipeline::new(registry).no_sandbox(config.browser.no_sandbox))
}

fn browser_path(config: &PromoConfig, explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p),
        None => Ok(config.browser.resolve_executable()?),
    }
}

async fn cmd_render(
    config: PromoConfig,
    composition: Option<String>,
    output: Option<PathBuf>,
    codec: Option<Codec>,
    browser: Option<PathBuf>,
) -> Result<()> {
    let job = RenderJob {
        bundle_dir: config.render.bundle_dir.clone(),
        composition: composition.unwrap_or_else(|| config.render.composition.clone()),
        codec: codec.unwrap_or(config.render.codec),
        output: output.unwrap_or_else(|| config.render.output.clone()),
        browser: browser_path(&config, browser)?,
        crf: config.render.crf,
    };
    let pipeline = pipeline(&config)?;
    render::run_render(&pipeline, &job).await?;
    Ok(())
}

async fn cmd_still(
    config: PromoConfig,
    id: String,
    output: Option<PathBuf>,
    browser: Option<PathBuf>,
) -> Result<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.png", id)));
    let browser = browser_path(&config, browser)?;
    let pipeline = pipeline(&config)?;
    render::run_still(&pipeline, &config.render.bundle_dir, &id, &output, &browser).await?;
    Ok(())
}

fn cmd_compositions() -> Result<()> {
    let registry = promo_scene::promo_registry().context("invalid composition registry")?;
    for line in render::composition_lines(&registry) {
        println!("{}", line);
    }
    Ok(())
}

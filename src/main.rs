use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use tracing::info;

mod animation;
mod color;
mod config;
mod display;
mod geometry;
mod renderer;

use config::Config;
use display::DisplayMode;
use renderer::Scene;

#[derive(Parser, Debug)]
#[command(name = "radarplot")]
#[command(author, version, about = "Animated radar chart renderer")]
pub struct Args {
    /// Display mode: terminal or image
    #[arg(short, long)]
    mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Write a PNG to this path (implies --mode image)
    #[arg(short, long)]
    out: Option<std::path::PathBuf>,

    /// Dump every animation frame into this directory
    #[arg(long)]
    frames_dir: Option<std::path::PathBuf>,

    /// Terminal playback rate in frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Render a random demo chart instead of a configured one
    #[arg(long)]
    demo: bool,

    /// Corner count for the demo chart
    #[arg(long, default_value = "4")]
    corners: u32,

    /// Seed for the demo chart's random values
    #[arg(long)]
    seed: Option<u64>,

    /// Write the default config template and exit
    #[arg(long)]
    init_config: bool,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("radarplot=info".parse()?),
        )
        .init();

    let args = Args::parse();

    if let Some(shell) = args.completions {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote config template to {}", path.display());
        return Ok(());
    }

    // Resolve the chart config: demo variant, explicit file, XDG default,
    // or the built-in sample chart.
    let mut config = if args.demo {
        Config::demo(args.corners, args.seed)
    } else {
        match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::load_from_default_path().unwrap_or_else(Config::sample),
        }
    };
    config.merge_args(&args);

    // Validation happens up front; an invalid chart never reaches a
    // display backend.
    let scene = Scene::from_config(&config)?;

    info!("Starting radarplot in {:?} mode", config.output.mode);

    match config.output.mode {
        DisplayMode::Terminal => display::terminal::run(config, scene).await?,
        DisplayMode::Image => display::image::run(config, scene).await?,
    }

    Ok(())
}

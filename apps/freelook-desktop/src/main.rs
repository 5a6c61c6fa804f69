use anyhow::Result;
use clap::Parser;
use freelook_camera::Camera;
use freelook_common::Config;
use freelook_frame::{FrameLoop, SystemClock};
use freelook_render::{Mesh, SurfaceInitError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "freelook-desktop", about = "Fly a camera around a static cube")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Borderless fullscreen on the current monitor
    #[arg(long)]
    fullscreen: bool,

    /// Frame-rate cap
    #[arg(long)]
    fps: Option<u32>,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        config.fullscreen |= self.fullscreen;
        config.validate()?;
        Ok(config)
    }
}

fn report_surface_failure(err: &SurfaceInitError) {
    tracing::error!(
        subsystem = err.subsystem(),
        component = err.component(),
        operation = err.operation(),
        detail = %err.detail(),
        "{}",
        err.message()
    );
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = cli.resolve_config()?;
    tracing::info!(
        width = config.width,
        height = config.height,
        fullscreen = config.fullscreen,
        target_fps = config.target_fps,
        "configuration resolved"
    );

    let camera = Camera::from_config(&config)?;

    let (display, input) = match freelook_render_wgpu::open(&config) {
        Ok(pair) => pair,
        Err(e) => {
            report_surface_failure(&e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut frame_loop = FrameLoop::new(
        &config,
        camera,
        Mesh::cube(1.0),
        display,
        input,
        SystemClock::new(),
    );
    let reason = frame_loop.run();
    tracing::info!(?reason, frames = frame_loop.frames(), "shutting down");

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    tracing::info!("freelook-desktop starting");

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

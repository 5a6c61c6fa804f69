mod script;

use clap::{Parser, Subcommand};
use freelook_camera::Camera;
use freelook_common::Config;
use freelook_frame::{ExitReason, FrameLoop, ManualClock};
use freelook_input::ScriptedInput;
use freelook_render::{HeadlessDisplay, Mesh};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "freelook-cli", about = "Headless tools for the freelook frame loop")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the effective configuration
    Info {
        /// YAML config file to validate and print
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Run the frame loop against a headless display with scripted input
    Simulate {
        /// YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Maximum number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Input script, e.g. "w*30,m20/0,wd*10,x"
        #[arg(short, long, default_value = "")]
        script: String,
        /// Print one JSON record per frame
        #[arg(long)]
        trace: bool,
    },
}

/// One line of `simulate --trace` output.
#[derive(Debug, Serialize)]
struct FrameRecord {
    frame: u64,
    delta_ms: u64,
    position: [f32; 3],
    rotation: [f32; 3],
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    Ok(match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    })
}

fn simulate(config: &Config, frames: u64, script: &str, trace: bool) -> anyhow::Result<()> {
    let inputs = script::parse(script)?;
    tracing::debug!(steps = inputs.len(), frames, "starting headless simulation");

    let camera = Camera::from_config(config)?;
    let mut frame_loop = FrameLoop::new(
        config,
        camera,
        Mesh::cube(1.0),
        HeadlessDisplay::new(),
        ScriptedInput::new(inputs),
        ManualClock::new(),
    );

    let reason = if trace {
        loop {
            if let Some(reason) = frame_loop.exit_requested() {
                break reason;
            }
            if frame_loop.frames() >= frames {
                break ExitReason::FrameBudget;
            }
            let stats = frame_loop.step();
            let camera = frame_loop.camera();
            let record = FrameRecord {
                frame: stats.frame,
                delta_ms: stats.delta_ms,
                position: camera.position().to_array(),
                rotation: camera.rotation().to_array(),
            };
            println!("{}", serde_json::to_string(&record)?);
        }
    } else {
        frame_loop.run_for(frames)
    };

    print!("{}", frame_loop.display().describe());
    let camera = frame_loop.camera();
    let p = camera.position();
    let r = camera.rotation();
    println!(
        "Stopped: {reason:?} after {} frames, {:?} simulated",
        frame_loop.frames(),
        frame_loop.clock().slept()
    );
    println!(
        "Position: ({:.3}, {:.3}, {:.3})  Rotation: pitch={:.2} yaw={:.2} roll={:.2}",
        p.x, p.y, p.z, r.x, r.y, r.z
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info { config } => {
            let config = load_config(config.as_ref())?;
            println!("freelook-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", freelook_common::crate_info());
            println!("render: {}", freelook_render::crate_info());
            println!("config: {}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Simulate {
            config,
            frames,
            script,
            trace,
        } => {
            let config = load_config(config.as_ref())?;
            simulate(&config, frames, &script, trace)?;
        }
    }

    Ok(())
}

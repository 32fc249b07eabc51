mod pilot;

use std::path::PathBuf;

use anyhow::Context;
use arena_input::{InputCollector, InputEvent};
use arena_kernel::{FrameClock, GameConfig, SimEvent, Simulation};
use arena_render::{DebugTextRenderer, RenderView, Renderer};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::pilot::Autopilot;

#[derive(Parser)]
#[command(name = "arena-cli", about = "Headless driver for the arena simulation")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the default configuration as YAML
    Config,
    /// Validate a YAML configuration file
    Check {
        /// Path to the configuration file
        path: PathBuf,
    },
    /// Run a scripted session and print frames
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// YAML configuration; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(short, long, default_value = "600")]
    ticks: u64,
    /// Host frame interval in milliseconds
    #[arg(long, default_value = "16.667")]
    frame_ms: f64,
    /// Inject a one second stall every N frames (0 disables)
    #[arg(long, default_value = "0")]
    hitch_every: u64,
    /// Print a frame every N ticks (0 prints only the last)
    #[arg(short, long, default_value = "60")]
    every: u64,
    /// Fire every N frames
    #[arg(long, default_value = "6")]
    fire_every: u64,
    /// Hold the forward key while playing
    #[arg(long)]
    walk: bool,
    /// Override the session seed
    #[arg(short, long)]
    seed: Option<u64>,
    /// Rebind a control, e.g. `forward=up` (repeatable)
    #[arg(long = "bind", value_name = "CONTROL=KEY")]
    bindings: Vec<String>,
    /// Print the final frame as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("arena-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", arena_common::crate_info());
            println!("input: {}", arena_input::crate_info());
            println!("kernel: {}", arena_kernel::crate_info());
            println!("render: {}", arena_render::crate_info());
        }
        Commands::Config => {
            print!("{}", GameConfig::default().to_yaml_string()?);
        }
        Commands::Check { path } => {
            let config = GameConfig::load(&path)
                .with_context(|| format!("invalid config {}", path.display()))?;
            println!(
                "{}: OK ({} fixed targets, {} ring targets, {} enemy spawns, {} obstacles)",
                path.display(),
                config.targets.fixed.len(),
                config.targets.count,
                config.enemies.spawn_points.len(),
                config.world.obstacles.len()
            );
        }
        Commands::Run(args) => run(args)?,
    }

    Ok(())
}

fn load_config(args: &RunArgs) -> anyhow::Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.sim.seed = seed;
    }
    for spec in &args.bindings {
        config
            .input
            .bindings
            .apply_override(spec)
            .with_context(|| format!("bad --bind {spec}"))?;
    }
    Ok(config)
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let mut collector = InputCollector::new(config.input.clone());
    let mut pilot = Autopilot::new(&config.input.bindings, args.fire_every, args.walk);
    let mut sim = Simulation::new(config)?;
    let renderer = DebugTextRenderer::compact();
    let mut clock = FrameClock::new();

    collector.handle(InputEvent::LockChanged(true));
    let mut now_ms = 0.0;
    clock.advance(now_ms);

    for frame_no in 1..=args.ticks {
        now_ms += args.frame_ms;
        if args.hitch_every > 0 && frame_no % args.hitch_every == 0 {
            now_ms += 1000.0;
        }

        pilot.drive(&mut collector, &sim.frame());
        let input = collector.snapshot();
        let report = sim.tick(clock.advance(now_ms), &input);

        for event in sim.drain_events() {
            log_event(&event);
        }

        if args.every > 0 && frame_no % args.every == 0 {
            let frame = sim.frame();
            print!("{}", renderer.render(&frame, &RenderView::first_person(&frame)));
        }
        if sim.is_defeated() {
            tracing::info!(frame = frame_no, dt = report.dt, "session over");
            break;
        }
    }

    let frame = sim.frame();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    } else {
        print!("{}", renderer.render(&frame, &RenderView::first_person(&frame)));
    }
    Ok(())
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::TargetDestroyed {
            target,
            hostile,
            score,
            ..
        } => tracing::info!(id = %target.short(), hostile, score, "destroyed"),
        SimEvent::TargetsCleared { tick } => tracing::info!(tick, "all targets cleared"),
        SimEvent::PlayerDefeated { tick } => tracing::info!(tick, "game over"),
        SimEvent::EnemySpawned { enemy, .. } => tracing::info!(enemy = %enemy.short(), "enemy spawned"),
        other => tracing::debug!(?other, "event"),
    }
}

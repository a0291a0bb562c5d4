//! Orbit Sketch: runs the orbit and fan sketches headlessly.
//!
//! Run with: `cargo run -p orbit-app -- --demo all --frames 600 --trace trace.jsonl`

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use orbit_app::platform::PlatformDirs;
use orbit_app::{AppError, HoldWindow, JsonLinesSink, SketchHost, TracingSink};
use orbit_config::{CliArgs, Config};
use orbit_motion::OrbitState;
use tracing::{error, info};

fn read_snapshot(path: &Path) -> Result<OrbitState, AppError> {
    let contents = std::fs::read_to_string(path).map_err(|source| AppError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(OrbitState::from_ron(&contents)?)
}

fn write_snapshot(path: &Path, state: &OrbitState) -> Result<(), AppError> {
    let serialized = state.to_ron()?;
    let snapshot_error = |source| AppError::Snapshot {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(snapshot_error)?;
    }
    std::fs::write(path, serialized).map_err(snapshot_error)
}

fn run(args: CliArgs, dirs: PlatformDirs) -> Result<(), AppError> {
    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(&args);

    orbit_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Orbit Sketch");
    info!("  config: {}", dirs.config_dir.display());
    info!("  logs:   {}", dirs.log_dir.display());

    let mut host = SketchHost::new(&config)?;
    if let Some(ref path) = args.resume {
        let state = read_snapshot(&dirs.data_path(path))?;
        host = host.resume(state, config.host.target_fps)?;
    }
    if let Some(ref hold) = args.hold {
        host = host.with_hold(hold.parse::<HoldWindow>()?);
    }

    host.add_sink(Box::new(TracingSink::new(config.host.log_every)));
    if let Some(ref path) = args.trace {
        let path = dirs.data_path(path);
        host.add_sink(Box::new(JsonLinesSink::create(&path)?));
        info!("Tracing frames to {}", path.display());
    }

    let summary = host.run()?;
    info!(
        frames = summary.frames,
        elapsed = summary.elapsed,
        presses = summary.presses,
        "run complete"
    );

    if let Some(ref path) = args.snapshot {
        let path = dirs.data_path(path);
        match summary.orbit_state {
            Some(state) => {
                write_snapshot(&path, &state)?;
                info!("Wrote orbit snapshot to {}", path.display());
            }
            None => info!("No orbit sketch running; snapshot skipped"),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve() {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve platform directories: {e}");
            return ExitCode::FAILURE;
        }
    };
    let dirs = match args.config.clone() {
        Some(config_dir) => dirs.with_config_dir(config_dir),
        None => dirs,
    };
    if let Err(e) = dirs.create_all() {
        eprintln!("Failed to initialize platform directories: {e}");
        return ExitCode::FAILURE;
    }

    match run(args, dirs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("orbit-sketch: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Twin Arcade headless driver
//!
//! Selects a mode, drives it at 60 Hz with a scripted input pattern and prints
//! the final snapshot as JSON.
//!
//! Usage: `twin-arcade [mode] [--config path] [--frames N]`

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use twin_arcade::consts::*;
#[cfg(not(target_arch = "wasm32"))]
use twin_arcade::sim::{InputCommand, LaneCommand};
#[cfg(not(target_arch = "wasm32"))]
use twin_arcade::{LogAudioSink, ModeDispatcher, ModeId, Settings};

#[cfg(not(target_arch = "wasm32"))]
struct Args {
    mode: String,
    config: Option<String>,
    frames: u32,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        mode: "A".to_string(),
        config: None,
        frames: 60 * 60,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                args.config = Some(iter.next().ok_or("--config needs a path")?);
            }
            "--frames" => {
                let value = iter.next().ok_or("--frames needs a count")?;
                args.frames = value
                    .parse()
                    .map_err(|e| format!("bad frame count {:?}: {}", value, e))?;
            }
            other if other.starts_with("--") => return Err(format!("unknown flag {}", other)),
            other => args.mode = other.to_string(),
        }
    }
    Ok(args)
}

/// Scripted input for a frame, if any
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(mode: ModeId, frame: u32) -> Option<InputCommand> {
    match mode {
        ModeId::LaneCatch => match frame % 120 {
            0 => Some(InputCommand::Lane(LaneCommand::Left)),
            40 => Some(InputCommand::Lane(LaneCommand::Right)),
            80 => Some(InputCommand::Lane(LaneCommand::Right)),
            100 => Some(InputCommand::Lane(LaneCommand::Center)),
            _ => None,
        },
        ModeId::RunnerDodge => match frame % 150 {
            0 => Some(InputCommand::Jump),
            75 => Some(InputCommand::DuckDown),
            105 => Some(InputCommand::DuckUp),
            _ => None,
        },
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("usage: twin-arcade [mode] [--config path] [--frames N]");
            return ExitCode::FAILURE;
        }
    };

    let settings = match &args.config {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let mut dispatcher = ModeDispatcher::new(settings, Box::new(LogAudioSink));
    let Some(mode) = dispatcher.select(&args.mode) else {
        eprintln!("unknown mode {:?} (try A or B)", args.mode);
        return ExitCode::FAILURE;
    };
    log::info!("Twin Arcade (headless) running {} for {} frames", mode, args.frames);

    for frame in 0..args.frames {
        if let Some(command) = scripted_input(mode, frame) {
            dispatcher.dispatch_input(command);
        }
        if let Some(report) = dispatcher.tick(FRAME_DT, DEFAULT_PLAYFIELD_WIDTH, DEFAULT_PLAYFIELD_HEIGHT) {
            log::info!("Final score {} after {} frames", report.score, frame + 1);
            break;
        }
    }

    match serde_json::to_string_pretty(&dispatcher.snapshot()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to serialize snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a web host; there is no standalone entry point
}

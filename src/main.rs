use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use gesture_media_control::{
    AppConfig, LogDispatcher,
    pipeline::{self, ReplaySummary},
    recording::load_recording,
};

const USAGE: &str = "usage: gesture-media-control [--config PATH] RECORDING...";

struct Args {
    config: Option<PathBuf>,
    recordings: Vec<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut config = None;
    let mut recordings = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown option {flag}\n{USAGE}"),
            path => recordings.push(PathBuf::from(path)),
        }
    }

    if recordings.is_empty() {
        bail!("no recording given\n{USAGE}");
    }
    Ok(Args { config, recordings })
}

fn print_summary(path: &Path, summary: &ReplaySummary) {
    println!(
        "{}: {} frames, {} gestures",
        path.display(),
        summary.frames,
        summary.events()
    );
    for item in &summary.dispatched {
        let action = item
            .action
            .map(|action| action.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<12} {action}", item.event.label.as_str());
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args(std::env::args().skip(1))?;
    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    log::info!(
        "{} action bindings, confirm {} frames, cooldown {}ms",
        config.actions.len(),
        config.gesture.confirm_frames_pose,
        config.gesture.cooldown_ms
    );

    let mut dispatcher = LogDispatcher::new();
    for path in &args.recordings {
        let frames = load_recording(path)?;
        let summary = pipeline::replay(&frames, &config, &mut dispatcher)
            .with_context(|| format!("failed to replay {}", path.display()))?;
        print_summary(path, &summary);
    }

    log::info!("dispatched {} actions", dispatcher.dispatched());
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use vecdraft_replay::{load_script, run_script, summarize};

/// Replay a scripted pointer session and print the resulting document.
///
/// Examples:
///   vecdraft-replay session.json            # Compact JSON summary
///   vecdraft-replay session.json --pretty   # Indented JSON summary
#[derive(Parser, Debug)]
#[command(name = "vecdraft-replay", version)]
struct Args {
    /// Script file: optional options plus a list of tool and pointer steps
    script: PathBuf,

    /// Pretty-print the JSON summary
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let script = load_script(&args.script)?;
    log::info!("Replaying {} steps from {}", script.steps.len(), args.script.display());
    let canvas = run_script(&script).context("Replay stopped on an editor error")?;

    let summary = summarize(&canvas);
    let json = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{json}");
    Ok(())
}

//! Play command implementation.
//!
//! Reads engine events, one JSON object per line, and feeds them through a
//! single engine in order. Frames are recorded as they arrive; every turn
//! event produces one report.

use super::output::{JsonPlaySummary, format_report};
use super::{CliError, OutputFormat, load_config};
use rampart::snapshot::WireSnapshot;
use rampart::{ActionFrame, ArenaBoard, Tactician, TurnSnapshot};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One line of engine input.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum EngineEvent {
    /// A decision turn.
    Turn(WireSnapshot),
    /// Combat events between decision turns.
    Frame(ActionFrame),
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error on unreadable or malformed input, or if a turn aborts.
pub(crate) fn execute(
    input: &Path,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = load_config(config)?;
    let geometry = config.geometry;
    let mut engine = Tactician::new(config)?;

    let file = File::open(input)
        .map_err(|e| CliError::new(format!("Failed to open {}: {e}", input.display())))?;

    let mut summary = JsonPlaySummary::default();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = index + 1;
        let event: EngineEvent = serde_json::from_str(&line)
            .map_err(|e| CliError::new(format!("{}:{line_no}: {e}", input.display())))?;

        match event {
            EngineEvent::Frame(frame) => {
                summary.frames += 1;
                engine.on_action_frame(&frame);
            }
            EngineEvent::Turn(wire) => {
                let snapshot = TurnSnapshot::from_wire(wire, &engine.config().units)
                    .map_err(|e| CliError::new(format!("{}:{line_no}: {e}", input.display())))?;
                let mut board = ArenaBoard::from_snapshot(geometry, &snapshot);
                let report = engine.on_turn(&snapshot, &mut board)?;
                summary.add_turn(&report);

                match format {
                    OutputFormat::Text => {
                        println!("{}", format_report(&report, &engine.config().units));
                    }
                    OutputFormat::Json => {
                        let json = serde_json::to_string(&report).map_err(|e| {
                            CliError::new(format!("JSON serialization failed: {e}"))
                        })?;
                        println!("{json}");
                    }
                }
            }
        }
    }

    match format {
        OutputFormat::Text => println!(
            "{} turns, {} frames, {} units placed",
            summary.turns, summary.frames, summary.placed
        ),
        OutputFormat::Json => {
            let json = serde_json::to_string(&summary)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            eprintln!("{json}");
        }
    }

    Ok(())
}

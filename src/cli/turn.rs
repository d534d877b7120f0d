//! Turn command implementation.

use super::output::format_report;
use super::{CliError, OutputFormat, load_config};
use rampart::{ActionFrame, ArenaBoard, Tactician, TurnSnapshot};
use std::fs;
use std::path::Path;

/// Execute the turn command.
///
/// # Errors
///
/// Returns an error if an input file cannot be read or the turn aborts.
pub(crate) fn execute(
    snapshot: &Path,
    frames: Option<&Path>,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = load_config(config)?;
    let geometry = config.geometry;

    let json = fs::read_to_string(snapshot)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", snapshot.display())))?;
    let snapshot = TurnSnapshot::from_json(&json, &config.units)?;

    let frames: Vec<ActionFrame> = match frames {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| CliError::new(format!("Failed to read {}: {e}", path.display())))?;
            serde_json::from_str(&json)
                .map_err(|e| CliError::new(format!("Invalid frames in {}: {e}", path.display())))?
        }
        None => Vec::new(),
    };

    let mut engine = Tactician::new(config)?;
    for frame in &frames {
        engine.on_action_frame(frame);
    }

    let mut board = ArenaBoard::from_snapshot(geometry, &snapshot);
    let report = engine.on_turn(&snapshot, &mut board)?;

    match format {
        OutputFormat::Text => print!("{}", format_report(&report, &engine.config().units)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}

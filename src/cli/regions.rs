//! Regions command implementation.

use super::output::format_regions;
use super::{CliError, load_config};
use rampart::RegionTable;
use std::path::Path;

/// Execute the regions command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub(crate) fn execute(config: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config)?;
    let table = RegionTable::build(config.geometry)?;
    print!("{}", format_regions(&table));
    Ok(())
}

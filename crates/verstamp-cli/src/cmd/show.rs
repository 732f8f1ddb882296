//! Show command

use anyhow::{Context, Result};
use std::path::Path;

use verstamp_core::VersionRecord;

/// Print the display string of the artifact at `path`.
///
/// # Errors
///
/// Fails if the file is missing or is not a version record.
pub fn show(path: &Path) -> Result<()> {
    let record = VersionRecord::load_from(path)
        .with_context(|| format!("Failed to read version info from {}", path.display()))?;
    println!("{}", record.display_string());
    Ok(())
}

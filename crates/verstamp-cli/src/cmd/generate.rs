//! Generate command

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use verstamp_core::{GitProbe, StampConfig};

use crate::ResolveArgs;

/// Resolve the version and write the artifact to `output`.
///
/// # Errors
///
/// Fails only if the artifact cannot be written.
pub fn generate(root: PathBuf, output: PathBuf, args: &ResolveArgs) -> Result<()> {
    println!("Generating version info...");

    let config = StampConfig {
        output,
        git: GitProbe::new(&args.git).with_timeout(Duration::from_secs(args.timeout)),
        default_version: args.default_version.clone(),
        ..StampConfig::new(root)
    };

    let record = verstamp_core::generate(&config).with_context(|| {
        format!(
            "Failed to generate version info at {}",
            config.output.display()
        )
    })?;

    println!("Version: {}", record.version);
    println!("Written: {}", config.output.display());
    Ok(())
}

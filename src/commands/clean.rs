//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Landing;

/// Remove generated output
pub fn run(app: &Landing) -> Result<()> {
    if app.public_dir.exists() {
        fs::remove_dir_all(&app.public_dir)?;
        tracing::info!("Deleted: {:?}", app.public_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", app.public_dir);
    }

    Ok(())
}

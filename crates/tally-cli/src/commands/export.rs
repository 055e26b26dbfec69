//! Export command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{Database, ExportFormat};

pub fn cmd_export(db: &Database, format: &str, output: Option<&Path>) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let content = db.export_transactions(format)?;

    match output {
        Some(path) => {
            fs::write(path, content.as_bytes())
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            println!(
                "✅ Exported {} transactions to {}",
                db.count_transactions()?,
                path.display()
            );
        }
        None => print!("{}", content),
    }

    Ok(())
}

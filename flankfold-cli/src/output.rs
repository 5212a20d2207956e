use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde_json::Value;

/// Write pretty JSON to `output`, or to stdout when no path is given.
pub fn write_json(value: &Value, output: Option<&String>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")?;

    match output {
        Some(p) => {
            let mut file = File::create(Path::new(p))
                .with_context(|| format!("Failed to create output file: {}", p))?;
            file.write_all(json.as_bytes())?;
            info!("Output written to {}", p);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}

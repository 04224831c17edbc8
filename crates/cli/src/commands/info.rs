//! `info` command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use contracts::DispatcherConfig;
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::commands::resolve_config;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    name: String,
    base_path: String,
    base_path_exists: bool,
    extension: String,
    sheet_names: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sheets: Option<Vec<SheetInfo>>,
}

#[derive(Serialize)]
struct SheetInfo {
    name: String,
    size_bytes: u64,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let config = resolve_config(&args.target)?;
    info!(base_path = %config.base_path.display(), "Loading configuration info");

    let sheets = if args.sheets {
        Some(list_sheets(&config).with_context(|| {
            format!("Failed to list sheets in {}", config.base_path.display())
        })?)
    } else {
        None
    };

    let info = ConfigInfo {
        version: format!("{:?}", config.version),
        name: config.name.clone(),
        base_path: config.base_path.display().to_string(),
        base_path_exists: config.base_path.is_dir(),
        extension: config.extension.clone(),
        sheet_names: format!("{:?}", config.sheet_names),
        sheets,
    };

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&info);
    }

    Ok(())
}

/// Sheet files in the base directory, sorted by name.
///
/// A base directory that does not exist yet simply has no sheets.
fn list_sheets(config: &DispatcherConfig) -> std::io::Result<Vec<SheetInfo>> {
    if !config.base_path.is_dir() {
        return Ok(Vec::new());
    }

    let mut sheets = Vec::new();
    for entry in fs::read_dir(&config.base_path)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_extension(&path, &config.extension) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        sheets.push(SheetInfo {
            name: stem.to_string(),
            size_bytes: entry.metadata()?.len(),
        });
    }
    sheets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sheets)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

fn print_config_info(info: &ConfigInfo) {
    println!("Dispatcher: {}", info.name);
    println!("  Version:     {}", info.version);
    println!(
        "  Base path:   {}{}",
        info.base_path,
        if info.base_path_exists { "" } else { " (not created yet)" }
    );
    println!("  Extension:   {}", info.extension);
    println!("  Sheet names: {}", info.sheet_names);

    if let Some(ref sheets) = info.sheets {
        println!("\n  Sheets ({}):", sheets.len());
        for sheet in sheets {
            println!("    - {} ({} bytes)", sheet.name, sheet.size_bytes);
        }
    }
}

//! `write` command implementation.

use std::fs::File;
use std::io::{self, BufReader, Read};

use anyhow::{Context, Result};
use contracts::OutputDispatcher;
use dispatcher::{MetricsSnapshot, PerSheetOutputDispatcher};
use serde::Serialize;
use tracing::info;

use crate::cli::WriteArgs;
use crate::commands::resolve_config;
use crate::error::CliError;

/// Write result for JSON output
#[derive(Debug, Serialize)]
pub(crate) struct WriteReport {
    dispatcher: String,
    sheet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    bytes_written: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<MetricsSummary>,
}

/// Final dispatcher counters, printed once the sheet is closed
#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct MetricsSummary {
    opened: u64,
    open_failures: u64,
    closed: u64,
    close_failures: u64,
    bytes_written: u64,
    outstanding: u64,
}

impl From<MetricsSnapshot> for MetricsSummary {
    fn from(snapshot: MetricsSnapshot) -> Self {
        Self {
            opened: snapshot.opened_count,
            open_failures: snapshot.open_failure_count,
            closed: snapshot.closed_count,
            close_failures: snapshot.close_failure_count,
            bytes_written: snapshot.bytes_written,
            outstanding: snapshot.outstanding(),
        }
    }
}

/// Execute the `write` command
pub fn run_write(args: &WriteArgs) -> Result<()> {
    let report = execute_write(args, io::stdin().lock())?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize write report")?;
        println!("{}", json);
    } else {
        match &report.path {
            Some(path) => println!("✓ {} bytes -> {}", report.bytes_written, path),
            None => println!("✓ {} bytes -> sheet '{}'", report.bytes_written, report.sheet),
        }
        if let Some(m) = &report.metrics {
            println!(
                "  streams: {} opened, {} closed, {} outstanding ({} open / {} close failures)",
                m.opened, m.closed, m.outstanding, m.open_failures, m.close_failures
            );
        }
    }

    Ok(())
}

/// Resolve the dispatcher and copy `--input` (or `stdin`) into the sheet.
pub(crate) fn execute_write<R: Read>(args: &WriteArgs, stdin: R) -> Result<WriteReport> {
    let config = resolve_config(&args.target)?;

    // Checked before the sheet is opened so a typo does not truncate it
    let input = match &args.input {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::input_not_found(path.display().to_string()).into());
            }
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            Some(BufReader::new(file))
        }
        None => None,
    };

    let dispatcher = PerSheetOutputDispatcher::from_config(config);
    info!(
        sheet = %args.sheet,
        base_path = %dispatcher.base_path().display(),
        "Writing sheet"
    );

    let mut report = match input {
        Some(file) => write_sheet(&dispatcher, &args.sheet, file)?,
        None => write_sheet(&dispatcher, &args.sheet, stdin)?,
    };
    report.metrics = Some(dispatcher.metrics().into());

    Ok(report)
}

/// Copy `input` into a freshly opened sheet, then close it.
///
/// The stream is closed even when the copy fails part-way.
pub(crate) fn write_sheet<D, R>(dispatcher: &D, sheet: &str, mut input: R) -> Result<WriteReport>
where
    D: OutputDispatcher,
    R: Read,
{
    let mut stream = dispatcher
        .open_stream_for_sheet(sheet)
        .with_context(|| format!("Failed to open sheet '{sheet}'"))?;

    let copied = io::copy(&mut input, &mut stream);
    let path = stream.location().map(|p| p.display().to_string());
    let closed = dispatcher.close_stream_for_sheet(stream);

    let bytes_written =
        copied.with_context(|| format!("Failed to copy input into sheet '{sheet}'"))?;
    closed.with_context(|| format!("Failed to close sheet '{sheet}'"))?;

    Ok(WriteReport {
        dispatcher: dispatcher.name().to_string(),
        sheet: sheet.to_string(),
        path,
        bytes_written,
        metrics: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TargetArgs;
    use dispatcher::MemoryOutputDispatcher;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn write_args(base_path: &Path, input: Option<PathBuf>) -> WriteArgs {
        WriteArgs {
            sheet: "Revenue".into(),
            input,
            target: TargetArgs {
                config: None,
                base_path: Some(base_path.to_path_buf()),
                extension: None,
                strict_names: false,
            },
            json: false,
        }
    }

    #[test]
    fn test_write_sheet_to_memory() {
        let dispatcher = MemoryOutputDispatcher::default();
        let report = write_sheet(&dispatcher, "Revenue", &b"a,b\n"[..]).unwrap();

        assert_eq!(report.bytes_written, 4);
        assert!(report.path.is_none());
        assert_eq!(dispatcher.contents("Revenue").unwrap(), b"a,b\n");
        assert_eq!(dispatcher.metrics().outstanding(), 0);
    }

    #[test]
    fn test_write_sheet_to_disk() {
        let dir = tempdir().unwrap();
        let dispatcher = PerSheetOutputDispatcher::new(dir.path().join("out"));
        let report = write_sheet(&dispatcher, "Revenue", &b"a,b\n"[..]).unwrap();

        let expected = dir.path().join("out").join("Revenue.csv");
        assert_eq!(report.path, Some(expected.display().to_string()));
        assert_eq!(std::fs::read(expected).unwrap(), b"a,b\n");
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("input went away"))
        }
    }

    #[test]
    fn test_failed_copy_still_closes() {
        let dispatcher = MemoryOutputDispatcher::default();
        let err = write_sheet(&dispatcher, "Revenue", FailingReader).unwrap_err();

        assert!(format!("{err:#}").contains("input went away"));
        let metrics = dispatcher.metrics();
        assert_eq!(metrics.opened_count, 1);
        assert_eq!(metrics.closed_count, 1);
    }

    #[test]
    fn test_execute_write_from_input_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input.csv");
        std::fs::write(&input, "a,b\nc,d\n").unwrap();
        let out = dir.path().join("out");

        let report = execute_write(&write_args(&out, Some(input)), io::empty()).unwrap();

        assert_eq!(report.bytes_written, 8);
        assert_eq!(std::fs::read(out.join("Revenue.csv")).unwrap(), b"a,b\nc,d\n");
        assert_eq!(
            report.metrics,
            Some(MetricsSummary {
                opened: 1,
                open_failures: 0,
                closed: 1,
                close_failures: 0,
                bytes_written: 8,
                outstanding: 0,
            })
        );
    }

    #[test]
    fn test_execute_write_from_stdin() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");

        let report = execute_write(&write_args(&out, None), &b"x\n"[..]).unwrap();

        assert_eq!(report.bytes_written, 2);
        assert_eq!(std::fs::read(out.join("Revenue.csv")).unwrap(), b"x\n");
    }

    #[test]
    fn test_missing_input_leaves_sheet_untouched() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("Revenue.csv"), "keep\n").unwrap();
        let missing = dir.path().join("missing.csv");

        let err = execute_write(&write_args(&out, Some(missing)), io::empty()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InputNotFound { .. })
        ));
        assert_eq!(std::fs::read(out.join("Revenue.csv")).unwrap(), b"keep\n");
    }

    #[test]
    fn test_report_json_includes_metrics() {
        let dir = tempdir().unwrap();
        let report = execute_write(&write_args(dir.path(), None), &b"a\n"[..]).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["metrics"]["opened"], 1);
        assert_eq!(json["metrics"]["outstanding"], 0);
        assert!(json.get("path").is_some());
    }
}

//! Scan command - list the files a concatenation would select

use crate::cli::args::{OutputFormat, ScanArgs};
use crate::config::Config;
use crate::error::RepocatResult;
use crate::filter::{scan, FileRecord, FilterSpec, ScanMode, ScanResult};
use crate::ui::UiContext;
use console::style;

/// Execute the scan command
pub async fn execute(args: ScanArgs, config: &Config) -> RepocatResult<()> {
    let ctx = UiContext::detect();

    let (exclude, include) = config.merged_patterns(&args.filter.exclude, &args.filter.include);
    let spec = FilterSpec::new(exclude.as_slice(), include.as_slice())?;

    let quiet = args.format != OutputFormat::Table;
    let resolved = super::resolve_source(&ctx, &args.source, config, quiet).await?;

    let mode = if args.excluded {
        ScanMode::DryRun
    } else {
        ScanMode::Collect
    };
    let result = scan(&resolved.path, &spec, mode)?;

    match args.format {
        OutputFormat::Table => print_scan_table(&result, args.excluded),
        OutputFormat::Json => print_scan_json(&result, args.excluded)?,
        OutputFormat::Plain => print_scan_plain(&result, args.excluded),
    }

    Ok(())
}

fn print_scan_table(result: &ScanResult, show_excluded: bool) {
    println!("{:<60} {:>10} {:<20}", "FILE", "SIZE", "MODIFIED");
    println!("{}", "-".repeat(92));

    for file in &result.included {
        println!(
            "{:<60} {:>10} {:<20}",
            file.relative_path,
            format_size(file.size),
            modified(file)
        );
    }

    if show_excluded && !result.excluded.is_empty() {
        println!();
        println!("{:<60} {:<30}", "EXCLUDED", "REASON");
        println!("{}", "-".repeat(92));
        for file in &result.excluded {
            let reason = file
                .excluded
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_default();
            println!(
                "{:<60} {:<30}",
                style(&file.relative_path).dim(),
                style(reason).yellow()
            );
        }
    }

    println!();
    print!(
        "Total: {} file(s), {}",
        result.included.len(),
        format_size(result.included_size())
    );
    if show_excluded {
        print!(", {} excluded", result.excluded.len());
    }
    println!();
}

fn print_scan_json(result: &ScanResult, show_excluded: bool) -> RepocatResult<()> {
    #[derive(serde::Serialize)]
    struct FileJson<'a> {
        path: &'a str,
        size: u64,
        modified: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    }

    #[derive(serde::Serialize)]
    struct ScanJson<'a> {
        root: String,
        included: Vec<FileJson<'a>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        excluded: Option<Vec<FileJson<'a>>>,
    }

    fn to_json(f: &FileRecord) -> FileJson<'_> {
        FileJson {
            path: &f.relative_path,
            size: f.size,
            modified: f.modified.map(|m| m.to_rfc3339()),
            reason: f.excluded.as_ref().map(|r| r.to_string()),
        }
    }

    let json = ScanJson {
        root: result.root.display().to_string(),
        included: result.included.iter().map(to_json).collect(),
        excluded: show_excluded.then(|| result.excluded.iter().map(to_json).collect()),
    };

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_scan_plain(result: &ScanResult, show_excluded: bool) {
    for file in &result.included {
        println!("{}", file.relative_path);
    }
    if show_excluded {
        for file in &result.excluded {
            println!("-{}", file.relative_path);
        }
    }
}

fn modified(file: &FileRecord) -> String {
    file.modified
        .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Byte count with a binary unit suffix
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_size_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
    }
}

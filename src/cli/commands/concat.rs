//! Concat command - write the selected files into one document

use crate::cli::args::ConcatArgs;
use crate::config::Config;
use crate::error::RepocatResult;
use crate::filter::{scan, FilterSpec, ScanMode, ScanResult};
use crate::output::{
    estimate_tokens, output_file_name, render_concatenation, render_tree, source_label,
    write_output, TreeLine,
};
use crate::ui::{self, ConcatProgress, UiContext};
use chrono::Local;
use console::style;
use tracing::debug;

/// Excluded files are listed individually up to this many
const MAX_LISTED_EXCLUSIONS: usize = 20;

/// Execute the concat command
pub async fn execute(args: ConcatArgs, config: &Config) -> RepocatResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);
    ui::intro(&ctx, "repocat");

    let source = args.source.to_source_config().source()?;
    let (exclude, include) = config.merged_patterns(&args.filter.exclude, &args.filter.include);
    let spec = FilterSpec::new(exclude.as_slice(), include.as_slice())?;

    let resolved = super::resolve_source(&ctx, &args.source, config, false).await?;

    if args.peek {
        let preview = scan(&resolved.path, &spec, ScanMode::DryRun)?;
        print_preview(&ctx, &preview, &spec, config.output.tree_depth);

        if !ui::confirm(&ctx, "Proceed with concatenation?", false).await? {
            ui::outro_warn(&ctx, "Operation cancelled");
            return Ok(());
        }
    }

    let selection = scan(&resolved.path, &spec, ScanMode::Collect)?;
    debug!(
        "Selected {} files ({} bytes)",
        selection.included.len(),
        selection.included_size()
    );
    if selection.included.is_empty() {
        ui::step_warn(&ctx, "No files matched the current filters");
    }

    let now = Local::now();
    let progress = ConcatProgress::new(&ctx, selection.included.len());
    let document = render_concatenation(&selection.included, now, |file| {
        progress.on_file(&file.relative_path)
    });
    progress.finish();

    for skipped in &document.skipped {
        ui::step_warn(&ctx, &format!("Skipped unreadable file {}", skipped));
    }

    let output_dir = args.output.as_ref().unwrap_or(&config.output.dir);
    let file_name = output_file_name(&source_label(&source), now);
    let path = write_output(output_dir, &file_name, &document.content)?;

    if config.output.estimate_tokens && !args.no_tokens {
        ui::key_value(
            &ctx,
            "Estimated tokens",
            &estimate_tokens(&document.content).to_string(),
        );
    }
    ui::key_value(&ctx, "Total files processed", &document.files.to_string());
    ui::outro_success(&ctx, &format!("Files concatenated to: {}", path.display()));

    Ok(())
}

/// Show the tree and the dry-run selection
fn print_preview(ctx: &UiContext, preview: &ScanResult, spec: &FilterSpec, depth: usize) {
    if spec.has_user_patterns() {
        ui::section(ctx, "Filtered repository structure");
        print_tree(&render_tree(&preview.included_relative(), depth));
    } else {
        ui::section(ctx, "Repository structure");
        let all: Vec<&str> = preview
            .included_relative()
            .into_iter()
            .chain(preview.excluded_relative())
            .collect();
        print_tree(&render_tree(&all, depth));
    }

    if preview.included.is_empty() {
        ui::section(ctx, "No files would be included with current filters");
    } else {
        ui::section(
            ctx,
            &format!("Files to be included ({})", preview.included.len()),
        );
        for file in &preview.included {
            println!("  {}", file.relative_path);
        }
    }

    let excluded = preview.excluded.len();
    if excluded > MAX_LISTED_EXCLUSIONS {
        ui::section(
            ctx,
            &format!("Files excluded: {} (too many to display)", excluded),
        );
    } else if excluded > 0 {
        ui::section(ctx, &format!("Files excluded ({})", excluded));
        for file in &preview.excluded {
            println!("  {}", style(&file.relative_path).dim());
        }
    }

    println!();
    ui::remark(
        ctx,
        &format!(
            "Summary: {} files to include, {} files excluded",
            preview.included.len(),
            excluded
        ),
    );
}

fn print_tree(lines: &[TreeLine]) {
    for line in lines {
        let indent = "  ".repeat(line.depth + 1);
        if line.is_dir {
            println!("{}{}/", indent, style(&line.name).blue().bold());
        } else {
            println!("{}{}", indent, line.name);
        }
    }
}

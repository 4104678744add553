//! Cache command - manage cached repository checkouts

use crate::cache::{CacheEntry, RepoCache};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::error::RepocatResult;
use crate::output::format_age;
use crate::ui::{self, UiContext};
use chrono::{DateTime, Utc};
use console::style;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> RepocatResult<()> {
    let cache = config.repo_cache();
    let ctx = UiContext::detect();

    match args.action {
        CacheAction::List { format } => list_entries(&cache, format).await,
        CacheAction::Prune => prune_entries(&ctx, &cache).await,
        CacheAction::Clear { yes } => clear_entries(&ctx.with_auto_yes(yes), &cache).await,
        CacheAction::Path => {
            println!("{}", cache.root().display());
            Ok(())
        }
    }
}

/// List cached checkouts
async fn list_entries(cache: &RepoCache, format: OutputFormat) -> RepocatResult<()> {
    let entries = cache.entries().await?;

    if entries.is_empty() && format != OutputFormat::Json {
        println!("No cached repositories.");
        return Ok(());
    }

    let now = Utc::now();
    match format {
        OutputFormat::Table => print_entry_table(&entries, now),
        OutputFormat::Json => print_entry_json(&entries)?,
        OutputFormat::Plain => print_entry_plain(&entries),
    }

    Ok(())
}

fn print_entry_table(entries: &[CacheEntry], now: DateTime<Utc>) {
    println!("{:<50} {:<14} {:<16}", "REPOSITORY", "CACHED", "EXPIRES");
    println!("{}", "-".repeat(80));

    for entry in entries {
        let expires = if entry.is_expired_at(now) {
            style("expired".to_string()).dim().to_string()
        } else {
            style(format!("in {}", format_age(entry.remaining_at(now))))
                .green()
                .to_string()
        };

        println!(
            "{:<50} {:<14} {:<16}",
            entry.url,
            format!("{} ago", format_age(entry.age_at(now))),
            expires
        );
    }

    println!();
    println!("Total: {} cached repositories", entries.len());
}

fn print_entry_json(entries: &[CacheEntry]) -> RepocatResult<()> {
    println!("{}", serde_json::to_string_pretty(entries)?);
    Ok(())
}

fn print_entry_plain(entries: &[CacheEntry]) {
    for entry in entries {
        println!("{}", entry.url);
    }
}

/// Remove expired and orphaned entries
async fn prune_entries(ctx: &UiContext, cache: &RepoCache) -> RepocatResult<()> {
    let pruned = cache.prune().await?;

    if pruned == 0 {
        ui::step_ok(ctx, "Nothing to prune");
    } else {
        ui::step_ok(ctx, &format!("Pruned {} cache entries", pruned));
    }
    Ok(())
}

/// Remove every entry after confirmation
async fn clear_entries(ctx: &UiContext, cache: &RepoCache) -> RepocatResult<()> {
    let entries = cache.entries().await?;

    if entries.is_empty() {
        println!("No cached repositories to clear.");
        return Ok(());
    }

    println!("This will remove {} cached repositories:", entries.len());
    for entry in &entries {
        println!("  {} {}", style("•").red(), entry.url);
    }
    println!();

    if !ui::confirm(ctx, "Remove all cached repositories?", false).await? {
        println!("Aborted.");
        return Ok(());
    }

    let cleared = cache.clear().await?;
    ui::step_ok(ctx, &format!("Cleared {} cache entries", cleared));

    Ok(())
}

//! CLI command implementations

pub mod cache;
pub mod completions;
pub mod concat;
pub mod config;
pub mod scan;

pub use cache::execute as cache;
pub use completions::execute as completions;
pub use concat::execute as concat;
pub use config::execute as config;
pub use scan::execute as scan;

use crate::cli::args::SourceArgs;
use crate::config::Config;
use crate::error::{RepocatError, RepocatResult};
use crate::output::format_age;
use crate::source::{Origin, Resolved, Resolver, Source};
use crate::ui::{self, TaskSpinner, UiContext};
use chrono::Utc;

/// Resolve the selected source to a local directory, reporting progress
/// unless `quiet`.
pub(crate) async fn resolve_source(
    ctx: &UiContext,
    args: &SourceArgs,
    config: &Config,
    quiet: bool,
) -> RepocatResult<Resolved> {
    let source_config = args.to_source_config();
    let source = source_config.source()?;

    let resolver = Resolver::new(config.repo_cache(), config.git_fetcher())
        .with_cache_enabled(config.cache.enabled);

    let mut spinner = TaskSpinner::new(ctx);
    if let Source::Remote(ref url) = source {
        if !quiet {
            spinner.start(&format!("Resolving {}...", url));
        }
    }

    let resolved = match resolver.resolve(&source_config).await {
        Ok(resolved) => resolved,
        Err(e) => {
            if !quiet {
                spinner.stop_error("Could not fetch repository");
            }
            return Err(e);
        }
    };

    match (&resolved.origin, &source) {
        (Origin::Local, _) => {
            if !resolved.path.is_dir() {
                return Err(RepocatError::LocalSourceMissing {
                    path: resolved.path,
                });
            }
            if !quiet {
                ui::step_info(
                    ctx,
                    &format!("Processing local directory: {}", resolved.path.display()),
                );
            }
        }
        (Origin::Cached { cached_at }, Source::Remote(url)) if !quiet => {
            spinner.stop(&format!(
                "Using cached repository (cached {} ago): {}",
                format_age(Utc::now() - *cached_at),
                url
            ));
        }
        (Origin::Fetched, Source::Remote(url)) if !quiet => {
            spinner.stop(&format!("Cloned {}", url));
        }
        _ => {}
    }

    Ok(resolved)
}

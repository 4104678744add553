//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::RepocatResult;
use crate::ui::{self, UiContext};

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> RepocatResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => {
            init_config(&UiContext::detect(), manager, force).await?
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> RepocatResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(ctx: &UiContext, manager: &ConfigManager, force: bool) -> RepocatResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;

    ui::step_ok_detail(
        ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );

    Ok(())
}

//! Styled status lines, with bracketed prefixes when not on a terminal

use super::context::UiContext;
use console::{style, Style};

/// Severity of a status line
#[derive(Debug, Clone, Copy)]
enum Level {
    Ok,
    Warn,
    Info,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Ok => Style::new().green(),
            Self::Warn => Style::new().yellow(),
            Self::Info => Style::new().cyan(),
        }
    }
}

fn step(ctx: &UiContext, level: Level, message: &str) {
    if ctx.use_fancy_output() {
        match level {
            Level::Ok => cliclack::log::success(message).ok(),
            Level::Warn => cliclack::log::warning(message).ok(),
            Level::Info => cliclack::log::info(message).ok(),
        };
    } else {
        println!("  {} {}", level.style().apply_to(level.tag()), message);
    }
}

/// Display intro banner
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).magenta().bold()).ok();
    } else {
        println!("{}", style(title).magenta().bold());
    }
}

/// Display success outro
pub fn outro_success(ctx: &UiContext, message: &str) {
    outro(ctx, Level::Ok, message);
}

/// Display warning outro
pub fn outro_warn(ctx: &UiContext, message: &str) {
    outro(ctx, Level::Warn, message);
}

fn outro(ctx: &UiContext, level: Level, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(level.style().bold().apply_to(message)).ok();
    } else {
        println!();
        println!("{} {}", level.style().apply_to(level.tag()), message);
    }
}

/// Display a section header
pub fn section(ctx: &UiContext, title: &str) {
    println!();
    if ctx.use_fancy_output() {
        cliclack::log::info(style(title).bold()).ok();
    } else {
        println!("{}", style(title).bold());
    }
}

/// Display a success step
pub fn step_ok(ctx: &UiContext, message: &str) {
    step(ctx, Level::Ok, message);
}

/// Display a success step with detail
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    step(ctx, Level::Ok, &format!("{} ({})", message, style(detail).dim()));
}

/// Display a warning step
pub fn step_warn(ctx: &UiContext, message: &str) {
    step(ctx, Level::Warn, message);
}

/// Display a warning step with hint
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    step(ctx, Level::Warn, &format!("{} - {}", message, style(hint).dim()));
}

/// Display an info step
pub fn step_info(ctx: &UiContext, message: &str) {
    step(ctx, Level::Info, message);
}

/// Display a dimmed remark
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Print a `key: value` line
pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    if ctx.use_fancy_output() {
        println!("  {}: {}", style(key).dim(), style(value).bold());
    } else {
        println!("  {}: {}", key, value);
    }
}

use anyhow::Result;
use colored::Colorize;

use crate::descriptor::{ProcessDescriptor, ProcessFile};
use crate::units;

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    Terminal,
    Json,
}

pub fn render(file: &ProcessFile, format: ShowFormat, no_color: bool) -> Result<String> {
    match format {
        ShowFormat::Terminal => Ok(render_terminal(file, no_color)),
        ShowFormat::Json => render_json(file),
    }
}

/// The canonical model as pretty JSON, sizes in bytes and durations in
/// milliseconds.
pub fn render_json(file: &ProcessFile) -> Result<String> {
    Ok(serde_json::to_string_pretty(file)?)
}

/// Human-readable listing with humanized units.
pub fn render_terminal(file: &ProcessFile, no_color: bool) -> String {
    if no_color {
        colored::control::set_override(false);
    }
    let blocks: Vec<String> = file.apps.iter().map(format_app).collect();
    blocks.join("\n\n")
}

fn format_app(app: &ProcessDescriptor) -> String {
    let mut lines = Vec::new();
    lines.push(app.name.bold().to_string());
    lines.push(field("script", app.script.display()));
    if let Some(interpreter) = &app.interpreter {
        lines.push(field("interpreter", interpreter));
    }
    if let Some(cwd) = &app.cwd {
        lines.push(field("cwd", cwd.display()));
    }
    lines.push(field("instances", app.instances));
    lines.push(field("autorestart", on_off(app.autorestart)));
    lines.push(field("watch", on_off(app.watch)));
    if let Some(bytes) = app.max_memory_restart {
        lines.push(field("max memory", units::format_memory_size(bytes)));
    }
    for (key, value) in &app.env {
        lines.push(field("env", format!("{key}={value}")));
    }
    if let Some(path) = &app.error_file {
        lines.push(field("error log", path.display()));
    }
    if let Some(path) = &app.out_file {
        lines.push(field("out log", path.display()));
    }
    if let Some(path) = &app.log_file {
        lines.push(field("combined log", path.display()));
    }
    lines.push(field("timestamps", on_off(app.time)));
    lines.push(field("restart delay", units::format_duration_ms(app.restart_delay)));
    lines.push(field("max restarts", app.max_restarts));
    lines.push(field("min uptime", units::format_duration_ms(app.min_uptime)));
    lines.join("\n")
}

fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<14} {}", label.dimmed(), value)
}

fn on_off(value: bool) -> String {
    if value {
        "on".green().to_string()
    } else {
        "off".to_string()
    }
}

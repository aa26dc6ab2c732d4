use colored::Colorize;
use std::path::Path;

/// Starter process file, embedded at compile time.
const STARTER_FILE: &str = include_str!("../templates/procdef.toml");

pub fn run_init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let label = if path.exists() { "overwrote" } else { "created" };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, STARTER_FILE)?;

    eprintln!("  {} {}", label.green(), path.display());
    eprintln!();
    eprintln!("Edit {} to describe your processes, then:", path.display());
    eprintln!("  procdef check {}", path.display());

    Ok(())
}

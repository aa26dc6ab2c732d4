use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use procdef::cli::{Cli, Commands};
use procdef::descriptor::ProcessFile;
use procdef::{init, loader, output};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => {
            args.validate()?;
            let file = loader::load_path(&args.file)
                .with_context(|| format!("invalid process file {}", args.file.display()))?;
            if args.strict {
                strict_checks(&file)?;
            }
            for app in &file.apps {
                println!("  {} {}", "ok".green(), app.name);
            }
            println!(
                "{}",
                format!("{} valid app(s) in {}", file.apps.len(), args.file.display()).bold()
            );
        }
        Commands::Show(args) => {
            args.validate()?;
            let mut file = loader::load_path(&args.file)
                .with_context(|| format!("invalid process file {}", args.file.display()))?;
            if let Some(name) = &args.app {
                file.apps.retain(|a| &a.name == name);
                if file.apps.is_empty() {
                    anyhow::bail!("no app named `{name}` in {}", args.file.display());
                }
            }
            let rendered = output::render(&file, args.render_format(), args.no_color)?;
            println!("{rendered}");
        }
        Commands::Init(args) => {
            init::run_init(&args.path, args.force)?;
        }
    }

    Ok(())
}

fn strict_checks(file: &ProcessFile) -> Result<()> {
    for app in &file.apps {
        app.validate_paths()
            .with_context(|| format!("app `{}`", app.name))?;
    }
    Ok(())
}

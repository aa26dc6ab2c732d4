use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::output::ShowFormat;

#[derive(Parser, Debug)]
#[command(name = "procdef")]
#[command(about = "Load, validate, and inspect declarative process files for a supervisor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a process file for schema and validation errors
    Check(CheckArgs),

    /// Print the normalized descriptors from a process file
    Show(ShowArgs),

    /// Write a commented starter process file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Process file to check (TOML, JSON, or YAML)
    #[arg(required = true)]
    pub file: PathBuf,

    /// Also require script and cwd paths to exist on disk
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Process file to show (TOML, JSON, or YAML)
    #[arg(required = true)]
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "terminal")]
    pub format: ShowFormatArg,

    /// Only show the app with this name
    #[arg(long, value_name = "NAME")]
    pub app: Option<String>,

    /// Disable colored terminal output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to write the starter file
    #[arg(default_value = "procdef.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ShowFormatArg {
    Terminal,
    Json,
}

impl CheckArgs {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.file.exists() {
            anyhow::bail!("process file does not exist: {}", self.file.display());
        }
        Ok(())
    }
}

impl ShowArgs {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.file.exists() {
            anyhow::bail!("process file does not exist: {}", self.file.display());
        }
        Ok(())
    }

    pub fn render_format(&self) -> ShowFormat {
        match self.format {
            ShowFormatArg::Terminal => ShowFormat::Terminal,
            ShowFormatArg::Json => ShowFormat::Json,
        }
    }
}

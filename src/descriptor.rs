//! The process descriptor: the static record describing one supervised
//! process. Descriptors are built once by the loader and never mutated;
//! the external supervisor interprets the restart policy fields, this
//! crate only carries them.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::ValidationError;

pub const DEFAULT_INSTANCES: u32 = 1;
pub const DEFAULT_MAX_RESTARTS: u32 = 16;
pub const DEFAULT_RESTART_DELAY_MS: u64 = 0;
pub const DEFAULT_MIN_UPTIME_MS: u64 = 1000;

/// One supervised process. Field names match the on-disk keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    /// Unique label for the managed process.
    pub name: String,

    /// Entry point to execute, relative to `cwd` unless absolute.
    pub script: PathBuf,

    /// Runtime binary used to execute the script. None means the script
    /// is executed directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,

    /// Execution root. None leaves the choice to the supervisor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    /// Number of parallel copies to run.
    pub instances: u32,

    /// Restart on unexpected exit.
    pub autorestart: bool,

    /// Restart when watched files change.
    pub watch: bool,

    /// Memory ceiling in bytes triggering a forced restart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_memory_restart: Option<u64>,

    /// Environment variables injected at launch.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Where stderr is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_file: Option<PathBuf>,

    /// Where stdout is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_file: Option<PathBuf>,

    /// Combined stdout/stderr log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Timestamp log lines.
    pub time: bool,

    /// Milliseconds to pause before each restart attempt.
    pub restart_delay: u64,

    /// Restart attempts allowed before giving up.
    pub max_restarts: u32,

    /// Milliseconds a process must stay up to count as started.
    pub min_uptime: u64,
}

impl ProcessDescriptor {
    /// A descriptor with the given identity and every policy field at its
    /// default.
    pub fn new(name: String, script: PathBuf) -> Self {
        Self {
            name,
            script,
            interpreter: None,
            cwd: None,
            instances: DEFAULT_INSTANCES,
            autorestart: true,
            watch: false,
            max_memory_restart: None,
            env: BTreeMap::new(),
            error_file: None,
            out_file: None,
            log_file: None,
            time: false,
            restart_delay: DEFAULT_RESTART_DELAY_MS,
            max_restarts: DEFAULT_MAX_RESTARTS,
            min_uptime: DEFAULT_MIN_UPTIME_MS,
        }
    }

    /// Check the per-descriptor invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if self.script.as_os_str().is_empty() {
            return Err(ValidationError::new("script", "must not be empty"));
        }
        if self.instances < 1 {
            return Err(ValidationError::new("instances", "must be at least 1"));
        }
        Ok(())
    }

    /// Check that `script` and `cwd` actually exist on disk. Used by
    /// `check --strict`; a process file can legitimately describe paths
    /// that only exist on the deployment host, so this is opt-in.
    pub fn validate_paths(&self) -> Result<(), ValidationError> {
        if let Some(cwd) = &self.cwd {
            if !cwd.is_dir() {
                return Err(ValidationError::new(
                    "cwd",
                    format!("directory does not exist: {}", cwd.display()),
                ));
            }
        }
        let script = self.resolved_script();
        if !script.is_file() {
            return Err(ValidationError::new(
                "script",
                format!("file does not exist: {}", script.display()),
            ));
        }
        Ok(())
    }

    /// The script path joined onto `cwd` when relative.
    pub fn resolved_script(&self) -> PathBuf {
        resolve(&self.script, self.cwd.as_deref())
    }

    /// The configured log paths, joined onto `cwd` when relative.
    pub fn resolved_log_paths(&self) -> Vec<PathBuf> {
        [&self.error_file, &self.out_file, &self.log_file]
            .into_iter()
            .flatten()
            .map(|p| resolve(p, self.cwd.as_deref()))
            .collect()
    }
}

/// A loaded process file: one or more descriptors plus where they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessFile {
    pub apps: Vec<ProcessDescriptor>,
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl ProcessFile {
    /// Validate every descriptor and the cross-app invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for app in &self.apps {
            app.validate().map_err(|e| {
                ValidationError::new(format!("{}.{}", app.name, e.field), e.reason)
            })?;
            if !seen.insert(app.name.clone()) {
                return Err(ValidationError::new(
                    "name",
                    format!("duplicate process name `{}`", app.name),
                ));
            }
        }
        Ok(())
    }

    /// Find a descriptor by process name.
    pub fn get(&self, name: &str) -> Option<&ProcessDescriptor> {
        self.apps.iter().find(|a| a.name == name)
    }
}

fn resolve(path: &Path, cwd: Option<&Path>) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match cwd {
        Some(cwd) => cwd.join(path),
        None => path.to_path_buf(),
    }
}

/// Expand a leading `~/` to `$HOME`.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if path_str.starts_with("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(format!("{}{}", home, &path_str[1..]));
        }
    }
    path.to_path_buf()
}

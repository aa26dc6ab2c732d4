//! Loading and canonicalization of process files.
//!
//! The raw on-disk model is deliberately permissive: required fields are
//! `Option` so a missing `script` surfaces as a named [`SchemaError`]
//! rather than an opaque deserializer message, integers deserialize signed
//! so negative policy values surface as [`ValidationError`]s, and the unit
//! fields accept either canonical integers or suffixed strings. Unknown
//! keys are rejected. Every load validates before returning, so a
//! [`ProcessFile`] in hand is always well-formed.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::descriptor::{
    expand_tilde, ProcessDescriptor, ProcessFile, DEFAULT_INSTANCES, DEFAULT_MAX_RESTARTS,
    DEFAULT_MIN_UPTIME_MS, DEFAULT_RESTART_DELAY_MS,
};
use crate::error::{Result, SchemaError, ValidationError};
use crate::units;

/// Source formats recognized by [`load_path`], chosen by file extension.
/// Anything without a `.json`/`.yaml`/`.yml` extension is treated as TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Toml,
    Json,
    Yaml,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => SourceFormat::Json,
            Some("yaml") | Some("yml") => SourceFormat::Yaml,
            _ => SourceFormat::Toml,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProcessFile {
    #[serde(default)]
    apps: Vec<RawApp>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawApp {
    name: Option<String>,
    script: Option<PathBuf>,
    interpreter: Option<String>,
    cwd: Option<PathBuf>,
    instances: Option<i64>,
    autorestart: Option<bool>,
    watch: Option<bool>,
    max_memory_restart: Option<BytesValue>,
    #[serde(default)]
    env: BTreeMap<String, String>,
    error_file: Option<PathBuf>,
    out_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
    time: Option<bool>,
    restart_delay: Option<i64>,
    max_restarts: Option<i64>,
    min_uptime: Option<MillisValue>,
}

/// A byte count: already-canonical integer or a suffixed string ("512M").
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BytesValue {
    Count(i64),
    Text(String),
}

/// A millisecond count: already-canonical integer or a suffixed string ("10s").
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MillisValue {
    Count(i64),
    Text(String),
}

/// Load and validate a process file from disk.
pub fn load_path(path: &Path) -> Result<ProcessFile> {
    let content = fs::read_to_string(path).map_err(|e| SchemaError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut file = from_str(&content, SourceFormat::from_path(path))?;
    file.source = Some(path.to_path_buf());
    log::info!(
        "loaded {} app(s) from {}",
        file.apps.len(),
        path.display()
    );
    Ok(file)
}

/// Parse and validate a process file from a string in the given format.
pub fn from_str(content: &str, format: SourceFormat) -> Result<ProcessFile> {
    let raw: RawProcessFile = match format {
        SourceFormat::Toml => toml::from_str(content).map_err(SchemaError::ParseToml)?,
        SourceFormat::Json => serde_json::from_str(content).map_err(SchemaError::ParseJson)?,
        SourceFormat::Yaml => serde_yml::from_str(content).map_err(SchemaError::ParseYaml)?,
    };
    canonicalize(raw)
}

pub fn from_toml_str(content: &str) -> Result<ProcessFile> {
    from_str(content, SourceFormat::Toml)
}

pub fn from_json_str(content: &str) -> Result<ProcessFile> {
    from_str(content, SourceFormat::Json)
}

pub fn from_yaml_str(content: &str) -> Result<ProcessFile> {
    from_str(content, SourceFormat::Yaml)
}

fn canonicalize(raw: RawProcessFile) -> Result<ProcessFile> {
    if raw.apps.is_empty() {
        return Err(SchemaError::NoApps.into());
    }

    let mut apps = Vec::with_capacity(raw.apps.len());
    for (index, raw_app) in raw.apps.into_iter().enumerate() {
        apps.push(canonicalize_app(raw_app, index)?);
    }

    let file = ProcessFile { apps, source: None };
    file.validate()?;
    Ok(file)
}

fn canonicalize_app(raw: RawApp, index: usize) -> Result<ProcessDescriptor> {
    let label = raw
        .name
        .clone()
        .unwrap_or_else(|| format!("apps[{index}]"));

    let name = raw.name.ok_or(SchemaError::MissingField {
        app: label.clone(),
        field: "name",
    })?;
    let script = raw.script.ok_or(SchemaError::MissingField {
        app: label,
        field: "script",
    })?;

    let max_memory_restart = match raw.max_memory_restart {
        None => None,
        Some(BytesValue::Count(n)) => Some(unsigned(n, "max_memory_restart")?),
        Some(BytesValue::Text(s)) => Some(units::parse_memory_size(&s)?),
    };

    let min_uptime = match raw.min_uptime {
        None => DEFAULT_MIN_UPTIME_MS,
        Some(MillisValue::Count(n)) => unsigned(n, "min_uptime")?,
        Some(MillisValue::Text(s)) => units::parse_duration_ms(&s)?,
    };

    Ok(ProcessDescriptor {
        name,
        script: expand_tilde(&script),
        interpreter: raw.interpreter,
        cwd: raw.cwd.map(|p| expand_tilde(&p)),
        instances: unsigned_u32(
            raw.instances.unwrap_or(DEFAULT_INSTANCES as i64),
            "instances",
        )?,
        autorestart: raw.autorestart.unwrap_or(true),
        watch: raw.watch.unwrap_or(false),
        max_memory_restart,
        env: raw.env,
        error_file: raw.error_file.map(|p| expand_tilde(&p)),
        out_file: raw.out_file.map(|p| expand_tilde(&p)),
        log_file: raw.log_file.map(|p| expand_tilde(&p)),
        time: raw.time.unwrap_or(false),
        restart_delay: unsigned(
            raw.restart_delay.unwrap_or(DEFAULT_RESTART_DELAY_MS as i64),
            "restart_delay",
        )?,
        max_restarts: unsigned_u32(
            raw.max_restarts.unwrap_or(DEFAULT_MAX_RESTARTS as i64),
            "max_restarts",
        )?,
        min_uptime,
    })
}

fn unsigned(value: i64, field: &str) -> std::result::Result<u64, ValidationError> {
    u64::try_from(value)
        .map_err(|_| ValidationError::new(field, "must be a non-negative integer"))
}

fn unsigned_u32(value: i64, field: &str) -> std::result::Result<u32, ValidationError> {
    u32::try_from(value)
        .map_err(|_| ValidationError::new(field, "must be a non-negative integer"))
}

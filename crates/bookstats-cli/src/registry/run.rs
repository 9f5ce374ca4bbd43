use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::BookstatsConfig;

use super::{RegistryError, RegistryResult};

/// Metadata captured when a run starts.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    pub books: usize,
    pub authors: usize,
    pub config: BookstatsConfig,
}

#[derive(Debug, Serialize)]
struct RunConfig<'a> {
    run_id: &'a str,
    started_at: String,
    books: usize,
    authors: usize,
    config: &'a BookstatsConfig,
    git: GitInfo,
}

#[derive(Debug, Serialize)]
struct GitInfo {
    commit: Option<String>,
    dirty: Option<bool>,
}

/// Artifact locations inside one run directory.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub logs_path: PathBuf,
    pub generation_report_path: PathBuf,
    pub reports_path: PathBuf,
    pub database_path: PathBuf,
    pub csv_dir: PathBuf,
}

impl RunPaths {
    fn new(root: PathBuf) -> Self {
        Self {
            config_path: root.join("config.json"),
            logs_path: root.join("logs.ndjson"),
            generation_report_path: root.join("generation_report.json"),
            reports_path: root.join("reports.json"),
            database_path: root.join("books.sqlite3"),
            csv_dir: root.join("csv"),
            root,
        }
    }
}

/// Create `<run_dir>/<timestamp>__run_<id>/` with `config.json` and an empty log file.
pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));
    create_dir_all(&root)?;

    let paths = RunPaths::new(root);
    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        books: ctx.books,
        authors: ctx.authors,
        config: &ctx.config,
        git: collect_git_info(),
    };
    write_json(&paths.config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.logs_path)?;

    Ok(paths)
}

/// Write `value` as pretty JSON, replacing any previous content.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> RegistryResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}

fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::infra::export::csv::default_export_dir;

pub const DATA_DIR_ENV: &str = "TAHFIDZ_DATA_DIR";
pub const PAGE_SIZE_ENV: &str = "TAHFIDZ_PAGE_SIZE";
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub page_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };
        let page_size = parse_page_size(std::env::var(PAGE_SIZE_ENV).ok().as_deref())?;
        let export_dir = default_export_dir().unwrap_or_else(|| data_dir.join("exports"));

        Ok(Self {
            data_dir,
            export_dir,
            page_size,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("storage.sqlite")
    }

    pub fn webview_data_dir(&self) -> Result<PathBuf> {
        ensure_webview_data_dir(&self.data_dir)
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("id", "tahfidz", "tahfidz-admin")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_local_dir().to_path_buf())
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn parse_page_size(raw: Option<&str>) -> Result<usize> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PAGE_SIZE),
        Some(value) => {
            let size: usize = value
                .parse()
                .with_context(|| format!("{PAGE_SIZE_ENV} must be a positive integer: {value}"))?;
            if size == 0 {
                anyhow::bail!("{PAGE_SIZE_ENV} must be greater than zero")
            }
            Ok(size)
        }
    }
}

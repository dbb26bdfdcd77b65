use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::UserDirs;

/// `<filename>.csv` inside `dir`, without doubling an existing `.csv` suffix.
pub fn csv_file_path(dir: &Path, filename: &str) -> PathBuf {
    let trimmed = filename.trim();
    let stem = if trimmed.is_empty() { "export" } else { trimmed };
    if stem.to_ascii_lowercase().ends_with(".csv") {
        dir.join(stem)
    } else {
        dir.join(format!("{stem}.csv"))
    }
}

pub fn write_csv_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export dir: {}", parent.display()))?;
    }
    std::fs::write(path, text.as_bytes())
        .with_context(|| format!("failed to write csv: {}", path.display()))
}

pub fn default_export_dir() -> Option<PathBuf> {
    let dirs = UserDirs::new()?;
    dirs.download_dir()
        .map(Path::to_path_buf)
        .or_else(|| Some(dirs.home_dir().to_path_buf()))
}

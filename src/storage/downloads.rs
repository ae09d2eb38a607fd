use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    WriteError(#[from] std::io::Error),
    #[error("Failed to open {path}: {reason}")]
    OpenError { path: PathBuf, reason: String },
}

/// File name suggested by a `Content-Disposition` header, if any.
pub fn file_name_from_disposition(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim().eq_ignore_ascii_case("filename").then(|| value.trim().trim_matches('"').to_string())
        })
        .and_then(|name| sanitize_file_name(&name))
}

/// Reduces `name` to a single safe path component.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.').to_string();

    (!cleaned.is_empty()).then_some(cleaned)
}

/// Writes `bytes` into `dir`, never overwriting an existing file.
pub fn save_export(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;

    let name = sanitize_file_name(file_name).unwrap_or_else(|| "export.ics".to_string());
    let path = unique_path(dir, &name);
    std::fs::write(&path, bytes)?;

    tracing::info!("Saved export ({} bytes) to {}", bytes.len(), path.display());
    Ok(path)
}

pub fn open_with_system(path: &Path) -> Result<(), ExportError> {
    let opener = if cfg!(target_os = "macos") { "open" } else { "xdg-open" };
    tracing::info!("Opening {} with {}", path.display(), opener);

    Command::new(opener)
        .arg(path)
        .spawn()
        .map(|_| ())
        .map_err(|e| ExportError::OpenError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    (1..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{}-{}.{}", stem, n, ext)),
            None => dir.join(format!("{}-{}", stem, n)),
        })
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

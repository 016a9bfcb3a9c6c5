use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Read the request body file. A missing file is an empty body.
pub fn read_body(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(body) => Ok(body),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read body file {}", path.display())),
    }
}

/// Make sure the body file exists so an editor can open it.
pub fn ensure_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    if !path.exists() {
        fs::write(path, "").with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Write the last response body to `path`, replacing any previous content.
pub fn save_response(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = body.len(), "response saved");
    Ok(())
}

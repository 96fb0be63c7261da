use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// `$CAIXA_HOME`, or `~/.caixa`
pub fn caixa_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("CAIXA_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".caixa"))
}

pub fn ensure_caixa_home() -> Result<PathBuf> {
    let dir = caixa_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

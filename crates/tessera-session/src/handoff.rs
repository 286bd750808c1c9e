use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tessera_config::WindowManagerConfig;
use tracing::info;

/// Where the assembled configuration is written for the host to pick up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handoff {
    Stdout,
    File(PathBuf),
}

impl Handoff {
    pub fn new(output: Option<PathBuf>) -> Self {
        output.map_or(Handoff::Stdout, Handoff::File)
    }

    pub fn write(&self, config: &WindowManagerConfig) -> Result<()> {
        let json = to_json(config)?;

        match self {
            Handoff::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", json).context("Failed to write configuration to stdout")?;
            }
            Handoff::File(path) => write_atomically(path, &json)?,
        }

        Ok(())
    }
}

pub fn to_json(config: &WindowManagerConfig) -> Result<String> {
    serde_json::to_string_pretty(config).context("Failed to serialize configuration")
}

/// Write through a sibling temp file so the host never reads a partial file
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).with_context(|| format!("Failed to write {:?}", tmp))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to move {:?} into place", tmp))?;

    info!("Wrote configuration to {:?}", path);
    Ok(())
}

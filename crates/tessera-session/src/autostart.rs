use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Run the autostart script and wait for it.
///
/// A missing script is not an error. Scripts without the executable bit are
/// run through `sh`. Returns whether anything ran.
pub fn run(path: &Path) -> Result<bool> {
    if !path.exists() {
        debug!("No autostart script at {:?}", path);
        return Ok(false);
    }

    info!("Running autostart script {:?}", path);

    let status = command_for(path)
        .status()
        .with_context(|| format!("Failed to run autostart script {:?}", path))?;

    if !status.success() {
        bail!("Autostart script {:?} exited with {}", path, status);
    }

    Ok(true)
}

fn command_for(path: &Path) -> Command {
    if is_executable(path) {
        Command::new(path)
    } else {
        let mut command = Command::new("sh");
        command.arg(path);
        command
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::command::Command;

pub fn applications_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir)
        .join("applications")
}

pub fn desktop_entry(command: Command, exe: &Path) -> String {
    format!(
        "[Desktop Entry]\n\
         Name=[Stiler] {name}\n\
         Exec={exe} {name}\n\
         Type=Application\n\
         Comment={comment}\n\
         GenericName={comment}\n",
        name = command.name(),
        exe = exe.display(),
        comment = command.description(),
    )
}

/// Writes a launcher for every window operation into `dir`.
pub fn write_desktop_entries(dir: &Path, exe: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::new();
    for command in Command::ALL
        .into_iter()
        .filter(|command| command.needs_window_system())
    {
        tracing::info!("Creating a .desktop file for {}", command);
        let path = dir.join(format!("tiler_op_{}.desktop", command.name()));
        fs::write(&path, desktop_entry(command, exe))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

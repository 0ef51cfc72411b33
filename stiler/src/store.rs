use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::WindowLists;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LayoutChoiceRecord {
    layout: String,
}

/// JSON files holding the window lists and the last layout choice.
///
/// Loading never fails: a missing or unreadable file is empty state.
/// Saving replaces the whole file through a rename.
#[derive(Debug, Clone)]
pub struct StateStore {
    window_lists_path: PathBuf,
    layout_path: PathBuf,
}

impl StateStore {
    /// The layout choice is kept next to `state_file` as `<stem>_last_layout.json`.
    pub fn new(state_file: &Path) -> Self {
        let stem = state_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "winlist".to_string());
        let layout_path = state_file.with_file_name(format!("{}_last_layout.json", stem));

        Self {
            window_lists_path: state_file.to_path_buf(),
            layout_path,
        }
    }

    pub fn load_window_lists(&self) -> WindowLists {
        load_json(&self.window_lists_path).unwrap_or_default()
    }

    pub fn load_layout_choice(&self) -> Option<String> {
        load_json::<LayoutChoiceRecord>(&self.layout_path).map(|record| record.layout)
    }

    /// Writes the window lists and, when given, the layout choice.
    ///
    /// Both files are staged before either is replaced, and the window lists
    /// are replaced last, so a failure leaves the previous state on disk.
    pub fn save(&self, lists: &WindowLists, layout: Option<&str>) -> Result<()> {
        let mut staged = Vec::with_capacity(2);

        if let Some(layout) = layout {
            let record = LayoutChoiceRecord {
                layout: layout.to_string(),
            };
            staged.push(stage_json(&self.layout_path, &record)?);
        }
        match stage_json(&self.window_lists_path, lists) {
            Ok(file) => staged.push(file),
            Err(e) => {
                discard(&staged);
                return Err(e);
            }
        }

        for (i, (tmp, path)) in staged.iter().enumerate() {
            if let Err(e) = fs::rename(tmp, path) {
                discard(&staged[i..]);
                return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
            }
        }
        Ok(())
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let buf = match fs::read_to_string(path) {
        Ok(buf) => buf,
        Err(e) => {
            tracing::debug!("No state at {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&buf) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring unreadable state file {}: {}", path.display(), e);
            None
        }
    }
}

/// Writes `value` next to `path` and returns the temporary and final paths.
fn stage_json<T: Serialize>(path: &Path, value: &T) -> Result<(PathBuf, PathBuf)> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let tmp = path.with_extension("tmp");
    let json = serde_json::to_string(value)?;
    fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
    Ok((tmp, path.to_path_buf()))
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        if let Err(e) = fs::remove_file(tmp) {
            tracing::debug!("Could not remove {}: {}", tmp.display(), e);
        }
    }
}

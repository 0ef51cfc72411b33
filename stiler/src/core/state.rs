use std::collections::{BTreeMap, HashSet};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{DesktopId, WindowId};

/// Merges the previous ordering of a desktop with the windows seen now.
///
/// Windows that survived keep their previous relative order, so the master
/// slot stays with the same window across invocations. Newly seen windows
/// are appended in enumeration order. When there is no previous ordering, or
/// the set of windows is unchanged, `current` is returned as is.
pub fn reconcile(previous: &[WindowId], current: &[WindowId]) -> Vec<WindowId> {
    let previous_ids: HashSet<WindowId> = previous.iter().copied().collect();
    let current_ids: HashSet<WindowId> = current.iter().copied().collect();

    if previous.is_empty() || previous_ids == current_ids {
        return current.to_vec();
    }

    // Keep windows that still exist
    let mut windows: Vec<WindowId> = previous
        .iter()
        .copied()
        .filter(|id| current_ids.contains(id))
        .collect();

    // Append new windows
    windows.extend(current.iter().copied().filter(|id| !previous_ids.contains(id)));

    windows
}

/// Drops every window the predicate rejects, keeping order.
pub fn retain_valid(
    windows: Vec<WindowId>,
    mut is_valid: impl FnMut(WindowId) -> Result<bool>,
) -> Result<Vec<WindowId>> {
    let mut valid = Vec::with_capacity(windows.len());
    for id in windows {
        if is_valid(id)? {
            valid.push(id);
        } else {
            tracing::debug!("Skipping window {}", id);
        }
    }
    Ok(valid)
}

/// Last arranged window order, per desktop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowLists(BTreeMap<DesktopId, Vec<WindowId>>);

impl WindowLists {
    pub fn get(&self, desktop: DesktopId) -> &[WindowId] {
        self.0.get(&desktop).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the list of one desktop; other desktops are left untouched.
    pub fn replace(&mut self, desktop: DesktopId, windows: Vec<WindowId>) {
        self.0.insert(desktop, windows);
    }
}

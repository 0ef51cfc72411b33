use std::collections::BTreeMap;

use stiler_layout::{Padding, ScreenGeometry};

use super::WindowId;

/// Virtual desktop number as reported by the window manager.
///
/// Sticky windows live on desktop `-1`.
pub type DesktopId = i32;

/// Windows per desktop, in the order the window manager listed them.
pub type WindowEnumeration = BTreeMap<DesktopId, Vec<WindowId>>;

/// The active desktop and its work area, before padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSnapshot {
    pub active_desktop: DesktopId,
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenSnapshot {
    pub fn usable_area(&self, padding: &Padding) -> ScreenGeometry {
        ScreenGeometry::from_work_area(
            self.origin_x,
            self.origin_y,
            self.width,
            self.height,
            padding,
        )
    }
}

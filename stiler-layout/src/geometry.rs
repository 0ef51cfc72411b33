use serde::{Deserialize, Serialize};

/// Target rectangle for a single window, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Converts fractional geometry into pixels.
    ///
    /// Every coordinate is truncated toward zero, the same rule used for every
    /// ratio-derived width, and sizes are clamped at zero.
    pub fn from_f64(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: x.trunc() as i32,
            y: y.trunc() as i32,
            width: width.max(0.0).trunc() as u32,
            height: height.max(0.0).trunc() as u32,
        }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }
}

/// Global screen padding, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

/// The usable desktop area once padding has been subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenGeometry {
    pub origin_x: i32,
    pub origin_y: i32,
    pub max_width: i32,
    pub max_height: i32,
}

impl ScreenGeometry {
    pub fn new(origin_x: i32, origin_y: i32, max_width: i32, max_height: i32) -> Self {
        Self {
            origin_x,
            origin_y,
            max_width,
            max_height,
        }
    }

    /// Shrinks a raw work area by the configured padding.
    pub fn from_work_area(x: i32, y: i32, width: i32, height: i32, padding: &Padding) -> Self {
        Self {
            origin_x: x + padding.left,
            origin_y: y + padding.top,
            max_width: width - padding.left - padding.right,
            max_height: height - padding.top - padding.bottom,
        }
    }
}

/// Space reserved around every window for the window manager's chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationInsets {
    pub title_height: i32,
    pub border_width: i32,
}

impl DecorationInsets {
    pub fn new(title_height: i32, border_width: i32) -> Self {
        Self {
            title_height,
            border_width,
        }
    }

    /// Title bar plus one border, subtracted from every window height.
    pub fn vertical(&self) -> i32 {
        self.title_height + self.border_width
    }
}

/// Current position and size of a window as reported by the window system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowFrame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WindowFrame {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

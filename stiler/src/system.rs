use anyhow::Result;
use stiler_layout::{Rect, WindowFrame};

use crate::core::{ScreenSnapshot, WindowEnumeration, WindowId};

/// Everything stiler needs from the running window manager.
///
/// Queries are synchronous; any failure aborts the current invocation.
pub trait WindowSystem {
    fn screen(&self) -> Result<ScreenSnapshot>;

    fn windows(&self) -> Result<WindowEnumeration>;

    fn active_window(&self) -> Result<Option<WindowId>>;

    /// False for docks, desktops, utility windows and minimized windows.
    fn is_valid_window(&self, window_id: WindowId) -> Result<bool>;

    fn frame(&self, window_id: WindowId) -> Result<WindowFrame>;

    fn move_resize(&mut self, window_id: WindowId, rect: Rect) -> Result<()>;

    fn raise(&mut self, window_id: WindowId) -> Result<()>;
}

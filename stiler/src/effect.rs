use stiler_layout::{Rect, Strategy};

use crate::core::{DesktopId, WindowId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    MoveWindow { window_id: WindowId, rect: Rect },
    RaiseWindow { window_id: WindowId },
}

/// The window order an arrangement settled on, persisted once its moves
/// have all been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    pub desktop: DesktopId,
    pub windows: Vec<WindowId>,
    pub strategy: Strategy,
}

#[derive(Debug, Default)]
pub struct CommandResult {
    pub effects: Vec<Effect>,
    pub arrangement: Option<Arrangement>,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn ok_with_effects(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            arrangement: None,
        }
    }

    pub fn arranged(effects: Vec<Effect>, arrangement: Arrangement) -> Self {
        Self {
            effects,
            arrangement: Some(arrangement),
        }
    }
}

use std::fmt;
use std::str::FromStr;

use stiler_layout::Placement;

/// Operations that can be named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place(Placement),
    Maximize,
    MaxAll,
    Simple,
    SimpleCol,
    Vertical,
    Horizontal,
    Swap,
    SwapGrid,
    /// Rotates the reconciled window list. When the same windows are open as
    /// last time, the rotation starts again from the window manager's order.
    Cycle,
    Anticycle,
    CreateDesktops,
    Help,
    Version,
}

impl Command {
    pub const ALL: [Command; 22] = [
        Command::Place(Placement::Top),
        Command::Place(Placement::Middle),
        Command::Place(Placement::Bottom),
        Command::Place(Placement::TopLeft),
        Command::Place(Placement::TopRight),
        Command::Place(Placement::BottomLeft),
        Command::Place(Placement::BottomRight),
        Command::Place(Placement::Left),
        Command::Place(Placement::Right),
        Command::Maximize,
        Command::MaxAll,
        Command::Simple,
        Command::SimpleCol,
        Command::Vertical,
        Command::Horizontal,
        Command::Swap,
        Command::SwapGrid,
        Command::Cycle,
        Command::Anticycle,
        Command::CreateDesktops,
        Command::Help,
        Command::Version,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Place(placement) => placement.name(),
            Command::Maximize => "maximize",
            Command::MaxAll => "max_all",
            Command::Simple => "simple",
            Command::SimpleCol => "simple_col",
            Command::Vertical => "vertical",
            Command::Horizontal => "horizontal",
            Command::Swap => "swap",
            Command::SwapGrid => "swap_grid",
            Command::Cycle => "cycle",
            Command::Anticycle => "anticycle",
            Command::CreateDesktops => "create_desktops",
            Command::Help => "help",
            Command::Version => "version",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Place(Placement::Top) => "Place the active window along the top of the screen",
            Command::Place(Placement::Middle) => "Place the active window in the middle of the screen",
            Command::Place(Placement::Bottom) => {
                "Place the active window along the bottom of the screen"
            }
            Command::Place(Placement::TopLeft) => {
                "Place the active window in the top left corner of the screen"
            }
            Command::Place(Placement::TopRight) => {
                "Place the active window in the top right corner of the screen"
            }
            Command::Place(Placement::BottomLeft) => {
                "Place the active window in the bottom left corner of the screen"
            }
            Command::Place(Placement::BottomRight) => {
                "Place the active window in the bottom right corner of the screen"
            }
            Command::Place(Placement::Left) => "Place the active window on the left of the screen",
            Command::Place(Placement::Right) => "Place the active window on the right of the screen",
            Command::Maximize => "Maximize the active window",
            Command::MaxAll => "Maximize all windows",
            Command::Simple => "Tile with one master window and the others stacked at the side",
            Command::SimpleCol => "Tile with one master window and the others in columns at the side",
            Command::Vertical => "Tile all windows side by side",
            Command::Horizontal => "Tile all windows on top of each other",
            Command::Swap => "Swap the active window into the master slot",
            Command::SwapGrid => "Swap the active window with the largest window",
            Command::Cycle => "Cycle all windows through the master slot",
            Command::Anticycle => "Cycle all windows through the master slot in reverse",
            Command::CreateDesktops => "Create .desktop launchers for every operation",
            Command::Help => "Display usage information",
            Command::Version => "Display version information",
        }
    }

    /// Whether the operation touches windows, and therefore needs X.
    pub fn needs_window_system(self) -> bool {
        !matches!(
            self,
            Command::CreateDesktops | Command::Help | Command::Version
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| format!("Unrecognized option: {}", s))
    }
}

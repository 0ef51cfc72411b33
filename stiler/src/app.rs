use anyhow::Result;
use stiler_layout::{
    layout, LayoutParams, Placement, PlacementParams, Rect, Strategy, WidthTables, WindowFrame,
};

use crate::command::Command;
use crate::config::Config;
use crate::core::{
    reconcile, retain_valid, ScreenSnapshot, WindowEnumeration, WindowId, WindowLists,
};
use crate::effect::{Arrangement, CommandResult, Effect};
use crate::error::StilerError;
use crate::layout::LayoutState;
use crate::store::StateStore;
use crate::system::WindowSystem;

/// How the window list is reordered before a layout is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reorder {
    Keep,
    PromoteActive,
    Cycle,
    Anticycle,
}

/// One invocation: screen state and persisted state are read once, then any
/// number of operations are planned and applied.
pub struct App<S: WindowSystem> {
    system: S,
    config: Config,
    tables: WidthTables,
    store: StateStore,
    screen: ScreenSnapshot,
    layout_params: LayoutParams,
    placement_params: PlacementParams,
    enumeration: WindowEnumeration,
    window_lists: WindowLists,
    layout_state: LayoutState,
}

impl<S: WindowSystem> App<S> {
    pub fn new(system: S, config: Config, store: StateStore) -> Result<Self> {
        let config = config.validated()?;
        let tables = config.width_tables()?;

        let screen = system.screen()?;
        let enumeration = system.windows()?;

        let geometry = screen.usable_area(&config.padding());
        let layout_params = LayoutParams {
            screen: geometry,
            decoration: config.decoration(),
            master_factor: config.mw_factor,
        };
        let placement_params = PlacementParams {
            screen: geometry,
            decoration: config.decoration(),
            padding: config.padding(),
            monitors: config.monitors,
        };

        let window_lists = store.load_window_lists();
        let layout_state = LayoutState::new(store.load_layout_choice());

        tracing::debug!(
            "Desktop {} usable area {:?}",
            screen.active_desktop,
            geometry
        );

        Ok(Self {
            system,
            config,
            tables,
            store,
            screen,
            layout_params,
            placement_params,
            enumeration,
            window_lists,
            layout_state,
        })
    }

    pub fn run(&mut self, command: Command) -> Result<()> {
        tracing::debug!("Running {}", command);
        let result = self.plan(command)?;
        self.apply(result)
    }

    fn plan(&self, command: Command) -> Result<CommandResult> {
        match command {
            Command::Place(placement) => self.place(placement),
            Command::Maximize => self.maximize(),
            Command::SwapGrid => self.swap_grid(),
            Command::Simple => self.arrange(Strategy::MasterStack, Reorder::Keep),
            Command::SimpleCol => self.arrange(Strategy::MasterColumns, Reorder::Keep),
            Command::Vertical => self.arrange(Strategy::EqualVerticals, Reorder::PromoteActive),
            Command::Horizontal => {
                self.arrange(Strategy::EqualHorizontals, Reorder::PromoteActive)
            }
            Command::MaxAll => self.arrange(Strategy::MaximizeAll, Reorder::PromoteActive),
            Command::Swap => self.arrange(
                self.layout_state.last_layout_or_default(),
                Reorder::PromoteActive,
            ),
            Command::Cycle => {
                self.arrange(self.layout_state.last_layout_or_default(), Reorder::Cycle)
            }
            Command::Anticycle => self.arrange(
                self.layout_state.last_layout_or_default(),
                Reorder::Anticycle,
            ),
            Command::CreateDesktops | Command::Help | Command::Version => {
                tracing::debug!("{} does not touch any window", command);
                Ok(CommandResult::ok())
            }
        }
    }

    /// Applies every effect, then persists. Nothing is written if an effect fails.
    fn apply(&mut self, result: CommandResult) -> Result<()> {
        for effect in &result.effects {
            match effect {
                Effect::MoveWindow { window_id, rect } => {
                    self.system.move_resize(*window_id, *rect)?
                }
                Effect::RaiseWindow { window_id } => self.system.raise(*window_id)?,
            }
        }

        if let Some(arrangement) = result.arrangement {
            let mut window_lists = self.window_lists.clone();
            window_lists.replace(arrangement.desktop, arrangement.windows);

            let strategy = arrangement.strategy;
            let layout = strategy.records_choice().then(|| strategy.name());
            self.store.save(&window_lists, layout)?;

            self.window_lists = window_lists;
            if layout.is_some() {
                self.layout_state.record_layout(strategy);
                tracing::info!("Persisted last used layout: {}", strategy);
            }
        }

        Ok(())
    }

    fn is_valid(&self, window_id: WindowId) -> Result<bool> {
        if !self.config.window_filter {
            return Ok(true);
        }
        self.system.is_valid_window(window_id)
    }

    fn active_window(&self) -> Result<Option<WindowId>> {
        match self.system.active_window()? {
            Some(id) if self.is_valid(id)? => Ok(Some(id)),
            _ => Ok(None),
        }
    }

    /// Window order for the active desktop, reconciled with the last run.
    fn window_list(&self) -> Result<Vec<WindowId>> {
        let desktop = self.screen.active_desktop;
        let current = self
            .enumeration
            .get(&desktop)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let windows = reconcile(self.window_lists.get(desktop), current);
        retain_valid(windows, |id| self.is_valid(id))
    }

    fn arrange(&self, strategy: Strategy, reorder: Reorder) -> Result<CommandResult> {
        let desktop = self.screen.active_desktop;
        let mut windows = self.window_list()?;
        if windows.is_empty() {
            tracing::warn!("{}", StilerError::EmptyWindowSet { desktop });
            return Ok(CommandResult::ok());
        }

        match reorder {
            Reorder::Keep => {}
            Reorder::PromoteActive => {
                if let Some(active) = self.active_window()? {
                    if let Some(index) = windows.iter().position(|id| *id == active) {
                        let id = windows.remove(index);
                        windows.insert(0, id);
                    }
                }
            }
            Reorder::Cycle => windows.rotate_right(1),
            Reorder::Anticycle => windows.rotate_left(1),
        }

        let rects = layout(strategy, windows.len(), &self.layout_params);
        let effects = windows
            .iter()
            .zip(rects)
            .map(|(window_id, rect)| Effect::MoveWindow {
                window_id: *window_id,
                rect,
            })
            .collect();

        Ok(CommandResult::arranged(
            effects,
            Arrangement {
                desktop,
                windows,
                strategy,
            },
        ))
    }

    fn place(&self, placement: Placement) -> Result<CommandResult> {
        let Some(active) = self.active_window()? else {
            tracing::warn!("No active window to place {}", placement);
            return Ok(CommandResult::ok());
        };

        let frame = self.system.frame(active)?;
        let rect = placement.rect(&frame, &self.placement_params, &self.tables);

        Ok(CommandResult::ok_with_effects(vec![
            Effect::MoveWindow {
                window_id: active,
                rect,
            },
            Effect::RaiseWindow { window_id: active },
        ]))
    }

    fn maximize(&self) -> Result<CommandResult> {
        let Some(active) = self.active_window()? else {
            tracing::warn!("No active window to maximize");
            return Ok(CommandResult::ok());
        };

        let screen = &self.layout_params.screen;
        let rect = Rect::from_f64(
            self.config.left_padding as f64,
            self.config.top_padding as f64,
            screen.max_width as f64,
            (screen.max_height - self.layout_params.decoration.vertical()) as f64,
        );

        Ok(CommandResult::ok_with_effects(vec![
            Effect::MoveWindow {
                window_id: active,
                rect,
            },
            Effect::RaiseWindow { window_id: active },
        ]))
    }

    /// Swaps the frames of the active window and the largest window.
    fn swap_grid(&self) -> Result<CommandResult> {
        let Some(active) = self.active_window()? else {
            tracing::warn!("No active window to swap");
            return Ok(CommandResult::ok());
        };

        let windows = self.window_list()?;
        let Some(&first) = windows.first() else {
            tracing::warn!(
                "{}",
                StilerError::EmptyWindowSet {
                    desktop: self.screen.active_desktop
                }
            );
            return Ok(CommandResult::ok());
        };

        let mut largest = first;
        let mut max_area = 0;
        for &window_id in &windows {
            let area = self.system.frame(window_id)?.area();
            if area > max_area {
                max_area = area;
                largest = window_id;
            }
        }

        if largest == active {
            tracing::debug!("Active window {} is already the largest", active);
            return Ok(CommandResult::ok());
        }

        let decoration = &self.layout_params.decoration;
        let half_border = decoration.border_width as f64 / 2.0;
        let title = decoration.title_height as f64;
        let active_frame = self.system.frame(active)?;
        let largest_frame = self.system.frame(largest)?;

        // xwininfo reports the client area, so step back out of the decoration
        let onto = |frame: &WindowFrame| {
            Rect::from_f64(
                frame.x as f64 - half_border,
                frame.y as f64 - half_border - title,
                frame.width as f64,
                frame.height as f64,
            )
        };

        Ok(CommandResult::ok_with_effects(vec![
            Effect::MoveWindow {
                window_id: active,
                rect: onto(&largest_frame),
            },
            Effect::MoveWindow {
                window_id: largest,
                rect: onto(&active_frame),
            },
            Effect::RaiseWindow { window_id: active },
        ]))
    }

    #[cfg(test)]
    fn system(&self) -> &S {
        &self.system
    }
}

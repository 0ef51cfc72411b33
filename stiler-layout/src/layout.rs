use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{DecorationInsets, Rect, ScreenGeometry};
use crate::width::master_width_in_pixels;

/// The closed set of multi-window arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One master window on the left, the rest stacked on the right.
    #[default]
    MasterStack,
    /// One master window on the left, the rest side by side as columns.
    MasterColumns,
    EqualVerticals,
    EqualHorizontals,
    /// Every window covers the whole usable area.
    MaximizeAll,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::MasterStack,
        Strategy::MasterColumns,
        Strategy::EqualVerticals,
        Strategy::EqualHorizontals,
        Strategy::MaximizeAll,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::MasterStack => "master_stack",
            Strategy::MasterColumns => "master_columns",
            Strategy::EqualVerticals => "equal_verticals",
            Strategy::EqualHorizontals => "equal_horizontals",
            Strategy::MaximizeAll => "maximize_all",
        }
    }

    /// Whether using this strategy replaces the remembered layout choice.
    ///
    /// Maximize-all stacks windows on top of each other and is never replayed.
    pub fn records_choice(self) -> bool {
        !matches!(self, Strategy::MaximizeAll)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| format!("unknown layout strategy: {}", s))
    }
}

/// Everything a layout needs besides the window count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub screen: ScreenGeometry,
    pub decoration: DecorationInsets,
    pub master_factor: f64,
}

/// Computes one rectangle per window; `rects[i]` belongs to `windows[i]`.
pub fn layout(strategy: Strategy, window_count: usize, params: &LayoutParams) -> Vec<Rect> {
    if window_count == 0 {
        return vec![];
    }

    let rects = match strategy {
        Strategy::MasterStack => master_stack(window_count, params),
        Strategy::MasterColumns => master_columns(window_count, params),
        Strategy::EqualVerticals => equal_verticals(window_count, params),
        Strategy::EqualHorizontals => equal_horizontals(window_count, params),
        Strategy::MaximizeAll => maximize_all(window_count, params),
    };

    tracing::debug!("{} layout for {} windows: {:?}", strategy, window_count, rects);
    rects
}

fn full_rect(params: &LayoutParams) -> Rect {
    let screen = &params.screen;
    Rect::from_f64(
        screen.origin_x as f64,
        screen.origin_y as f64,
        screen.max_width as f64,
        (screen.max_height - params.decoration.vertical()) as f64,
    )
}

fn master_rect(params: &LayoutParams) -> Rect {
    let screen = &params.screen;
    Rect::from_f64(
        screen.origin_x as f64,
        screen.origin_y as f64,
        master_width_in_pixels(params.master_factor, screen) as f64,
        (screen.max_height - params.decoration.vertical()) as f64,
    )
}

/// Left edge of the area right of the master window.
fn stack_origin_x(params: &LayoutParams) -> f64 {
    let screen = &params.screen;
    let border = params.decoration.border_width as f64;
    screen.origin_x as f64 + (screen.max_width as f64 * params.master_factor + 2.0 * border).trunc()
}

fn master_stack(window_count: usize, params: &LayoutParams) -> Vec<Rect> {
    let rows = window_count - 1;
    if rows == 0 {
        return vec![full_rect(params)];
    }

    let screen = &params.screen;
    let title = params.decoration.title_height as f64;
    let border = params.decoration.border_width as f64;
    let max_width = screen.max_width as f64;
    let row_height = screen.max_height as f64 / rows as f64;

    let x = stack_origin_x(params);
    let width = (max_width * (1.0 - params.master_factor) - 2.0 * border).trunc();
    let height = (row_height - title - border).trunc();

    let mut rects = Vec::with_capacity(window_count);
    rects.push(master_rect(params));
    for row in 0..rows {
        let y = screen.origin_y as f64 + (row_height * row as f64).trunc();
        rects.push(Rect::from_f64(x, y, width, height));
    }
    rects
}

fn master_columns(window_count: usize, params: &LayoutParams) -> Vec<Rect> {
    let columns = window_count - 1;
    if columns == 0 {
        return vec![full_rect(params)];
    }

    let screen = &params.screen;
    let border = params.decoration.border_width as f64;
    let max_width = screen.max_width as f64;

    let x0 = stack_origin_x(params);
    let y = screen.origin_y as f64;
    let height = (screen.max_height - params.decoration.vertical()) as f64;
    let width = (max_width * (1.0 - params.master_factor) / columns as f64 - 2.0 * border).trunc();

    let mut rects = Vec::with_capacity(window_count);
    rects.push(master_rect(params));
    for column in 0..columns {
        let x = x0 + (width + border) * column as f64;
        rects.push(Rect::from_f64(x, y, width, height));
    }
    rects
}

fn equal_verticals(window_count: usize, params: &LayoutParams) -> Vec<Rect> {
    let screen = &params.screen;
    let width = (screen.max_width as f64 / window_count as f64).trunc();
    let height = (screen.max_height - params.decoration.vertical()) as f64;

    (0..window_count)
        .map(|n| {
            let x = screen.origin_x as f64 + width * n as f64;
            Rect::from_f64(x, screen.origin_y as f64, width, height)
        })
        .collect()
}

fn equal_horizontals(window_count: usize, params: &LayoutParams) -> Vec<Rect> {
    let screen = &params.screen;
    let row_height = screen.max_height as f64 / window_count as f64;
    let height = (row_height - params.decoration.vertical() as f64).trunc();

    (0..window_count)
        .map(|n| {
            let y = screen.origin_y as f64 + (row_height * n as f64).trunc();
            Rect::from_f64(screen.origin_x as f64, y, screen.max_width as f64, height)
        })
        .collect()
}

fn maximize_all(window_count: usize, params: &LayoutParams) -> Vec<Rect> {
    vec![full_rect(params); window_count]
}

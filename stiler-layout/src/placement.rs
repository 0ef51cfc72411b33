use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{DecorationInsets, Padding, Rect, ScreenGeometry, WindowFrame};
use crate::width::{next_width, WidthTables};

/// Single-window placements on a 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Top,
    Middle,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Center,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Top,
    Full,
    Bottom,
}

impl Placement {
    pub const ALL: [Placement; 9] = [
        Placement::Top,
        Placement::Middle,
        Placement::Bottom,
        Placement::TopLeft,
        Placement::TopRight,
        Placement::BottomLeft,
        Placement::BottomRight,
        Placement::Left,
        Placement::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::Middle => "middle",
            Placement::Bottom => "bottom",
            Placement::TopLeft => "top_left",
            Placement::TopRight => "top_right",
            Placement::BottomLeft => "bottom_left",
            Placement::BottomRight => "bottom_right",
            Placement::Left => "left",
            Placement::Right => "right",
        }
    }

    fn column(self) -> Column {
        match self {
            Placement::Top | Placement::Middle | Placement::Bottom => Column::Center,
            Placement::TopLeft | Placement::BottomLeft | Placement::Left => Column::Left,
            Placement::TopRight | Placement::BottomRight | Placement::Right => Column::Right,
        }
    }

    fn row(self) -> Row {
        match self {
            Placement::Top | Placement::TopLeft | Placement::TopRight => Row::Top,
            Placement::Middle | Placement::Left | Placement::Right => Row::Full,
            Placement::Bottom | Placement::BottomLeft | Placement::BottomRight => Row::Bottom,
        }
    }

    /// Next rectangle for a window currently at `frame`.
    ///
    /// Invoking the same placement again on the result steps the width to the
    /// next entry of the corner or center table.
    pub fn rect(self, frame: &WindowFrame, params: &PlacementParams, tables: &WidthTables) -> Rect {
        let border = params.decoration.border_width as f64;
        let segment = params.segment_width();
        let screen = &params.screen;
        let decoration = &params.decoration;

        let (x, width) = match self.column() {
            Column::Center => {
                let width =
                    (next_width(&tables.center, frame.width, screen, decoration) as f64) + border;
                let x = params.next_origin_x(frame.x, (segment - width) / 2.0) + border / 4.0;
                (x, width)
            }
            Column::Left => {
                let width = next_width(&tables.corner, frame.width, screen, decoration) as f64;
                (params.next_origin_x(frame.x, 0.0), width)
            }
            Column::Right => {
                let width = next_width(&tables.corner, frame.width, screen, decoration) as f64;
                let padding = (params.padding.left + params.padding.right) as f64;
                let x = params.next_origin_x(frame.x, segment - width) - padding / border;
                (x, width)
            }
        };

        let (y, height) = match self.row() {
            Row::Top => (params.top_origin_y(), params.half_height()),
            Row::Full => (params.top_origin_y(), params.full_height()),
            Row::Bottom => (params.bottom_origin_y(), params.half_height()),
        };

        Rect::from_f64(x, y, width, height)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Placement::ALL
            .into_iter()
            .find(|placement| placement.name() == s)
            .ok_or_else(|| format!("unknown placement: {}", s))
    }
}

/// Screen context for single-window placements.
///
/// `border_width` is used as a divisor by the padding corrections and must be
/// non-zero; `monitors` must be at least one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementParams {
    pub screen: ScreenGeometry,
    pub decoration: DecorationInsets,
    pub padding: Padding,
    pub monitors: u32,
}

impl PlacementParams {
    /// Width of one horizontal monitor segment.
    pub fn segment_width(&self) -> f64 {
        self.screen.max_width as f64 / f64::from(self.monitors.max(1))
    }

    /// X origin that docks a window against its monitor segment.
    ///
    /// `offset` is the distance from the segment's left edge the window wants.
    /// An offset that would leave less than one border of the segment is
    /// treated as "already full" and the window is docked at the left edge
    /// of the segment instead.
    pub fn next_origin_x(&self, current_x: i32, offset: f64) -> f64 {
        let segment = self.segment_width();
        let last = f64::from(self.monitors.max(1) - 1);
        let index = if segment > 0.0 {
            (current_x as f64 / segment).floor().clamp(0.0, last)
        } else {
            0.0
        };
        let segment_x = self.screen.origin_x as f64 + index * segment;

        if offset < segment - self.decoration.border_width as f64 {
            segment_x + offset
        } else {
            segment_x
        }
    }

    pub fn top_origin_y(&self) -> f64 {
        self.screen.origin_y as f64 - self.padding.top as f64 / self.border()
    }

    pub fn bottom_origin_y(&self) -> f64 {
        self.screen.max_height as f64 / 2.0 + self.screen.origin_y as f64 + self.border() / 2.0
            - self.padding.bottom as f64 / self.border()
    }

    /// Window height for the top and bottom rows.
    pub fn half_height(&self) -> f64 {
        self.screen.max_height as f64 / 2.0 - self.decoration.vertical() as f64
    }

    pub fn full_height(&self) -> f64 {
        (self.screen.max_height - self.decoration.vertical()) as f64
    }

    fn border(&self) -> f64 {
        self.decoration.border_width as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(monitors: u32) -> PlacementParams {
        PlacementParams {
            screen: ScreenGeometry::new(0, 0, 1000, 800),
            decoration: DecorationInsets::new(20, 2),
            padding: Padding {
                top: 4,
                bottom: 4,
                left: 3,
                right: 3,
            },
            monitors,
        }
    }

    fn tables() -> WidthTables {
        WidthTables::from_seeds(&[0.25, 0.5], 1, 0.0).unwrap()
    }

    fn frame(x: i32, width: u32) -> WindowFrame {
        WindowFrame {
            x,
            y: 100,
            width,
            height: 300,
        }
    }

    #[test]
    fn test_vertical_origins() {
        let p = params(1);
        assert_eq!(p.top_origin_y(), -2.0);
        // 400 + 0 + 1 - 2
        assert_eq!(p.bottom_origin_y(), 399.0);
        assert_eq!(p.half_height(), 378.0);
        assert_eq!(p.full_height(), 778.0);
    }

    #[test]
    fn test_next_origin_x_docks_within_segment() {
        let p = params(2);
        assert_eq!(p.segment_width(), 500.0);

        // Left segment
        assert_eq!(p.next_origin_x(10, 0.0), 0.0);
        assert_eq!(p.next_origin_x(10, 250.0), 250.0);
        // Right segment
        assert_eq!(p.next_origin_x(600, 0.0), 500.0);
        assert_eq!(p.next_origin_x(600, 250.0), 750.0);
    }

    #[test]
    fn test_next_origin_x_full_boundary() {
        let p = params(2);
        // Exactly segment minus one border counts as full
        assert_eq!(p.next_origin_x(10, 498.0), 0.0);
        assert_eq!(p.next_origin_x(10, 497.9), 497.9);
        assert_eq!(p.next_origin_x(600, 498.0), 500.0);
    }

    #[test]
    fn test_next_origin_x_clamps_segment_index() {
        let p = params(2);
        assert_eq!(p.next_origin_x(-50, 0.0), 0.0);
        assert_eq!(p.next_origin_x(5000, 10.0), 510.0);

        let p = params(3);
        assert_eq!(p.next_origin_x(700, 0.0), 2.0 * (1000.0 / 3.0));
    }

    #[test]
    fn test_left_cycles_corner_widths() {
        let p = params(1);
        let t = tables();
        assert_eq!(t.corner.ratios(), &[0.25, 0.5, 0.75]);

        let first = Placement::Left.rect(&frame(400, 100), &p, &t);
        // 0.1 snaps to 0.25 and steps to 0.5 of 996
        assert_eq!(first, Rect::new(0, -2, 498, 778));

        let second = Placement::Left.rect(&frame(first.x, first.width), &p, &t);
        assert_eq!(second.width, 747);

        let third = Placement::Left.rect(&frame(second.x, second.width), &p, &t);
        assert_eq!(third.width, 249);
    }

    #[test]
    fn test_right_docks_to_right_edge() {
        let p = params(1);
        let rect = Placement::Right.rect(&frame(0, 100), &p, &tables());
        // 1000 - 498 - (3 + 3) / 2
        assert_eq!(rect, Rect::new(499, -2, 498, 778));
        assert_eq!(rect.right(), 997);
    }

    #[test]
    fn test_bottom_right_corner() {
        let p = params(1);
        let rect = Placement::BottomRight.rect(&frame(0, 498), &p, &tables());
        assert_eq!(rect, Rect::new(250, 399, 747, 378));
    }

    #[test]
    fn test_top_center() {
        let p = params(1);
        let t = tables();
        assert_eq!(t.center.ratios(), &[0.5, 1.0]);

        // 0.1 snaps to 0.5 and steps to the full width plus one border
        let wide = Placement::Top.rect(&frame(0, 100), &p, &t);
        assert_eq!(wide, Rect::new(1, -2, 998, 378));

        // Half width, centred: (1000 - 500) / 2 + 2 / 4
        let half = Placement::Top.rect(&frame(wide.x, wide.width), &p, &t);
        assert_eq!(half, Rect::new(250, -2, 500, 378));
    }

    #[test]
    fn test_middle_and_bottom_heights() {
        let p = params(1);
        let t = tables();
        let middle = Placement::Middle.rect(&frame(0, 100), &p, &t);
        assert_eq!((middle.y, middle.height), (-2, 778));

        let bottom = Placement::Bottom.rect(&frame(0, 100), &p, &t);
        assert_eq!((bottom.y, bottom.height), (399, 378));
    }

    #[test]
    fn test_placement_names_round_trip() {
        for placement in Placement::ALL {
            assert_eq!(placement.name().parse::<Placement>(), Ok(placement));
        }
        assert!("center".parse::<Placement>().is_err());
    }
}

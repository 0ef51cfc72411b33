use crate::geometry::{DecorationInsets, ScreenGeometry};

/// Ratios are compared and deduplicated at two decimal digits.
const PRECISION: f64 = 100.0;

pub fn round2(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}

fn precision_key(value: f64) -> i64 {
    (value * PRECISION).round() as i64
}

/// Ascending, duplicate-free list of screen width ratios.
///
/// Repeatedly asking for the [`next`](WidthTable::next) ratio of a window
/// walks through every entry and wraps around.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthTable {
    ratios: Vec<f64>,
}

impl WidthTable {
    /// Returns `None` when no finite ratio is given.
    pub fn new(ratios: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut ratios: Vec<f64> = ratios.into_iter().filter(|r| r.is_finite()).collect();
        ratios.sort_by(f64::total_cmp);
        ratios.dedup_by_key(|r| precision_key(*r));

        if ratios.is_empty() {
            None
        } else {
            Some(Self { ratios })
        }
    }

    pub fn ratios(&self) -> &[f64] {
        &self.ratios
    }

    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }

    /// Entry closest to `current`; on a tie the smaller ratio wins.
    pub fn nearest(&self, current: f64) -> f64 {
        self.ratios[self.nearest_index(current)]
    }

    /// Entry following the one nearest to `current`, wrapping at the end.
    pub fn next(&self, current: f64) -> f64 {
        let index = self.nearest_index(current);
        self.ratios[(index + 1) % self.ratios.len()]
    }

    fn nearest_index(&self, current: f64) -> usize {
        self.ratios
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (*a - current).abs();
                let db = (*b - current).abs();
                da.total_cmp(&db).then(a.total_cmp(b))
            })
            .map(|(index, _)| index)
            .unwrap_or(0)
    }
}

/// The two tables used by single-window placements.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthTables {
    /// Used by left/right edges and the four corners.
    pub corner: WidthTable,
    /// Used by the full-width top/middle/bottom placements.
    pub center: WidthTable,
}

impl WidthTables {
    /// Derives both tables from the configured seed ratios.
    ///
    /// Corner widths are the seeds plus their mirror images. Center widths are
    /// what is left between two mirrored corners, plus the full width. Both
    /// are then divided across `monitors` and shifted by `adjustment`.
    pub fn from_seeds(seeds: &[f64], monitors: u32, adjustment: f64) -> Option<Self> {
        let corner_base = WidthTable::new(
            seeds
                .iter()
                .copied()
                .chain(seeds.iter().map(|w| round2((1.0 - w).abs()))),
        )?;

        let center_base = WidthTable::new(
            corner_base
                .ratios()
                .iter()
                .filter(|w| **w < 0.5)
                .map(|w| round2((w * 2.0 - 1.0).abs()))
                .chain(std::iter::once(1.0)),
        )?;

        let monitors = f64::from(monitors.max(1));
        let spread = |table: &WidthTable| {
            WidthTable::new(
                table
                    .ratios()
                    .iter()
                    .map(|w| round2(w / monitors) + adjustment),
            )
        };

        let tables = Self {
            corner: spread(&corner_base)?,
            center: spread(&center_base)?,
        };
        tracing::debug!("corner widths: {:?}", tables.corner.ratios());
        tracing::debug!("center widths: {:?}", tables.center.ratios());
        Some(tables)
    }
}

/// Pixel width of `ratio` for corner and edge placements.
///
/// Fractions are truncated toward zero, like every other ratio conversion.
pub fn width_in_pixels(ratio: f64, screen: &ScreenGeometry, decoration: &DecorationInsets) -> i32 {
    ((screen.max_width - 2 * decoration.border_width) as f64 * ratio).trunc() as i32
}

/// Pixel width of `ratio` for the master column.
pub fn master_width_in_pixels(ratio: f64, screen: &ScreenGeometry) -> i32 {
    (screen.max_width as f64 * ratio).trunc() as i32
}

/// Width a window of `current_width` pixels steps to on the next invocation.
pub fn next_width(
    table: &WidthTable,
    current_width: u32,
    screen: &ScreenGeometry,
    decoration: &DecorationInsets,
) -> i32 {
    let active = if screen.max_width > 0 {
        f64::from(current_width) / screen.max_width as f64
    } else {
        0.0
    };
    width_in_pixels(table.next(active), screen, decoration)
}

pub mod geometry;
pub mod layout;
pub mod placement;
pub mod width;

pub use geometry::{DecorationInsets, Padding, Rect, ScreenGeometry, WindowFrame};
pub use layout::{layout, LayoutParams, Strategy};
pub use placement::{Placement, PlacementParams};
pub use width::{WidthTable, WidthTables};

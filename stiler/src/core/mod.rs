mod display;
mod state;
mod window;

pub use display::*;
pub use state::*;
pub use window::*;

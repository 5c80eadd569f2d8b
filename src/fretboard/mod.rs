//! Fretboard view
//!
//! Static grid of fret and string lines plus the pointer-to-cell mapping.

mod layout;
mod render;

pub use layout::{Fretboard, Position};
pub use render::draw_fretboard;

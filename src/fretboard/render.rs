//! Fretboard drawing

use macroquad::prelude::*;
use super::layout::Fretboard;

// Colors
const WOOD_COLOR: Color = Color::new(139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0, 1.0);
const FRET_COLOR: Color = Color::new(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 1.0);
const STRING_COLOR: Color = Color::new(220.0 / 255.0, 220.0 / 255.0, 220.0 / 255.0, 1.0);

const FRET_THICKNESS: f32 = 3.0;
const STRING_THICKNESS: f32 = 2.0;

/// Draw the full board: background, frets, then strings on top
pub fn draw_fretboard(board: &Fretboard) {
    clear_background(WOOD_COLOR);

    let w = board.width() as f32;
    let h = board.height() as f32;

    for x in board.fret_lines() {
        draw_line(x, 0.0, x, h, FRET_THICKNESS, FRET_COLOR);
    }

    for y in board.string_lines() {
        draw_line(0.0, y, w, y, STRING_THICKNESS, STRING_COLOR);
    }
}

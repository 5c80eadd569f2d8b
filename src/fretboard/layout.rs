//! Fretboard geometry and hit testing

/// A string/fret pair on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub string: usize,
    pub fret: usize,
}

/// Fixed grid over the window.
///
/// Cell sizes are integer divisions of the window size: one extra row and
/// column beyond the strings and frets, so lines never sit on the far edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fretboard {
    width: u32,
    height: u32,
    strings: usize,
    fret_count: usize,
    string_spacing: u32,
    fret_spacing: u32,
}

impl Fretboard {
    pub fn new(width: u32, height: u32, strings: usize, fret_count: usize) -> Self {
        Self {
            width,
            height,
            strings,
            fret_count,
            string_spacing: height / (strings as u32 + 1),
            fret_spacing: width / (fret_count as u32 + 1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Vertical distance between string rows (pixels)
    pub fn string_spacing(&self) -> u32 {
        self.string_spacing
    }

    /// Horizontal distance between frets (pixels)
    pub fn fret_spacing(&self) -> u32 {
        self.fret_spacing
    }

    /// X coordinate of every fret line, fret 0 first
    pub fn fret_lines(&self) -> impl Iterator<Item = f32> + '_ {
        (0..=self.fret_count).map(move |fret| (fret as u32 * self.fret_spacing) as f32)
    }

    /// Y coordinate of every string line, lowest string first
    pub fn string_lines(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.strings).map(move |i| ((i as u32 + 1) * self.string_spacing) as f32)
    }

    /// Map a pointer position to the cell under it.
    ///
    /// Rows are `y / string_spacing`, columns `x / fret_spacing`, both floored.
    /// Anything left of, above, or past the last valid cell gives `None`.
    pub fn locate(&self, x: f32, y: f32) -> Option<Position> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let fret = (x.floor() as u32).checked_div(self.fret_spacing)? as usize;
        let string = (y.floor() as u32).checked_div(self.string_spacing)? as usize;

        if string < self.strings && fret <= self.fret_count {
            Some(Position { string, fret })
        } else {
            None
        }
    }
}

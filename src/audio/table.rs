//! Precomputed string/fret sample table

use super::synth::{fret_frequency, PluckSynth, Sound};

/// Every playable position, rendered up front.
///
/// Indexed as `[string][fret]`, with fret 0 the open string. Immutable once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundTable {
    sounds: Vec<Vec<Sound>>,
    fret_count: usize,
}

impl SoundTable {
    /// Render all `tuning.len() * (fret_count + 1)` sounds
    pub fn build(tuning: &[f64], fret_count: usize, synth: &PluckSynth) -> Self {
        Self::build_with_progress(tuning, fret_count, synth, |_, _| {})
    }

    /// Same as [`SoundTable::build`], calling `on_cell(done, total)` after each sound
    pub fn build_with_progress<F>(tuning: &[f64], fret_count: usize, synth: &PluckSynth, mut on_cell: F) -> Self
    where
        F: FnMut(usize, usize),
    {
        let total = tuning.len() * (fret_count + 1);
        let mut done = 0;

        let sounds: Vec<Vec<Sound>> = tuning
            .iter()
            .map(|&open| {
                (0..=fret_count)
                    .map(|fret| {
                        let sound = synth.render(fret_frequency(open, fret));
                        done += 1;
                        on_cell(done, total);
                        sound
                    })
                    .collect::<Vec<Sound>>()
            })
            .collect();

        Self { sounds, fret_count }
    }

    /// Sound for a position, `None` if outside the table
    pub fn get(&self, string: usize, fret: usize) -> Option<&Sound> {
        self.sounds.get(string)?.get(fret)
    }

    /// Number of strings (rows)
    pub fn strings(&self) -> usize {
        self.sounds.len()
    }

    /// Highest fret (columns are `0..=frets()`)
    pub fn frets(&self) -> usize {
        self.fret_count
    }

    /// Total number of sounds
    pub fn len(&self) -> usize {
        self.sounds.iter().map(Vec::len).sum()
    }
}

//! Decaying sine "pluck" synthesis

use std::f64::consts::PI;
use std::sync::Arc;

/// Exponential decay constant of the pluck envelope (per second)
pub const DECAY_RATE: f64 = 3.0;

/// Equal-tempered frequency of `fret` on a string tuned to `open` Hz
pub fn fret_frequency(open: f64, fret: usize) -> f64 {
    open * 2f64.powf(fret as f64 / 12.0)
}

/// A ready-to-play sample: interleaved stereo, 16-bit signed.
///
/// Cloning is cheap, the sample data is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    frequency: f64,
    samples: Arc<[i16]>,
}

impl Sound {
    /// Fundamental frequency this sound was rendered at
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Interleaved L/R samples
    #[cfg(test)]
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Shared handle to the sample data
    pub(crate) fn shared_samples(&self) -> Arc<[i16]> {
        Arc::clone(&self.samples)
    }

    /// Number of stereo frames
    pub fn frames(&self) -> usize {
        self.samples.len() / 2
    }

    /// Left channel only
    #[cfg(test)]
    pub fn left(&self) -> impl Iterator<Item = i16> + '_ {
        self.samples.iter().step_by(2).copied()
    }
}

/// Renders fixed-length decaying sine plucks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluckSynth {
    sample_rate: u32,
    duration: f64,
}

impl PluckSynth {
    pub fn new(sample_rate: u32, duration: f64) -> Self {
        Self { sample_rate, duration }
    }

    /// Frames per sound, `sample_rate * duration` truncated
    pub fn frame_count(&self) -> usize {
        (self.sample_rate as f64 * self.duration) as usize
    }

    /// Render one pluck at `frequency` Hz.
    ///
    /// Samples cover `[0, duration)` at `t = i / sample_rate`. The float value
    /// `sin(2*pi*f*t) * exp(-DECAY_RATE*t)` is scaled by 32767 and truncated
    /// toward zero, then written to both channels.
    pub fn render(&self, frequency: f64) -> Sound {
        let frames = self.frame_count();
        let rate = self.sample_rate as f64;
        let mut samples = Vec::with_capacity(frames * 2);

        for i in 0..frames {
            let t = i as f64 / rate;
            let wave = (2.0 * PI * frequency * t).sin();
            let envelope = (-DECAY_RATE * t).exp();
            let sample = (wave * envelope * 32767.0) as i16;
            samples.push(sample);
            samples.push(sample);
        }

        Sound {
            frequency,
            samples: samples.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fret_frequency() {
        assert_eq!(fret_frequency(110.0, 0), 110.0);
        assert!((fret_frequency(110.0, 12) - 220.0).abs() < 1e-9);
        assert!((fret_frequency(110.0, 7) - 164.8138).abs() < 1e-3);
    }

    #[test]
    fn test_frame_count_truncates() {
        assert_eq!(PluckSynth::new(44100, 1.5).frame_count(), 66150);
        assert_eq!(PluckSynth::new(1000, 0.0015).frame_count(), 1);
    }

    #[test]
    fn test_render_is_stereo_duplicate() {
        let sound = PluckSynth::new(8000, 0.25).render(440.0);
        assert_eq!(sound.frames(), 2000);
        assert_eq!(sound.samples().len(), 4000);
        assert!(sound.samples().chunks(2).all(|frame| frame[0] == frame[1]));
    }

    #[test]
    fn test_render_starts_at_zero_and_truncates() {
        let synth = PluckSynth::new(44100, 0.1);
        let sound = synth.render(82.41);
        assert_eq!(sound.samples()[0], 0);

        // Truncation toward zero, not rounding
        let t = 1.0 / 44100.0;
        let expected = ((2.0 * PI * 82.41 * t).sin() * (-DECAY_RATE * t).exp() * 32767.0).trunc() as i16;
        assert_eq!(sound.left().nth(1), Some(expected));
    }

    #[test]
    fn test_quarter_period_peak() {
        // 1 Hz at 4 Hz sample rate: sample 1 sits on the crest
        let sound = PluckSynth::new(4, 1.0).render(1.0);
        let expected = ((-DECAY_RATE * 0.25).exp() * 32767.0) as i16;
        assert_eq!(sound.left().nth(1), Some(expected));
    }
}

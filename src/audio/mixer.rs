//! Fixed-channel sample mixer
//!
//! Runs inside the audio callback. Voices only hold a shared handle to the
//! precomputed samples plus a cursor, so starting a sound never copies audio.
//! When the device runs at another rate than the table, cursors advance by
//! `table_rate / device_rate` and read between frames linearly.

use cpal::{FromSample, Sample};
use std::sync::Arc;

use super::synth::Sound;

/// Number of simultaneous voices
pub const MIXER_CHANNELS: usize = 8;

/// Channel a started sound is playing on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceId(pub usize);

#[derive(Debug)]
struct Voice {
    samples: Arc<[i16]>,
    frames: usize,
    /// Read position in table frames
    pos: f64,
}

impl Voice {
    fn finished(&self) -> bool {
        self.pos >= self.frames as f64
    }

    fn frame(&self, index: usize) -> (f32, f32) {
        match self.samples.get(index * 2..index * 2 + 2) {
            Some(lr) => (lr[0] as f32, lr[1] as f32),
            None => (0.0, 0.0),
        }
    }

    /// Current stereo frame, interpolated between neighbours
    fn read(&self) -> (f32, f32) {
        let index = self.pos as usize;
        let frac = (self.pos - index as f64) as f32;
        let (l0, r0) = self.frame(index);
        if frac == 0.0 {
            return (l0, r0);
        }
        let (l1, r1) = self.frame(index + 1);
        (l0 + (l1 - l0) * frac, r0 + (r1 - r0) * frac)
    }
}

/// Sums up to [`MIXER_CHANNELS`] voices into the device buffer
#[derive(Debug)]
pub struct Mixer {
    channels: [Option<Voice>; MIXER_CHANNELS],
    /// Table frames consumed per output frame
    step: f64,
}

impl Mixer {
    /// Mixer reading a table rendered at `table_rate` into a `device_rate` stream
    pub fn with_rates(table_rate: u32, device_rate: u32) -> Self {
        Self {
            channels: std::array::from_fn(|_| None),
            step: table_rate as f64 / device_rate.max(1) as f64,
        }
    }

    /// Start `sound` on the first free channel.
    ///
    /// Returns `None` and drops the sound when every channel is busy.
    pub fn play(&mut self, sound: &Sound) -> Option<VoiceId> {
        let index = self.channels.iter().position(Option::is_none)?;
        self.channels[index] = Some(Voice {
            samples: sound.shared_samples(),
            frames: sound.frames(),
            pos: 0.0,
        });
        Some(VoiceId(index))
    }

    /// Number of channels currently playing
    pub fn active_voices(&self) -> usize {
        self.channels.iter().filter(|c| c.is_some()).count()
    }

    #[cfg(test)]
    fn is_playing(&self, voice: VoiceId) -> bool {
        self.channels.get(voice.0).is_some_and(Option::is_some)
    }

    /// Stop every voice
    pub fn clear(&mut self) {
        self.channels.iter_mut().for_each(|c| *c = None);
    }

    /// Sum one output frame and advance every voice.
    ///
    /// The sum is clamped to the 16-bit range and scaled to `[-1, 1]`. Voices
    /// that run out free their channel.
    fn next_frame(&mut self) -> (f32, f32) {
        let mut left = 0.0f32;
        let mut right = 0.0f32;

        for slot in self.channels.iter_mut() {
            let Some(voice) = slot else { continue };
            let (l, r) = voice.read();
            left += l;
            right += r;
            voice.pos += self.step;
            if voice.finished() {
                *slot = None;
            }
        }

        (to_unit(left), to_unit(right))
    }

    /// Fill interleaved `out` holding `channels` samples per frame.
    ///
    /// Mono devices get the average of left and right; channels past the
    /// second are left silent.
    pub fn mix<T>(&mut self, out: &mut [T], channels: usize)
    where
        T: Sample + FromSample<f32>,
    {
        if channels == 0 {
            return;
        }
        for frame in out.chunks_exact_mut(channels) {
            let (left, right) = self.next_frame();
            if channels == 1 {
                frame[0] = T::from_sample((left + right) * 0.5);
                continue;
            }
            frame[0] = T::from_sample(left);
            frame[1] = T::from_sample(right);
            frame[2..].fill(T::EQUILIBRIUM);
        }
    }
}

/// Mixer for a device running at the table's own rate
impl Default for Mixer {
    fn default() -> Self {
        Self::with_rates(1, 1)
    }
}

fn to_unit(sum: f32) -> f32 {
    sum.clamp(i16::MIN as f32, i16::MAX as f32) / 32767.0
}

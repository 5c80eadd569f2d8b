//! Plucked-string synthesis and playback
//!
//! Every string/fret sample is rendered once at startup into a [`SoundTable`].
//! Playback goes through a [`Player`], which hands the shared sample buffer to
//! a fixed-size mixer running inside the audio device callback.

mod synth;
mod table;
mod mixer;
mod output;

pub use synth::{PluckSynth, Sound};
pub use table::SoundTable;
pub use mixer::VoiceId;
pub use output::{AudioError, AudioOutput};

/// Something that can start a sound.
///
/// Playback is fire-and-forget: the returned handle only identifies the
/// channel the sound landed on, the mixer owns the voice until it finishes.
/// Returns `None` when the sound could not be started.
pub trait Player {
    fn play(&mut self, sound: &Sound) -> Option<VoiceId>;
}

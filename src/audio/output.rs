//! Audio device output via cpal

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SampleRate, SizedSample, StreamConfig, SupportedStreamConfig, SupportedStreamConfigRange};
use std::sync::{Arc, Mutex};

use super::mixer::{Mixer, VoiceId};
use super::synth::Sound;
use super::Player;

/// Error type for opening the audio device
#[derive(Debug)]
pub enum AudioError {
    NoOutputDevice,
    DefaultConfig(cpal::DefaultStreamConfigError),
    UnsupportedFormat(SampleFormat),
    BuildStream(cpal::BuildStreamError),
    PlayStream(cpal::PlayStreamError),
}

impl From<cpal::DefaultStreamConfigError> for AudioError {
    fn from(e: cpal::DefaultStreamConfigError) -> Self {
        AudioError::DefaultConfig(e)
    }
}

impl From<cpal::BuildStreamError> for AudioError {
    fn from(e: cpal::BuildStreamError) -> Self {
        AudioError::BuildStream(e)
    }
}

impl From<cpal::PlayStreamError> for AudioError {
    fn from(e: cpal::PlayStreamError) -> Self {
        AudioError::PlayStream(e)
    }
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "No audio output device available"),
            AudioError::DefaultConfig(e) => write!(f, "Failed to get audio config: {}", e),
            AudioError::UnsupportedFormat(format) => write!(f, "Unsupported sample format {:?}", format),
            AudioError::BuildStream(e) => write!(f, "Failed to build audio stream: {}", e),
            AudioError::PlayStream(e) => write!(f, "Failed to start audio stream: {}", e),
        }
    }
}

/// Pick a stereo config that runs at `sample_rate`, preferring f32 samples.
///
/// `None` when no range covers the rate; the caller then falls back to the
/// device default and the mixer converts rates.
fn pick_config<I>(ranges: I, sample_rate: u32) -> Option<SupportedStreamConfig>
where
    I: IntoIterator<Item = SupportedStreamConfigRange>,
{
    let wanted = SampleRate(sample_rate);
    ranges
        .into_iter()
        .filter(|r| r.channels() == 2 && r.min_sample_rate() <= wanted && wanted <= r.max_sample_rate())
        .min_by_key(|r| r.sample_format() != SampleFormat::F32)
        .map(|r| r.with_sample_rate(wanted))
}

/// Output stream on the default device, fed by a shared [`Mixer`]
pub struct AudioOutput {
    mixer: Arc<Mutex<Mixer>>,
    /// Kept alive for the lifetime of the output
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Open the default output device for sounds rendered at `sample_rate` Hz.
    ///
    /// Uses a stereo stream at that rate when the device offers one, otherwise
    /// the device's default config with rate conversion in the mixer.
    pub fn open(sample_rate: u32) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let supported = match device.supported_output_configs() {
            Ok(ranges) => pick_config(ranges, sample_rate),
            Err(e) => {
                eprintln!("Could not query audio configs: {}", e);
                None
            }
        };
        let supported = match supported {
            Some(config) => config,
            None => device.default_output_config()?,
        };

        let format = supported.sample_format();
        let config: StreamConfig = supported.into();
        let device_rate = config.sample_rate.0;

        println!(
            "Audio: {} @ {}Hz, {} ch, {:?}",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            device_rate,
            config.channels,
            format
        );
        if device_rate != sample_rate {
            println!("Audio: resampling {}Hz sounds to {}Hz", sample_rate, device_rate);
        }

        let mixer = Arc::new(Mutex::new(Mixer::with_rates(sample_rate, device_rate)));

        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, Arc::clone(&mixer))?,
            SampleFormat::I16 => build_stream::<i16>(&device, &config, Arc::clone(&mixer))?,
            SampleFormat::U16 => build_stream::<u16>(&device, &config, Arc::clone(&mixer))?,
            other => return Err(AudioError::UnsupportedFormat(other)),
        };
        stream.play()?;

        Ok(Self {
            mixer,
            _stream: stream,
        })
    }

    /// Number of voices currently sounding
    pub fn active_voices(&self) -> usize {
        self.mixer.lock().map(|m| m.active_voices()).unwrap_or(0)
    }

    /// Silence every playing voice
    pub fn stop_all(&self) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.clear();
        }
    }
}

fn build_stream<T>(device: &cpal::Device, config: &StreamConfig, mixer: Arc<Mutex<Mixer>>) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            match mixer.lock() {
                Ok(mut mixer) => mixer.mix(data, channels),
                Err(_) => data.fill(T::EQUILIBRIUM),
            }
        },
        |err| eprintln!("Audio stream error: {}", err),
        None,
    )?;
    Ok(stream)
}

impl Player for AudioOutput {
    fn play(&mut self, sound: &Sound) -> Option<VoiceId> {
        self.mixer.lock().ok()?.play(sound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpal::SupportedBufferSize;

    fn range(channels: u16, min: u32, max: u32, format: SampleFormat) -> SupportedStreamConfigRange {
        SupportedStreamConfigRange::new(
            channels,
            SampleRate(min),
            SampleRate(max),
            SupportedBufferSize::Unknown,
            format,
        )
    }

    #[test]
    fn test_pick_config_prefers_f32_stereo() {
        let ranges = vec![
            range(2, 8000, 96000, SampleFormat::I16),
            range(2, 8000, 96000, SampleFormat::F32),
            range(1, 8000, 96000, SampleFormat::F32),
        ];
        let config = pick_config(ranges, 44100).unwrap();
        assert_eq!(config.channels(), 2);
        assert_eq!(config.sample_rate(), SampleRate(44100));
        assert_eq!(config.sample_format(), SampleFormat::F32);
    }

    #[test]
    fn test_pick_config_takes_integer_format() {
        let ranges = vec![range(2, 44100, 48000, SampleFormat::I16)];
        let config = pick_config(ranges, 44100).unwrap();
        assert_eq!(config.sample_format(), SampleFormat::I16);
    }

    #[test]
    fn test_pick_config_none_when_rate_missing() {
        // 48kHz-only shared-mode device
        let ranges = vec![
            range(2, 48000, 48000, SampleFormat::F32),
            range(6, 44100, 48000, SampleFormat::F32),
        ];
        assert!(pick_config(ranges, 44100).is_none());
    }
}

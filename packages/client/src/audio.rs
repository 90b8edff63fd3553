//! Looped noise playback behind an audio backend seam.
//!
//! [`NoisePlayer`] owns the one-channel invariant: selecting a sound always
//! stops whatever is playing first (last-writer-wins, no queueing). The
//! actual device sits behind [`AudioBackend`]; the default implementation
//! uses rodio and opens the output stream lazily on first use, holding it as
//! an explicitly-owned handle until the player is dropped.

use rodio::Source;
use rodio::buffer::SamplesBuffer;
use thiserror::Error;

use crate::error::ClientError;
use crate::noise::{self, DEFAULT_BUFFER_SECS, NoiseColor};

/// Sample rate of generated buffers
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Initial gain
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Audio subsystem failures
#[derive(Debug, Error)]
pub enum AudioError {
    /// No output device, or the device refused the stream
    #[error("no usable audio output device: {0}")]
    Unavailable(String),
}

/// Playback surface the noise player drives.
///
/// Implementations must make `stop` idempotent and `start_loop` replace any
/// current playback.
pub trait AudioBackend {
    /// Start continuous looped playback of a mono buffer at the given gain
    fn start_loop(
        &mut self,
        samples: Vec<f32>,
        sample_rate: u32,
        volume: f32,
    ) -> Result<(), AudioError>;

    /// Live gain update on the current playback, no restart
    fn set_volume(&mut self, volume: f32);

    /// Release the current playback; a no-op when nothing plays
    fn stop(&mut self);
}

/// rodio-backed output. The stream handle is created on first use and lives
/// until the backend is dropped, which releases the device.
#[derive(Default)]
pub struct RodioBackend {
    output: Option<(rodio::OutputStream, rodio::OutputStreamHandle)>,
    sink: Option<rodio::Sink>,
}

impl RodioBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioBackend for RodioBackend {
    fn start_loop(
        &mut self,
        samples: Vec<f32>,
        sample_rate: u32,
        volume: f32,
    ) -> Result<(), AudioError> {
        self.stop();

        if self.output.is_none() {
            let pair = rodio::OutputStream::try_default()
                .map_err(|e| AudioError::Unavailable(e.to_string()))?;
            self.output = Some(pair);
        }
        let Some((_stream, handle)) = self.output.as_ref() else {
            return Err(AudioError::Unavailable("output stream missing".to_string()));
        };

        let sink = rodio::Sink::try_new(handle).map_err(|e| AudioError::Unavailable(e.to_string()))?;
        sink.set_volume(volume);
        sink.append(SamplesBuffer::new(1, sample_rate, samples).repeat_infinite());
        self.sink = Some(sink);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

/// At most one noise channel per process.
pub struct NoisePlayer<B: AudioBackend> {
    backend: B,
    sample_rate: u32,
    active: Option<NoiseColor>,
    volume: f32,
}

impl<B: AudioBackend> NoisePlayer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sample_rate: DEFAULT_SAMPLE_RATE,
            active: None,
            volume: DEFAULT_VOLUME,
        }
    }

    /// The currently audible color, if any
    pub fn active(&self) -> Option<NoiseColor> {
        self.active
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Stop any current channel and start looped playback of `color`.
    ///
    /// On failure no channel is left active and the error is returned once
    /// for the caller to surface.
    pub fn play(&mut self, color: NoiseColor) -> Result<(), ClientError> {
        self.backend.stop();
        self.active = None;

        let samples = noise::noise_buffer(color, self.sample_rate, DEFAULT_BUFFER_SECS);
        self.backend
            .start_loop(samples, self.sample_rate, self.volume)?;
        self.active = Some(color);
        Ok(())
    }

    /// Update the gain live, clamped to [0, 1]
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.backend.set_volume(self.volume);
    }

    /// Release the channel. Idempotent: stopping with nothing active is a
    /// no-op.
    pub fn stop(&mut self) {
        self.backend.stop();
        self.active = None;
    }

    /// Selecting the active color stops it; any other color replaces the
    /// current channel. Returns the now-active color.
    pub fn toggle(&mut self, color: NoiseColor) -> Result<Option<NoiseColor>, ClientError> {
        if self.active == Some(color) {
            self.stop();
            return Ok(None);
        }
        self.play(color)?;
        Ok(Some(color))
    }
}

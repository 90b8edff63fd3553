//! Procedural noise synthesis.
//!
//! Generates loopable white/pink/brown noise buffers with no asset
//! dependency. Pink noise uses the Paul Kellet IIR approximation; brown
//! noise integrates white noise with a leaky accumulator. The random source
//! is injected so tests can reproduce the recurrences exactly.

use std::str::FromStr;

use rand::Rng;

/// Length of the generated loop, in seconds. The buffer is played with
/// wraparound rather than regenerated per cycle.
pub const DEFAULT_BUFFER_SECS: u32 = 2;

/// Power-spectral-density shape of the generated signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseColor {
    /// Flat spectrum — static, good for masking
    White,
    /// -3 dB/octave — sounds like rain
    Pink,
    /// -6 dB/octave — deeper, like distant thunder or a waterfall
    Brown,
}

impl NoiseColor {
    pub fn label(&self) -> &'static str {
        match self {
            NoiseColor::White => "white",
            NoiseColor::Pink => "pink",
            NoiseColor::Brown => "brown",
        }
    }
}

impl FromStr for NoiseColor {
    type Err = String;

    /// Accepts the color names plus the ambience aliases the sound picker
    /// used ("rain", "forest", "cafe").
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "white" | "cafe" => Ok(NoiseColor::White),
            "pink" | "rain" => Ok(NoiseColor::Pink),
            "brown" | "forest" => Ok(NoiseColor::Brown),
            other => Err(format!("unknown noise color '{}'", other)),
        }
    }
}

/// Generate a loopable mono noise buffer of exactly
/// `sample_rate * duration_secs` samples using the thread-local generator.
pub fn noise_buffer(color: NoiseColor, sample_rate: u32, duration_secs: u32) -> Vec<f32> {
    noise_buffer_with(&mut rand::thread_rng(), color, sample_rate, duration_secs)
}

/// Same as [`noise_buffer`], with an injected random source.
pub fn noise_buffer_with<R: Rng + ?Sized>(
    rng: &mut R,
    color: NoiseColor,
    sample_rate: u32,
    duration_secs: u32,
) -> Vec<f32> {
    let len = (sample_rate * duration_secs) as usize;
    match color {
        NoiseColor::White => white(rng, len),
        NoiseColor::Pink => pink(rng, len),
        NoiseColor::Brown => brown(rng, len),
    }
}

fn white_sample<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.r#gen::<f32>() * 2.0 - 1.0
}

fn white<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f32> {
    (0..len).map(|_| white_sample(rng)).collect()
}

/// Paul Kellet's pink-noise filter: seven running state variables updated
/// per white sample, summed with a scaled raw sample, then gain-compensated.
fn pink<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f32> {
    let (mut b0, mut b1, mut b2, mut b3, mut b4, mut b5, mut b6) =
        (0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32);
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        let white = white_sample(rng);
        b0 = 0.99886 * b0 + white * 0.0555179;
        b1 = 0.99332 * b1 + white * 0.0750759;
        b2 = 0.96900 * b2 + white * 0.1538520;
        b3 = 0.86650 * b3 + white * 0.3104856;
        b4 = 0.55000 * b4 + white * 0.5329522;
        b5 = -0.7616 * b5 - white * 0.0168980;
        let sample = (b0 + b1 + b2 + b3 + b4 + b5 + b6 + white * 0.5362) * 0.11;
        b6 = white * 0.115926;
        out.push(sample);
    }
    out
}

/// Brown noise: leaky integration of white noise. The accumulator keeps the
/// pre-gain value; only the emitted sample is compensated.
fn brown<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<f32> {
    let mut last = 0.0f32;
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        let white = white_sample(rng);
        let integrated = (last + 0.02 * white) / 1.02;
        last = integrated;
        out.push(integrated * 3.5);
    }
    out
}

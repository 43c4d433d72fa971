//! Procedural sound effects.
//!
//! Every cue is a single oscillator swept linearly between two frequencies,
//! shaped by a fade-in/sustain/fade-out envelope and quantized to signed
//! 16-bit mono.

use std::f64::consts::PI;

use rand::Rng;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Saw,
    Noise,
}

/// Parameters for one synthesized buffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub freq_start: f64,
    pub freq_end: f64,
    /// Seconds
    pub duration: f64,
    pub volume: f64,
}

/// The events that make a sound.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cue {
    Boot,
    Move,
    Eat,
    Die,
    Select,
}

impl Cue {
    pub const ALL: [Cue; 5] = [Cue::Boot, Cue::Move, Cue::Eat, Cue::Die, Cue::Select];

    pub fn tone(self) -> Tone {
        let (waveform, freq_start, freq_end, duration, volume) = match self {
            Cue::Boot => (Waveform::Sine, 100.0, 800.0, 2.5, 0.4),
            Cue::Move => (Waveform::Noise, 800.0, 200.0, 0.05, 0.1),
            Cue::Eat => (Waveform::Square, 400.0, 900.0, 0.1, 0.3),
            Cue::Die => (Waveform::Saw, 200.0, 50.0, 0.5, 0.5),
            Cue::Select => (Waveform::Sine, 800.0, 1200.0, 0.1, 0.3),
        };
        Tone { waveform, freq_start, freq_end, duration, volume }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Amplitude at sample `i` of `n`: ramps up over the first 10%, down over
/// the last 20%.
pub fn envelope(i: usize, n: usize) -> f64 {
    let (i, n) = (i as f64, n as f64);
    if i < n * 0.1 {
        i / (n * 0.1)
    } else if i > n * 0.8 {
        (n - i) / (n * 0.2)
    } else {
        1.0
    }
}

fn oscillate<R: Rng + ?Sized>(waveform: Waveform, f: f64, t: f64, rng: &mut R) -> f64 {
    match waveform {
        Waveform::Sine => (2.0 * PI * f * t).sin(),
        Waveform::Square => {
            if (2.0 * PI * f * t).sin() > 0.0 { 1.0 } else { -1.0 }
        }
        Waveform::Saw => 2.0 * (f * t - (0.5 + f * t).floor()),
        Waveform::Noise => rng.gen_range(-1.0..=1.0),
    }
}

/// Renders `tone` at `sample_rate`. Only `Noise` touches `rng`.
pub fn synthesize<R: Rng + ?Sized>(tone: &Tone, sample_rate: u32, rng: &mut R) -> Vec<i16> {
    let n = (tone.duration * sample_rate as f64).floor() as usize;
    let sweep = tone.freq_end - tone.freq_start;

    (0..n)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            let f = tone.freq_start + sweep * (i as f64 / n as f64);
            let val = oscillate(tone.waveform, f, t, rng);
            (val * tone.volume * envelope(i, n) * i16::MAX as f64) as i16
        })
        .collect()
}

/// One pre-rendered buffer per cue, built once and never touched again.
#[derive(Debug, Clone)]
pub struct SoundBank {
    sample_rate: u32,
    buffers: Vec<Vec<i16>>,
}

impl SoundBank {
    pub fn generate<R: Rng + ?Sized>(sample_rate: u32, rng: &mut R) -> Self {
        let buffers = Cue::ALL
            .iter()
            .map(|cue| synthesize(&cue.tone(), sample_rate, rng))
            .collect();
        SoundBank { sample_rate, buffers }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self, cue: Cue) -> &[i16] {
        &self.buffers[cue.index()]
    }
}

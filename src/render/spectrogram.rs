use rustfft::{num_complex::Complex, FftPlanner};

use crate::audio::AudioBuffer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpectrogramConfig {
    pub fft_size: usize,
    pub hop: usize,
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self {
            fft_size: 512,
            hop: 256,
        }
    }
}

/// Magnitude-in-dB time/frequency grid for one buffer. `values_db` is
/// frame-major, `frames * bins` long; `hop` and `sample_rate` are kept so
/// columns can be mapped back to time. Immutable once computed.
#[derive(Clone, Debug)]
pub struct SpectrogramData {
    pub frames: usize,
    pub bins: usize,
    pub hop: usize,
    pub sample_rate: u32,
    pub values_db: Vec<f32>,
    pub min_db: f32,
    pub max_db: f32,
}

impl SpectrogramData {
    /// Column spacing in ms.
    pub fn ms_per_hop(&self) -> f64 {
        1000.0 * self.hop as f64 / self.sample_rate.max(1) as f64
    }

    pub fn value_at(&self, frame: usize, bin: usize) -> f32 {
        let frame = frame.min(self.frames.saturating_sub(1));
        let bin = bin.min(self.bins.saturating_sub(1));
        self.values_db
            .get(frame * self.bins + bin)
            .copied()
            .unwrap_or(self.min_db)
    }
}

/// Hann-windowed STFT magnitude grid in dB over `bins = fft_size / 2` bins.
///
/// Frame `f` starts at sample `f * hop`; samples past the end of the
/// buffer read as 0, so even an empty buffer yields one (silent) frame.
/// The dB floor is `20*log10(1e-8)`, never -inf, and the global min/max
/// are tracked in the same pass.
pub fn compute_spectrogram(buffer: &AudioBuffer, cfg: &SpectrogramConfig) -> SpectrogramData {
    let win = cfg.fft_size.max(2);
    let hop = cfg.hop.max(1);
    let bins = win / 2;
    let samples = &buffer.samples;
    let frames = if samples.len() > win {
        (samples.len() - win) / hop + 1
    } else {
        1
    };

    let window = hann_window(win);
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(win);
    let mut frame_buf = vec![Complex { re: 0.0f32, im: 0.0f32 }; win];

    let mut values_db = Vec::with_capacity(frames * bins);
    let mut min_db = f32::INFINITY;
    let mut max_db = f32::NEG_INFINITY;

    for frame in 0..frames {
        let start = frame * hop;
        for i in 0..win {
            let sample = samples.get(start + i).copied().unwrap_or(0.0);
            frame_buf[i].re = sample * window[i];
            frame_buf[i].im = 0.0;
        }
        fft.process(&mut frame_buf);
        for bin in 0..bins {
            let c = frame_buf[bin];
            let mag = (c.re * c.re + c.im * c.im).sqrt();
            let db = 20.0 * (mag + 1e-8).log10();
            if db < min_db {
                min_db = db;
            }
            if db > max_db {
                max_db = db;
            }
            values_db.push(db);
        }
    }

    SpectrogramData {
        frames,
        bins,
        hop,
        sample_rate: buffer.sample_rate,
        values_db,
        min_db,
        max_db,
    }
}

fn hann_window(n: usize) -> Vec<f32> {
    if n <= 1 {
        return vec![1.0; n];
    }
    let n_f = (n - 1) as f32;
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * std::f32::consts::PI * i as f32 / n_f).cos())
        .collect()
}


/// Decoded PCM for one resource, as supplied by an external decoder.
/// Samples are mono f32 in [-1, 1]; multi-channel input is mixed down on
/// construction.
#[derive(Clone, Debug)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    pub fn from_channels(channels: &[Vec<f32>], sample_rate: u32) -> Self {
        let len = channels.iter().map(|c| c.len()).max().unwrap_or(0);
        if channels.len() <= 1 {
            return Self {
                samples: channels.first().cloned().unwrap_or_default(),
                sample_rate,
            };
        }
        let scale = 1.0 / channels.len() as f32;
        let mut mono = vec![0.0f32; len];
        for ch in channels {
            for (i, &v) in ch.iter().enumerate() {
                mono[i] += v * scale;
            }
        }
        Self { samples: mono, sample_rate }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in ms; 0 for an empty buffer or an unset sample rate.
    pub fn duration_ms(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 * 1000.0 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixdown_averages_channels() {
        let buf = AudioBuffer::from_channels(&[vec![1.0, 1.0], vec![0.0, 0.5, 0.5]], 44_100);
        assert_eq!(buf.len(), 3);
        assert!((buf.samples[0] - 0.5).abs() < 1e-6);
        assert!((buf.samples[2] - 0.25).abs() < 1e-6);
    }
}

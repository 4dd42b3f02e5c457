use std::sync::Arc;
use std::time::{Duration, Instant};

use otolab::audio::AudioBuffer;
use otolab::render::colors::render_spectrogram;
use otolab::render::spectrogram::{compute_spectrogram, SpectrogramConfig};
use otolab::spectro_cache::SpectroCache;

fn sine(freq: f32, sr: u32, secs: f32) -> AudioBuffer {
    let frames = ((sr as f32) * secs).max(1.0) as usize;
    let samples = (0..frames)
        .map(|i| ((i as f32) / (sr as f32) * freq * std::f32::consts::TAU).sin() * 0.5)
        .collect();
    AudioBuffer::from_mono(samples, sr)
}

#[test]
fn grid_shape_follows_window_and_hop() {
    let buf = sine(440.0, 44_100, 1.0);
    let grid = compute_spectrogram(&buf, &SpectrogramConfig::default());
    assert_eq!(grid.bins, 256);
    assert_eq!(grid.hop, 256);
    assert_eq!(grid.frames, (buf.len() - 512) / 256 + 1);
    assert_eq!(grid.values_db.len(), grid.frames * grid.bins);
    assert!(grid.min_db <= grid.max_db);
}

#[test]
fn compute_is_deterministic() {
    let buf = sine(523.25, 48_000, 0.5);
    let cfg = SpectrogramConfig::default();
    let a = compute_spectrogram(&buf, &cfg);
    let b = compute_spectrogram(&buf, &cfg);
    assert_eq!(a.values_db, b.values_db);
    assert_eq!(a.min_db, b.min_db);
    assert_eq!(a.max_db, b.max_db);
}

#[test]
fn a_sine_peaks_in_the_expected_bin() {
    let sr = 44_100;
    let buf = sine(440.0, sr, 0.5);
    let grid = compute_spectrogram(&buf, &SpectrogramConfig::default());
    // middle frame, away from edge padding
    let frame = grid.frames / 2;
    let (peak_bin, _) = (0..grid.bins)
        .map(|b| (b, grid.value_at(frame, b)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap();
    let expected = (440.0 * 512.0 / sr as f32).round() as usize;
    assert!(
        peak_bin.abs_diff(expected) <= 1,
        "peak {peak_bin} expected ~{expected}"
    );
}

#[test]
fn short_and_empty_buffers_yield_one_frame() {
    let cfg = SpectrogramConfig::default();
    for len in [0usize, 1, 100, 511, 512] {
        let buf = AudioBuffer::from_mono(vec![0.1; len], 44_100);
        let grid = compute_spectrogram(&buf, &cfg);
        assert_eq!(grid.frames, 1, "len {len}");
        assert_eq!(grid.values_db.len(), grid.bins);
        assert!(grid.min_db.is_finite() && grid.max_db.is_finite());
    }
}

#[test]
fn silence_stays_on_the_epsilon_floor() {
    let buf = AudioBuffer::from_mono(vec![0.0; 2048], 44_100);
    let grid = compute_spectrogram(&buf, &SpectrogramConfig::default());
    assert!(grid.values_db.iter().all(|v| v.is_finite()));
    let floor = 20.0 * (1e-8f32).log10();
    assert!((grid.min_db - floor).abs() < 1.0);
}

#[test]
fn render_covers_the_requested_output_size() {
    let buf = sine(440.0, 44_100, 1.0);
    let grid = compute_spectrogram(&buf, &SpectrogramConfig::default());
    let img = render_spectrogram(&grid, 0.0, buf.duration_ms(), 320, 128);
    assert_eq!(img.dimensions(), (320, 128));
    // every pixel is opaque
    assert!(img.pixels().all(|p| p[3] == 255));
    // zoomed to a sub-window past the end it must not panic or index out
    let img = render_spectrogram(&grid, buf.duration_ms() * 2.0, 100.0, 64, 32);
    assert_eq!(img.dimensions(), (64, 32));
}

fn wait_for_grid(cache: &mut SpectroCache, key: &str) -> Arc<otolab::render::spectrogram::SpectrogramData> {
    let start = Instant::now();
    loop {
        cache.drain();
        if let Some(grid) = cache.get(key) {
            return grid;
        }
        if start.elapsed() > Duration::from_secs(20) {
            panic!("spectrogram job timeout");
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn cache_computes_in_the_background_and_lands_on_drain() {
    let mut cache = SpectroCache::new(SpectrogramConfig::default());
    let buf = Arc::new(sine(440.0, 44_100, 0.25));
    assert!(cache.request("a.wav", buf.clone()));
    // duplicate requests while in flight are ignored
    assert!(!cache.request("a.wav", buf.clone()));
    let grid = wait_for_grid(&mut cache, "a.wav");
    assert!(grid.frames > 1);
    assert!(!cache.is_inflight("a.wav"));
    // cached now; a new request is a no-op
    assert!(!cache.request("a.wav", buf));
}

#[test]
fn stale_results_are_discarded_after_invalidate() {
    let mut cache = SpectroCache::new(SpectrogramConfig::default());
    let long = Arc::new(sine(440.0, 44_100, 1.0));
    let short = Arc::new(sine(440.0, 44_100, 0.05));
    let long_frames = compute_spectrogram(&long, &SpectrogramConfig::default()).frames;
    let short_frames = compute_spectrogram(&short, &SpectrogramConfig::default()).frames;
    assert_ne!(long_frames, short_frames);

    assert!(cache.request("v.wav", long));
    // the buffer was replaced before the first job finished
    cache.invalidate("v.wav");
    assert!(cache.request("v.wav", short));

    let grid = wait_for_grid(&mut cache, "v.wav");
    assert_eq!(grid.frames, short_frames);

    // even after further drains the stale grid never overwrites the entry
    std::thread::sleep(Duration::from_millis(50));
    cache.drain();
    assert_eq!(cache.get("v.wav").unwrap().frames, short_frames);
}

#[test]
fn invalidate_then_clear_empties_the_cache() {
    let mut cache = SpectroCache::new(SpectrogramConfig::default());
    let buf = Arc::new(sine(220.0, 22_050, 0.1));
    cache.request("x.wav", buf);
    let _ = wait_for_grid(&mut cache, "x.wav");
    cache.invalidate("x.wav");
    assert!(cache.get("x.wav").is_none());
    cache.clear();
    assert!(!cache.is_inflight("x.wav"));
}

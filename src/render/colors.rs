use image::{Rgba, RgbaImage};

use super::spectrogram::SpectrogramData;

/// Fixed dB→color ramp: red ramps up fast, green follows a power curve,
/// blue falls away from both ends of the range. `t` is the normalized
/// magnitude in [0, 1].
pub fn spectro_color(t: f32) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let r = (255.0 * 1.5 * t).floor().clamp(0.0, 255.0) as u8;
    let g = (255.0 * t.powf(1.5)).floor().clamp(0.0, 255.0) as u8;
    let valley = if t < 0.5 { 0.5 - t } else { 1.0 - t };
    let b = (255.0 * valley * 1.6).floor().clamp(0.0, 255.0) as u8;
    Rgba([r, g, b, 255])
}

/// Render the visible time window of a spectrogram grid to an RGBA image.
///
/// Columns pick the nearest grid frame (no interpolation), rows map
/// linearly to frequency bins with bin 0 at the bottom. Magnitudes are
/// normalized against the grid's global min/max; a flat grid normalizes
/// against an epsilon span instead of dividing by zero.
pub fn render_spectrogram(
    grid: &SpectrogramData,
    view_start_ms: f64,
    visible_window_ms: f64,
    out_w: u32,
    out_h: u32,
) -> RgbaImage {
    let mut img = RgbaImage::new(out_w, out_h);
    if out_w == 0 || out_h == 0 || grid.frames == 0 || grid.bins == 0 {
        return img;
    }
    let ms_per_hop = grid.ms_per_hop().max(f64::EPSILON);
    let col_start = ((view_start_ms / ms_per_hop).floor().max(0.0) as usize)
        .min(grid.frames - 1);
    let col_end = (((view_start_ms + visible_window_ms.max(0.0)) / ms_per_hop).ceil() as usize)
        .min(grid.frames - 1);
    let view_cols = col_end.saturating_sub(col_start).saturating_add(1).max(1);

    let span = (grid.max_db - grid.min_db).max(1e-6);
    for x in 0..out_w {
        let col = col_start + (x as f64 / out_w as f64 * view_cols as f64).floor() as usize;
        for y in 0..out_h {
            let bin = ((1.0 - y as f64 / out_h as f64) * (grid.bins - 1) as f64).floor() as usize;
            let v = grid.value_at(col, bin);
            let t = (v - grid.min_db) / span;
            img.put_pixel(x, y, spectro_color(t));
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_is_monotonic_in_red() {
        let mut last = 0u8;
        for i in 0..=100 {
            let c = spectro_color(i as f32 / 100.0);
            assert!(c[0] >= last);
            last = c[0];
        }
        assert_eq!(spectro_color(1.0)[0], 255);
        assert_eq!(spectro_color(0.0)[3], 255);
    }
}

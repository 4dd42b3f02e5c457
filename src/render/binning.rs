use crate::audio::AudioBuffer;
use crate::viewport::Viewport;

/// Sample index range covered by the viewport's visible time window.
pub fn visible_sample_range(buffer: &AudioBuffer, view: &Viewport) -> (usize, usize) {
    let total_ms = buffer.duration_ms();
    let len = buffer.len();
    if total_ms <= 0.0 || len == 0 {
        return (0, 0);
    }
    let start_ms = view.view_start_ms;
    let end_ms = start_ms + view.visible_window_ms();
    let start = ((start_ms / total_ms) * len as f64).floor().max(0.0) as usize;
    let end = (((end_ms / total_ms) * len as f64).ceil() as usize).min(len);
    (start.min(end), end)
}

/// Split `[0..len)` into `bins` contiguous slices, one per output column.
pub fn column_ranges(len: usize, bins: usize) -> Vec<(usize, usize)> {
    if len == 0 || bins == 0 {
        return Vec::new();
    }
    let step = len as f64 / bins as f64;
    let mut pos = 0.0f64;
    let mut out = Vec::with_capacity(bins);
    for _ in 0..bins {
        let i0 = pos.floor() as usize;
        pos += step;
        let mut i1 = pos.floor() as usize;
        if i1 <= i0 {
            i1 = i0 + 1;
        }
        if i0 >= len {
            break;
        }
        out.push((i0, i1.min(len)));
    }
    out
}

/// Per-column (min, max) amplitude pairs over the visible sample range,
/// one pair per output pixel column. Empty columns yield (0, 0).
pub fn waveform_minmax(buffer: &AudioBuffer, view: &Viewport, columns: usize) -> Vec<(f32, f32)> {
    let (start, end) = visible_sample_range(buffer, view);
    let slice = &buffer.samples[start..end];
    column_ranges(slice.len(), columns)
        .into_iter()
        .map(|(i0, i1)| {
            let mut mn = f32::INFINITY;
            let mut mx = f32::NEG_INFINITY;
            for &v in &slice[i0..i1] {
                if v < mn {
                    mn = v;
                }
                if v > mx {
                    mx = v;
                }
            }
            if mn.is_finite() && mx.is_finite() {
                (mn, mx)
            } else {
                (0.0, 0.0)
            }
        })
        .collect()
}

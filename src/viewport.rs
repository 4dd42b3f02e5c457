/// Horizontal zoom bounds; 1 = the whole sample fits the viewport.
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 128.0;

/// Vertical (amplitude) zoom bounds for waveform drawing.
pub const MIN_AMP_ZOOM: f64 = 0.25;
pub const MAX_AMP_ZOOM: f64 = 4.0;

/// Fraction of the visible window moved per pan step.
const PAN_STEP_FRACTION: f64 = 0.1;

/// Time window over a pixel viewport. `ms_to_x` and `x_to_ms` are exact
/// inverses of each other; zooming keeps the time under the anchor pixel
/// fixed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub view_start_ms: f64,
    pub zoom: f64,
    pub amp_zoom: f64,
    pub total_ms: f64,
    pub width_px: f64,
}

impl Viewport {
    pub fn new(total_ms: f64, width_px: f64) -> Self {
        Self {
            view_start_ms: 0.0,
            zoom: MIN_ZOOM,
            amp_zoom: 1.0,
            total_ms: total_ms.max(0.0),
            width_px: width_px.max(0.0),
        }
    }

    /// Visible span in ms. Zero when no duration is known yet, otherwise at
    /// least 1 ms so the transform never divides by zero at extreme zoom.
    pub fn visible_window_ms(&self) -> f64 {
        if self.total_ms <= 0.0 {
            return 0.0;
        }
        (self.total_ms / self.zoom.max(MIN_ZOOM)).max(1.0)
    }

    pub fn ms_to_x(&self, ms: f64) -> f64 {
        let vw = self.visible_window_ms();
        if vw <= 0.0 || self.width_px <= 0.0 {
            return 0.0;
        }
        (ms - self.view_start_ms) / vw * self.width_px
    }

    pub fn x_to_ms(&self, x: f64) -> f64 {
        let vw = self.visible_window_ms();
        if vw <= 0.0 || self.width_px <= 0.0 {
            return 0.0;
        }
        self.view_start_ms + x / self.width_px * vw
    }

    fn max_view_start(&self) -> f64 {
        (self.total_ms - self.visible_window_ms()).max(0.0)
    }

    fn clamp_view_start(&mut self) {
        self.view_start_ms = self.view_start_ms.clamp(0.0, self.max_view_start());
    }

    /// Set the zoom factor while keeping the time under pixel `anchor_x`
    /// where it is.
    pub fn zoom_to(&mut self, new_zoom: f64, anchor_x: f64) {
        let anchor_ms = self.x_to_ms(anchor_x);
        self.zoom = new_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let vw = self.visible_window_ms();
        if vw > 0.0 && self.width_px > 0.0 {
            self.view_start_ms = anchor_ms - (anchor_x / self.width_px) * vw;
        }
        self.clamp_view_start();
    }

    /// Multiplicative zoom, e.g. 1.1 per wheel notch.
    pub fn zoom_by(&mut self, factor: f64, anchor_x: f64) {
        self.zoom_to(self.zoom * factor, anchor_x);
    }

    /// Pan by whole wheel notches; positive moves the view later in time.
    pub fn pan_steps(&mut self, steps: f64) {
        self.view_start_ms += self.visible_window_ms() * PAN_STEP_FRACTION * steps;
        self.clamp_view_start();
    }

    /// Put `ms` at the middle of the viewport, clamped to valid range.
    pub fn center_on(&mut self, ms: f64) {
        self.view_start_ms = ms - self.visible_window_ms() * 0.5;
        self.clamp_view_start();
    }

    pub fn set_amp_zoom(&mut self, amp_zoom: f64) {
        self.amp_zoom = amp_zoom.clamp(MIN_AMP_ZOOM, MAX_AMP_ZOOM);
    }

    /// Refit after a resize or when a new buffer arrives. The window is
    /// re-clamped so the view never hangs past the end of the sample.
    pub fn set_extent(&mut self, total_ms: f64, width_px: f64) {
        self.total_ms = total_ms.max(0.0);
        self.width_px = width_px.max(0.0);
        self.clamp_view_start();
    }
}

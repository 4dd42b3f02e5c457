use crate::oto::{round_half_up, OtoEntry};

/// The five timing boundaries of an oto entry. Derivation and editing are
/// total matches over this enum so a new marker kind cannot be silently
/// half-wired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Offset,
    Overlap,
    Preutter,
    Consonant,
    Cutoff,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 5] = [
        MarkerKind::Offset,
        MarkerKind::Overlap,
        MarkerKind::Preutter,
        MarkerKind::Consonant,
        MarkerKind::Cutoff,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MarkerKind::Offset => "offset",
            MarkerKind::Overlap => "overlap",
            MarkerKind::Preutter => "preutter",
            MarkerKind::Consonant => "consonant",
            MarkerKind::Cutoff => "cutoff",
        }
    }
}

/// All five absolute positions, in ms from buffer start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerSet {
    pub offset: f64,
    pub overlap: f64,
    pub preutter: f64,
    pub consonant: f64,
    pub cutoff: f64,
}

fn clamp(v: f64, min: f64, max: f64) -> f64 {
    v.max(min).min(max)
}

/// Absolute position of one marker, in ms from buffer start.
///
/// `overlap`, `preutter`, and `consonant` are plain offsets from `offset`.
/// Cutoff carries the dual anchor convention:
/// - `cutoff <= 0`: forward from offset, `offset + |cutoff|`
/// - `cutoff > 0`: backward from the end, `total_ms - cutoff`
///
/// Both cutoff forms clamp into `[0, total_ms]`. With an unknown duration
/// (`total_ms` 0) the cutoff degenerates to 0 rather than failing.
pub fn marker_abs(entry: &OtoEntry, kind: MarkerKind, total_ms: f64) -> f64 {
    let total = round_half_up(total_ms.max(0.0)) as f64;
    let offset = entry.offset as f64;
    match kind {
        MarkerKind::Offset => offset,
        MarkerKind::Overlap => offset + entry.overlap as f64,
        MarkerKind::Preutter => offset + entry.preutter as f64,
        MarkerKind::Consonant => offset + entry.consonant as f64,
        MarkerKind::Cutoff => {
            let c = entry.cutoff;
            if c <= 0 {
                clamp(offset + c.unsigned_abs() as f64, 0.0, total)
            } else {
                clamp(total - c as f64, 0.0, total)
            }
        }
    }
}

pub fn derive_markers(entry: &OtoEntry, total_ms: f64) -> MarkerSet {
    MarkerSet {
        offset: marker_abs(entry, MarkerKind::Offset, total_ms),
        overlap: marker_abs(entry, MarkerKind::Overlap, total_ms),
        preutter: marker_abs(entry, MarkerKind::Preutter, total_ms),
        consonant: marker_abs(entry, MarkerKind::Consonant, total_ms),
        cutoff: marker_abs(entry, MarkerKind::Cutoff, total_ms),
    }
}

/// Write an absolute position back into the entry's relative encoding.
///
/// Moving `offset` does not shift the dependent fields; their relative
/// values are re-clamped into `[0, total_ms - new_offset]`, which may
/// truncate them. Cutoff edits always store the forward-from-offset form
/// (`-round(rel)`); the backward form is never produced here.
pub fn set_marker(entry: &mut OtoEntry, kind: MarkerKind, abs_ms: f64, total_ms: f64) {
    let total = round_half_up(total_ms.max(0.0)) as f64;
    // relative to the current offset, for the non-offset markers
    let rel = {
        let offset = entry.offset as f64;
        round_half_up(clamp(abs_ms - offset, 0.0, (total - offset).max(0.0)))
    };
    match kind {
        MarkerKind::Offset => {
            entry.offset = round_half_up(clamp(abs_ms, 0.0, total));
            let span = (total - entry.offset as f64).max(0.0);
            entry.consonant = round_half_up(clamp(entry.consonant as f64, 0.0, span));
            entry.preutter = round_half_up(clamp(entry.preutter as f64, 0.0, span));
            entry.overlap = round_half_up(clamp(entry.overlap as f64, 0.0, span));
        }
        MarkerKind::Consonant => entry.consonant = rel,
        MarkerKind::Preutter => entry.preutter = rel,
        MarkerKind::Overlap => entry.overlap = rel,
        MarkerKind::Cutoff => entry.cutoff = -rel,
    }
}

/// Playable region for an entry: offset up to the cutoff marker, falling
/// back to the buffer end when the region would be empty.
pub fn play_region(entry: &OtoEntry, total_ms: f64) -> (f64, f64) {
    let start = marker_abs(entry, MarkerKind::Offset, total_ms);
    let start = clamp(start, 0.0, total_ms.max(0.0));
    let mut end = marker_abs(entry, MarkerKind::Cutoff, total_ms);
    if end <= start {
        end = total_ms.max(0.0);
    }
    (start, end)
}

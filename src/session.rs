use crate::marker::{set_marker, MarkerKind};
use crate::oto::{self, OtoEntry};

/// Owned record sequence for one voice bank. Records are independent of
/// each other; removal is a plain splice and nothing else aliases a record
/// by identity.
#[derive(Clone, Debug, Default)]
pub struct Project {
    pub entries: Vec<OtoEntry>,
}

impl Project {
    pub fn from_text(text: &str) -> Self {
        Self {
            entries: oto::parse(text),
        }
    }

    pub fn to_text(&self) -> String {
        oto::serialize(&self.entries)
    }

    /// Append a default record for every resource name that has no entry
    /// yet (match is basename-insensitive). Returns how many were added.
    pub fn merge_resources<S: AsRef<str>>(&mut self, resources: &[S]) -> usize {
        let mut added = 0;
        for name in resources {
            let name = name.as_ref();
            if !self.entries.iter().any(|e| same_file(&e.filename, name)) {
                self.entries.push(OtoEntry::for_resource(name));
                added += 1;
            }
        }
        added
    }

    /// Insert a copy of `idx` right after it; returns the copy's index.
    pub fn duplicate(&mut self, idx: usize) -> Option<usize> {
        let copy = self.entries.get(idx)?.clone();
        self.entries.insert(idx + 1, copy);
        Some(idx + 1)
    }

    pub fn remove(&mut self, idx: usize) -> Option<OtoEntry> {
        if idx < self.entries.len() {
            Some(self.entries.remove(idx))
        } else {
            None
        }
    }

    pub fn rename_alias(&mut self, idx: usize, alias: &str) -> bool {
        if let Some(entry) = self.entries.get_mut(idx) {
            entry.alias = alias.to_string();
            true
        } else {
            false
        }
    }
}

/// Whether two resource names refer to the same file: exact match, or the
/// same basename ignoring case (oto files frequently carry foreign path
/// prefixes).
pub fn same_file(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    basename_lower(a) == basename_lower(b)
}

fn basename_lower(name: &str) -> String {
    name.rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(name)
        .to_lowercase()
}

/// Resolve a record's filename against a loaded resource list. Exact name
/// match wins, then basename-insensitive. `None` (resource not loaded) is
/// an expected, non-fatal outcome.
pub fn resource_index_for<S: AsRef<str>>(resources: &[S], filename: &str) -> Option<usize> {
    if let Some(idx) = resources.iter().position(|r| r.as_ref() == filename) {
        return Some(idx);
    }
    let wanted = basename_lower(filename);
    resources
        .iter()
        .position(|r| basename_lower(r.as_ref()) == wanted)
}

struct DragState {
    kind: MarkerKind,
    scratch: OtoEntry,
}

/// Transient editing state: selection, cursor, and the active drag
/// gesture.
///
/// Marker drags follow a two-tier consistency model. Every pointer move
/// updates a scratch copy of the record (`drag_to`), which is what gets
/// rendered; the canonical record in the [`Project`] is written once, at
/// gesture end (`commit_drag`). Keyboard marker placement has no gesture
/// and commits immediately.
#[derive(Default)]
pub struct EditSession {
    pub selected: Option<usize>,
    pub cursor_ms: f64,
    pub selected_marker: Option<MarkerKind>,
    drag: Option<DragState>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a record (clamped into range). An unfinished drag on the
    /// previous record is abandoned, not committed.
    pub fn select(&mut self, project: &Project, idx: usize) -> bool {
        self.drag = None;
        if project.entries.is_empty() {
            self.selected = None;
            return false;
        }
        let idx = idx.min(project.entries.len() - 1);
        self.selected = Some(idx);
        self.cursor_ms = project.entries[idx].offset as f64;
        true
    }

    pub fn selected_entry<'a>(&self, project: &'a Project) -> Option<&'a OtoEntry> {
        project.entries.get(self.selected?)
    }

    /// The record to draw: the drag scratch while a gesture is live,
    /// otherwise the canonical record.
    pub fn render_entry<'a>(&'a self, project: &'a Project) -> Option<&'a OtoEntry> {
        match &self.drag {
            Some(drag) => Some(&drag.scratch),
            None => self.selected_entry(project),
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self, project: &Project, kind: MarkerKind) -> bool {
        let Some(entry) = self.selected_entry(project) else {
            return false;
        };
        self.selected_marker = Some(kind);
        self.drag = Some(DragState {
            kind,
            scratch: entry.clone(),
        });
        true
    }

    /// Move the dragged marker to an absolute position. Only the scratch
    /// copy changes; dependents see nothing until commit.
    pub fn drag_to(&mut self, abs_ms: f64, total_ms: f64) {
        if let Some(drag) = &mut self.drag {
            set_marker(&mut drag.scratch, drag.kind, abs_ms, total_ms);
        }
    }

    /// End the gesture, writing the scratch record into the project.
    /// Returns whether the canonical record changed.
    pub fn commit_drag(&mut self, project: &mut Project) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let Some(idx) = self.selected else {
            return false;
        };
        match project.entries.get_mut(idx) {
            Some(entry) if *entry != drag.scratch => {
                *entry = drag.scratch;
                true
            }
            _ => false,
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Gesture-less marker placement (keyboard): writes the canonical
    /// record immediately.
    pub fn place_marker(
        &mut self,
        project: &mut Project,
        kind: MarkerKind,
        abs_ms: f64,
        total_ms: f64,
    ) -> bool {
        let Some(idx) = self.selected else {
            return false;
        };
        let Some(entry) = project.entries.get_mut(idx) else {
            return false;
        };
        self.selected_marker = Some(kind);
        set_marker(entry, kind, abs_ms, total_ms);
        true
    }

    /// Insert a copy of the selected record after it and select the copy.
    pub fn duplicate_selected(&mut self, project: &mut Project) -> bool {
        let Some(idx) = self.selected else {
            return false;
        };
        match project.duplicate(idx) {
            Some(new_idx) => {
                self.selected = Some(new_idx);
                true
            }
            None => false,
        }
    }

    /// Remove the selected record; selection moves to the next record (or
    /// the new last one), clearing when the project empties.
    pub fn remove_selected(&mut self, project: &mut Project) -> Option<OtoEntry> {
        let idx = self.selected?;
        let removed = project.remove(idx)?;
        self.drag = None;
        self.selected = if project.entries.is_empty() {
            None
        } else {
            Some(idx.min(project.entries.len() - 1))
        };
        Some(removed)
    }
}

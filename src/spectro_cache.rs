use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use crate::audio::AudioBuffer;
use crate::render::spectrogram::{compute_spectrogram, SpectrogramConfig, SpectrogramData};

struct JobDone {
    key: String,
    generation: u64,
    grid: SpectrogramData,
}

struct Inflight {
    generation: u64,
    cancel: Arc<AtomicBool>,
}

/// Spectrogram cache keyed by resource identity (the record's filename).
///
/// Grids are computed on a background thread so marker interaction never
/// blocks on the STFT. Each job carries a generation token; results from a
/// job that was superseded or invalidated while in flight are discarded by
/// [`SpectroCache::drain`], never written into the cache. Cached grids are
/// immutable; `invalidate` + a new `request` replaces an entry, nothing
/// updates one in place.
pub struct SpectroCache {
    cfg: SpectrogramConfig,
    entries: HashMap<String, Arc<SpectrogramData>>,
    inflight: HashMap<String, Inflight>,
    next_generation: u64,
    tx: Sender<JobDone>,
    rx: Receiver<JobDone>,
}

impl SpectroCache {
    pub fn new(cfg: SpectrogramConfig) -> Self {
        let (tx, rx) = channel();
        Self {
            cfg,
            entries: HashMap::new(),
            inflight: HashMap::new(),
            next_generation: 0,
            tx,
            rx,
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<SpectrogramData>> {
        self.entries.get(key).cloned()
    }

    pub fn is_inflight(&self, key: &str) -> bool {
        self.inflight.contains_key(key)
    }

    /// Queue a background compute for `key` unless a grid is already cached
    /// or in flight. Returns whether a job was spawned.
    pub fn request(&mut self, key: &str, buffer: Arc<AudioBuffer>) -> bool {
        if self.entries.contains_key(key) || self.inflight.contains_key(key) {
            return false;
        }
        self.next_generation += 1;
        let generation = self.next_generation;
        let cancel = Arc::new(AtomicBool::new(false));
        self.inflight.insert(
            key.to_string(),
            Inflight {
                generation,
                cancel: cancel.clone(),
            },
        );
        let tx = self.tx.clone();
        let cfg = self.cfg.clone();
        let key = key.to_string();
        std::thread::spawn(move || {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let grid = compute_spectrogram(&buffer, &cfg);
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let _ = tx.send(JobDone {
                key,
                generation,
                grid,
            });
        });
        true
    }

    /// Collect finished jobs into the cache. Returns how many grids landed;
    /// stale results (superseded generation, or invalidated while running)
    /// are dropped here.
    pub fn drain(&mut self) -> usize {
        let mut landed = 0;
        while let Ok(done) = self.rx.try_recv() {
            let current = match self.inflight.get(&done.key) {
                Some(job) if job.generation == done.generation => true,
                _ => false,
            };
            if !current {
                continue;
            }
            self.inflight.remove(&done.key);
            self.entries.insert(done.key, Arc::new(done.grid));
            landed += 1;
        }
        landed
    }

    /// Drop any cached grid for `key` and cancel an in-flight compute. Call
    /// whenever the resource's decoded buffer is replaced.
    pub fn invalidate(&mut self, key: &str) {
        if let Some(job) = self.inflight.remove(key) {
            job.cancel.store(true, Ordering::Relaxed);
        }
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        let keys: Vec<String> = self.inflight.keys().cloned().collect();
        for key in keys {
            self.invalidate(&key);
        }
        self.entries.clear();
    }
}

// THEORY:
// The `parallel` module scales the classifier in two directions without changing its
// answer.
//
// Within one frame, `ParallelClassifier` splits the buffer into contiguous bands of
// whole pixels and scans them on scoped threads. The bands share one atomic dark-pixel
// counter. Workers count locally and flush every `FLUSH_INTERVAL` pixels; the first
// flush that pushes the shared total past the threshold raises a stop flag, and every
// worker checks that flag between runs. The counter only ever grows, so the final
// comparison `total > threshold` is the same one the serial scan makes: either every
// band finished and the total is exact, or someone already saw it exceed the threshold.
//
// Across frames, `classify_batch` moves independent buffers off the caller's async task
// with `spawn_blocking`, one job per frame, and returns the verdicts in input order.

use crate::classifier::{ClassifierConfig, DarknessClassifier};
use crate::core_modules::error::ConfigError;
use crate::core_modules::frame::{Frame, OwnedFrame};
use crate::core_modules::pixel::CHANNELS;
use futures::future::join_all;
use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

/// Frames smaller than this per worker are not worth a thread.
const MIN_PIXELS_PER_WORKER: usize = 64 * 1024;
/// Pixels a worker counts before publishing to the shared counter.
const FLUSH_INTERVAL: usize = 1024;

/// Multi-threaded variant of `DarknessClassifier` for large frames.
#[derive(Debug, Clone)]
pub struct ParallelClassifier {
    classifier: DarknessClassifier,
    workers: usize,
    min_pixels_per_worker: usize,
}

impl Default for ParallelClassifier {
    fn default() -> Self {
        Self::from_classifier(DarknessClassifier::default())
    }
}

impl ParallelClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_classifier(DarknessClassifier::new(config)?))
    }

    pub fn from_classifier(classifier: DarknessClassifier) -> Self {
        Self {
            classifier,
            workers: num_cpus::get().max(1),
            min_pixels_per_worker: MIN_PIXELS_PER_WORKER,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_min_pixels_per_worker(mut self, pixels: usize) -> Self {
        self.min_pixels_per_worker = pixels.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn classifier(&self) -> &DarknessClassifier {
        &self.classifier
    }

    /// Same contract as `DarknessClassifier::is_dark`.
    pub fn is_dark(&self, bytes: &[u8], width: u32, height: u32) -> bool {
        match Frame::new(bytes, width, height) {
            Ok(frame) => self.is_dark_frame(&frame),
            Err(error) => {
                debug!("treating {width}x{height} buffer as not dark: {error}");
                false
            }
        }
    }

    pub fn is_dark_frame(&self, frame: &Frame<'_>) -> bool {
        let pixel_count = frame.pixel_count();
        let workers = self
            .workers
            .min(pixel_count / self.min_pixels_per_worker)
            .max(1);
        if workers == 1 {
            return self.classifier.classify_frame(frame).is_dark();
        }

        let config = *self.classifier.config();
        let threshold = config.dark_pixel_threshold(pixel_count);
        let dark_pixels = AtomicUsize::new(0);
        let exceeded = AtomicBool::new(false);

        thread::scope(|scope| {
            for band in frame.bands(workers) {
                let dark_pixels = &dark_pixels;
                let exceeded = &exceeded;
                scope.spawn(move || scan_band(band, &config, threshold, dark_pixels, exceeded));
            }
        });

        let total = dark_pixels.load(Ordering::Relaxed);
        debug!("{workers} workers counted {total} dark pixels (threshold {threshold})");
        total > threshold
    }
}

fn scan_band(
    band: &[u8],
    config: &ClassifierConfig,
    threshold: usize,
    dark_pixels: &AtomicUsize,
    exceeded: &AtomicBool,
) {
    for run in band.chunks(FLUSH_INTERVAL * CHANNELS) {
        if exceeded.load(Ordering::Relaxed) {
            return;
        }
        let local = run
            .chunks_exact(CHANNELS)
            .filter(|rgba| config.is_dark_rgb(rgba[0], rgba[1], rgba[2]))
            .count();
        if local == 0 {
            continue;
        }
        let total = dark_pixels.fetch_add(local, Ordering::Relaxed) + local;
        if total > threshold {
            exceeded.store(true, Ordering::Relaxed);
            return;
        }
    }
}

/// Classifies independent frames on tokio's blocking pool, preserving input order.
///
/// Must be awaited inside a tokio runtime. A job that fails to complete yields `false`.
pub async fn classify_batch(classifier: Arc<DarknessClassifier>, frames: Vec<OwnedFrame>) -> Vec<bool> {
    let jobs = frames.into_iter().map(|frame| {
        let classifier = Arc::clone(&classifier);
        tokio::task::spawn_blocking(move || match frame.view() {
            Ok(view) => classifier.classify_frame(&view).is_dark(),
            Err(error) => {
                debug!("treating batch frame as not dark: {error}");
                false
            }
        })
    });

    join_all(jobs)
        .await
        .into_iter()
        .map(|result| {
            result.unwrap_or_else(|error| {
                warn!("classification job did not complete: {error}");
                false
            })
        })
        .collect()
}

use std::sync::Mutex;

/// Counters for a survey-analysis run.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    cells_reported: usize,
    cells_skipped: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                cells_reported: 0,
                cells_skipped: 0,
            }),
        }
    }

    pub fn record_reported(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.cells_reported += 1;
        }
    }

    pub fn record_skipped(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.cells_skipped += 1;
        }
    }

    /// (reported, skipped) counts.
    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.cells_reported, metrics.cells_skipped)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

use crate::record::BehaviorLabel;
use std::collections::HashMap;
use std::sync::Mutex;

/// Counters accumulated over generation, processing and classification runs.
pub struct PipelineMetrics {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub samples_generated: usize,
    pub rows_processed: usize,
    pub errors: usize,
    pub labels: HashMap<BehaviorLabel, usize>,
}

#[derive(Default)]
struct Metrics {
    samples_generated: usize,
    rows_processed: usize,
    errors: usize,
    labels: HashMap<BehaviorLabel, usize>,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_generated(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.samples_generated += count;
        }
    }

    pub fn record_processed(&self, rows: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rows_processed += rows;
        }
    }

    pub fn record_labels<'a>(&self, labels: impl IntoIterator<Item = &'a BehaviorLabel>) {
        if let Ok(mut metrics) = self.inner.lock() {
            for label in labels {
                *metrics.labels.entry(*label).or_insert(0) += 1;
            }
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                samples_generated: metrics.samples_generated,
                rows_processed: metrics.rows_processed,
                errors: metrics.errors,
                labels: metrics.labels.clone(),
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = PipelineMetrics::new();
        metrics.record_generated(4);
        metrics.record_generated(2);
        metrics.record_processed(6);
        metrics.record_labels(&[
            BehaviorLabel::Walking,
            BehaviorLabel::Walking,
            BehaviorLabel::Unknown,
        ]);
        metrics.record_error();

        let snap = metrics.snapshot();
        assert_eq!(snap.samples_generated, 6);
        assert_eq!(snap.rows_processed, 6);
        assert_eq!(snap.errors, 1);
        assert_eq!(snap.labels[&BehaviorLabel::Walking], 2);
        assert_eq!(snap.labels.get(&BehaviorLabel::Running), None);
    }
}

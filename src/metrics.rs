//! Session statistics for the interactive scoring loop.

use crate::types::prediction::ChurnLabel;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Counters for one form session, printed when the session ends.
pub struct SessionMetrics {
    /// Total profiles scored
    pub predictions_scored: AtomicU64,
    /// Predictions with a churn verdict
    pub churn_verdicts: AtomicU64,
    /// Requests rejected before scoring (validation or unknown category)
    pub rejected_inputs: AtomicU64,
    /// Per-prediction latency (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    /// Probability distribution buckets
    probability_buckets: RwLock<[u64; 10]>,
    /// Session start for duration reporting
    start_time: Instant,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            predictions_scored: AtomicU64::new(0),
            churn_verdicts: AtomicU64::new(0),
            rejected_inputs: AtomicU64::new(0),
            processing_times: RwLock::new(Vec::new()),
            probability_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record a completed prediction.
    pub fn record_prediction(&self, elapsed: Duration, probability: f64, label: ChurnLabel) {
        self.predictions_scored.fetch_add(1, Ordering::Relaxed);
        if label == ChurnLabel::Churn {
            self.churn_verdicts.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut times) = self.processing_times.write() {
            times.push(elapsed.as_micros() as u64);
        }

        let bucket = (probability * 10.0).min(9.0) as usize;
        if let Ok(mut buckets) = self.probability_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record an input rejected before reaching the model.
    pub fn record_rejected(&self) {
        self.rejected_inputs.fetch_add(1, Ordering::Relaxed);
    }

    /// Latency statistics over the session.
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let times = self.processing_times.read().unwrap();
        if times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Probability distribution over the session.
    pub fn get_probability_distribution(&self) -> [u64; 10] {
        *self.probability_buckets.read().unwrap()
    }

    /// Print the session summary.
    pub fn print_summary(&self) {
        let scored = self.predictions_scored.load(Ordering::Relaxed);
        let churn = self.churn_verdicts.load(Ordering::Relaxed);
        let rejected = self.rejected_inputs.load(Ordering::Relaxed);
        let churn_rate = if scored > 0 {
            (churn as f64 / scored as f64) * 100.0
        } else {
            0.0
        };
        let stats = self.get_processing_stats();

        info!(
            scored = scored,
            churn_verdicts = churn,
            churn_rate = format!("{:.1}%", churn_rate),
            rejected_inputs = rejected,
            session_secs = self.start_time.elapsed().as_secs(),
            "Session summary"
        );

        if stats.count > 0 {
            info!(
                mean_us = stats.mean_us,
                p50_us = stats.p50_us,
                p95_us = stats.p95_us,
                max_us = stats.max_us,
                "Prediction latency (us)"
            );
        }

        let distribution = self.get_probability_distribution();
        let total: u64 = distribution.iter().sum();
        if total > 0 {
            for (i, &count) in distribution.iter().enumerate() {
                if count > 0 {
                    info!(
                        "probability {:.1}-{:.1}: {} ({:.1}%)",
                        i as f64 / 10.0,
                        (i + 1) as f64 / 10.0,
                        count,
                        (count as f64 / total as f64) * 100.0
                    );
                }
            }
        }
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Latency statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub max_us: u64,
}

//! Resolution metrics and observability module.
//!
//! Tracks how often a localized lookup found content for the requested
//! language, had to use the canonical fallback, or came back empty.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global resolution metrics singleton.
pub struct ResolutionMetrics {
    /// Lookups answered in the requested language
    hits: AtomicUsize,

    /// Lookups answered through the canonical-language fallback
    fallbacks: AtomicUsize,

    /// Lookups that produced no content
    misses: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<ResolutionMetrics> = OnceLock::new();

impl ResolutionMetrics {
    /// Get the global resolution metrics instance.
    pub fn global() -> &'static ResolutionMetrics {
        METRICS.get_or_init(|| ResolutionMetrics {
            hits: AtomicUsize::new(0),
            fallbacks: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        })
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let fallbacks = self.fallbacks();
        let misses = self.misses();
        let total = hits + fallbacks + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            hits,
            fallbacks,
            misses,
            hit_rate,
        }
    }

    /// Reset all metrics to zero (useful for testing).
    #[cfg(test)]
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.fallbacks.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Metrics report containing current resolution statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub hits: usize,

    pub fallbacks: usize,

    pub misses: usize,

    /// Share of lookups answered in the requested language, as a percentage (0-100)
    pub hit_rate: f64,
}

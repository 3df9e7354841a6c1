//! Host state shared between probers and the renderer.
//!
//! The rendering core only ever sees hosts through the read-only [`Host`] trait;
//! whatever produces ping results (an ICMP prober, a replay source, a test
//! fixture) owns mutation. [`MonitoredHost`] is the concrete thread-safe
//! container those producers write into.

use parking_lot::RwLock;
use std::collections::VecDeque;

/// Outcome of a single ping attempt.
///
/// `latency` is in milliseconds; [`PingResult::LOSS_LATENCY`] marks a lost or
/// timed-out probe. `error` flags a reply that arrived but was degraded
/// (e.g. a TTL-exceeded or destination-unreachable response).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingResult {
    pub latency: f64,
    pub error: bool,
}

impl PingResult {
    /// Sentinel latency marking a lost/timed-out probe.
    pub const LOSS_LATENCY: f64 = -1.0;

    /// A successful reply with the given round-trip time.
    pub fn reply(latency: f64) -> Self {
        Self {
            latency,
            error: false,
        }
    }

    /// A degraded reply with the given round-trip time.
    pub fn degraded(latency: f64) -> Self {
        Self {
            latency,
            error: true,
        }
    }

    /// A lost or timed-out probe.
    pub fn loss() -> Self {
        Self {
            latency: Self::LOSS_LATENCY,
            error: false,
        }
    }

    /// Whether this result is the loss sentinel.
    pub fn is_loss(&self) -> bool {
        self.latency == Self::LOSS_LATENCY
    }
}

/// Aggregate statistics over a host's recent result history.
///
/// Every field is either a present value or explicitly absent; the formatter
/// renders absence as a fixed-width placeholder, never as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResultsSummary {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
    pub stdev: Option<f64>,
    /// Packet loss as a fraction in `[0, 1]`.
    pub pktloss: Option<f64>,
}

/// Read-only view of a monitored host, as consumed by layouts.
///
/// Implementations must tolerate being read while a prober mutates the
/// underlying state concurrently; one redraw cycle of staleness is acceptable.
pub trait Host: Send + Sync {
    /// Whether the host's prober is still producing results.
    fn is_running(&self) -> bool;

    /// Terminal/degraded status message. When set, layouts display it instead
    /// of statistics.
    fn status(&self) -> Option<String>;

    /// Aggregate statistics over the current result history.
    fn results_summary(&self) -> ResultsSummary;

    /// Snapshot of the result history, oldest first.
    fn results(&self) -> Vec<PingResult>;

    /// Advisory request to keep at most `length` results. Layouts call this
    /// each redraw with the space available in the current row.
    fn set_results_length(&self, length: usize);

    /// Label as it should appear in rendered output.
    fn rendered_label(&self) -> String;
}

struct HostInner {
    running: bool,
    status: Option<String>,
    results: VecDeque<PingResult>,
    results_length: usize,
}

/// Thread-safe host state container.
///
/// A prober task pushes results and flips the running flag; any number of
/// layout tasks read concurrently through the [`Host`] trait. The interior
/// lock is held only for the duration of a single accessor call, so the
/// renderer never blocks a prober across a redraw.
pub struct MonitoredHost {
    label: String,
    inner: RwLock<HostInner>,
}

impl MonitoredHost {
    /// Result history cap before any layout has advised one.
    pub const DEFAULT_RESULTS_LENGTH: usize = 100;

    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            inner: RwLock::new(HostInner {
                running: false,
                status: None,
                results: VecDeque::new(),
                results_length: Self::DEFAULT_RESULTS_LENGTH,
            }),
        }
    }

    /// Record the outcome of one probe, evicting the oldest results beyond
    /// the current history cap.
    pub fn add_result(&self, result: PingResult) {
        let mut inner = self.inner.write();
        inner.results.push_back(result);
        let cap = inner.results_length;
        while inner.results.len() > cap {
            inner.results.pop_front();
        }
    }

    /// Mark the host's prober as active or finished.
    pub fn set_running(&self, running: bool) {
        self.inner.write().running = running;
    }

    /// Set a status message; layouts show it in place of statistics.
    pub fn set_status(&self, status: impl Into<String>) {
        self.inner.write().status = Some(status.into());
    }

    /// Clear the status message, restoring the statistics display.
    pub fn clear_status(&self) {
        self.inner.write().status = None;
    }
}

impl Host for MonitoredHost {
    fn is_running(&self) -> bool {
        self.inner.read().running
    }

    fn status(&self) -> Option<String> {
        self.inner.read().status.clone()
    }

    fn results_summary(&self) -> ResultsSummary {
        let inner = self.inner.read();
        summarize(inner.results.iter())
    }

    fn results(&self) -> Vec<PingResult> {
        self.inner.read().results.iter().copied().collect()
    }

    fn set_results_length(&self, length: usize) {
        let mut inner = self.inner.write();
        inner.results_length = length;
        while inner.results.len() > length {
            inner.results.pop_front();
        }
    }

    fn rendered_label(&self) -> String {
        self.label.clone()
    }
}

/// Compute summary statistics over a result history.
///
/// min/avg/max cover non-loss latencies only; stdev is the sample standard
/// deviation and needs at least two latencies; pktloss is the fraction of
/// loss sentinels over the whole history.
fn summarize<'a>(results: impl Iterator<Item = &'a PingResult>) -> ResultsSummary {
    let mut latencies = Vec::new();
    let mut total = 0usize;
    let mut losses = 0usize;

    for result in results {
        total += 1;
        if result.is_loss() {
            losses += 1;
        } else {
            latencies.push(result.latency);
        }
    }

    if total == 0 {
        return ResultsSummary::default();
    }

    let pktloss = Some(losses as f64 / total as f64);
    if latencies.is_empty() {
        return ResultsSummary {
            pktloss,
            ..Default::default()
        };
    }

    let min = latencies.iter().copied().reduce(f64::min);
    let max = latencies.iter().copied().reduce(f64::max);
    let avg = latencies.iter().sum::<f64>() / latencies.len() as f64;

    let stdev = if latencies.len() >= 2 {
        let variance = latencies
            .iter()
            .map(|latency| (latency - avg).powi(2))
            .sum::<f64>()
            / (latencies.len() - 1) as f64;
        Some(variance.sqrt())
    } else {
        None
    };

    ResultsSummary {
        min,
        avg: Some(avg),
        max,
        stdev,
        pktloss,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_host_has_absent_summary() {
        let host = MonitoredHost::new("a");
        assert_eq!(host.results_summary(), ResultsSummary::default());
        assert!(host.results().is_empty());
    }

    #[test]
    fn summary_over_mixed_results() {
        let host = MonitoredHost::new("a");
        host.add_result(PingResult::reply(10.0));
        host.add_result(PingResult::reply(20.0));
        host.add_result(PingResult::loss());
        host.add_result(PingResult::degraded(30.0));

        let summary = host.results_summary();
        assert_eq!(summary.min, Some(10.0));
        assert_eq!(summary.max, Some(30.0));
        assert_eq!(summary.avg, Some(20.0));
        assert_eq!(summary.pktloss, Some(0.25));
        // Sample stdev of [10, 20, 30]
        assert_eq!(summary.stdev, Some(10.0));
    }

    #[test]
    fn single_latency_has_no_stdev() {
        let host = MonitoredHost::new("a");
        host.add_result(PingResult::reply(5.0));

        let summary = host.results_summary();
        assert_eq!(summary.avg, Some(5.0));
        assert_eq!(summary.stdev, None);
    }

    #[test]
    fn all_losses_keep_latency_fields_absent() {
        let host = MonitoredHost::new("a");
        host.add_result(PingResult::loss());
        host.add_result(PingResult::loss());

        let summary = host.results_summary();
        assert_eq!(summary.min, None);
        assert_eq!(summary.avg, None);
        assert_eq!(summary.max, None);
        assert_eq!(summary.stdev, None);
        assert_eq!(summary.pktloss, Some(1.0));
    }

    #[test]
    fn advisory_trim_evicts_oldest_results() {
        let host = MonitoredHost::new("a");
        for latency in 1..=5 {
            host.add_result(PingResult::reply(latency as f64));
        }

        host.set_results_length(3);
        let results = host.results();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].latency, 3.0);
        assert_eq!(results[2].latency, 5.0);
    }

    #[test]
    fn zero_length_trim_empties_history() {
        let host = MonitoredHost::new("a");
        host.add_result(PingResult::reply(1.0));
        host.set_results_length(0);
        assert!(host.results().is_empty());

        // New results are evicted immediately under a zero cap
        host.add_result(PingResult::reply(2.0));
        assert!(host.results().is_empty());
    }

    #[test]
    fn running_flag_and_status_round_trip() {
        let host = MonitoredHost::new("example.com");
        assert!(!host.is_running());

        host.set_running(true);
        assert!(host.is_running());

        host.set_status("unreachable");
        assert_eq!(host.status(), Some("unreachable".to_string()));

        host.clear_status();
        assert_eq!(host.status(), None);
        assert_eq!(host.rendered_label(), "example.com");
    }
}

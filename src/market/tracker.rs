//! Volatility tracker: latest-request-wins swing estimates.
//!
//! Every request is tagged with a generation number. A fetch that resolves
//! after a newer request was issued is discarded, so a slow response for an
//! old symbol can never overwrite the estimate for the current one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::volatility::max_swing;
use super::PriceHistory;

/// Most recent accepted volatility estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwingEstimate {
    pub symbol: String,
    /// Max relative high-low range over the window
    pub swing_pct: f64,
    /// Bars in the window
    pub bars: usize,
    pub fetched_at: DateTime<Utc>,
    /// Request generation that produced this estimate
    pub generation: u64,
}

/// What happened to a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Estimate replaced
    Applied,
    /// A newer request superseded this one
    Stale,
    /// Fetch failed or returned no usable bars; prior estimate kept
    Failed,
}

/// Tracks the swing estimate for whichever symbol was requested last.
pub struct VolatilityTracker<P> {
    source: Arc<P>,
    interval: String,
    limit: u32,
    generation: Arc<AtomicU64>,
    estimate: Arc<RwLock<Option<SwingEstimate>>>,
}

impl<P: PriceHistory> VolatilityTracker<P> {
    pub fn new(source: P, interval: impl Into<String>, limit: u32) -> Self {
        Self {
            source: Arc::new(source),
            interval: interval.into(),
            limit,
            generation: Arc::new(AtomicU64::new(0)),
            estimate: Arc::new(RwLock::new(None)),
        }
    }

    /// Start a best-effort fetch for `symbol`; supersedes earlier requests.
    ///
    /// No retry: a failure is logged and leaves the current estimate alone.
    pub fn request(&self, symbol: &str) -> JoinHandle<FetchOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let estimate = Arc::clone(&self.estimate);
        let source = Arc::clone(&self.source);
        let symbol = symbol.trim().to_uppercase();
        let interval = self.interval.clone();
        let limit = self.limit;

        debug!(symbol = %symbol, generation, "Requesting price history");

        tokio::spawn(async move {
            let klines = match source.recent_klines(&symbol, &interval, limit).await {
                Ok(klines) => klines,
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Failed to fetch price history");
                    return FetchOutcome::Failed;
                }
            };

            let Some(swing_pct) = max_swing(&klines) else {
                warn!(symbol = %symbol, bars = klines.len(), "No usable bars in price history");
                return FetchOutcome::Failed;
            };

            let mut slot = estimate.write().await;
            if latest.load(Ordering::SeqCst) != generation {
                debug!(symbol = %symbol, generation, "Discarding stale price history");
                return FetchOutcome::Stale;
            }

            info!(
                symbol = %symbol,
                swing_pct = swing_pct,
                bars = klines.len(),
                "Updated volatility estimate"
            );

            *slot = Some(SwingEstimate {
                symbol,
                swing_pct,
                bars: klines.len(),
                fetched_at: Utc::now(),
                generation,
            });

            FetchOutcome::Applied
        })
    }

    /// Current estimate, if any fetch has succeeded.
    pub async fn current(&self) -> Option<SwingEstimate> {
        self.estimate.read().await.clone()
    }

    /// Generation of the most recent request.
    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::{DateTime, Days, NaiveTime, Utc};
use tokio::{sync::RwLock, task::JoinHandle};

/// Usage recorded for one client today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QuotaEntry {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Snapshot returned by [`RateLimiter::check`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaStatus {
    pub count: u32,
    pub limit: u32,
    pub can_use: bool,
    pub reset_at: DateTime<Utc>,
}

impl QuotaStatus {
    /// Uses left once the current request is counted
    pub fn remaining_after_use(&self) -> u32 {
        self.limit.saturating_sub(self.count + 1)
    }
}

/// Next UTC midnight after `now`
fn next_reset(now: DateTime<Utc>) -> DateTime<Utc> {
    (now.date_naive() + Days::new(1))
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Per-client daily quota kept in process memory
///
/// Best-effort: counts live only as long as the process and concurrent
/// requests from one client may both pass a check before either is recorded.
#[derive(Clone)]
pub struct RateLimiter {
    entries: Arc<RwLock<HashMap<String, QuotaEntry>>>,
    daily_limit: u32,
}

impl RateLimiter {
    pub fn new(daily_limit: u32) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            daily_limit,
        }
    }

    /// Current usage for `client`, opening a fresh day when the old one expired
    pub async fn check(&self, client: &str, now: DateTime<Utc>) -> QuotaStatus {
        let mut entries = self.entries.write().await;
        let entry = entries
            .entry(client.to_string())
            .and_modify(|entry| {
                if entry.reset_at <= now {
                    *entry = QuotaEntry {
                        count: 0,
                        reset_at: next_reset(now),
                    };
                }
            })
            .or_insert_with(|| QuotaEntry {
                count: 0,
                reset_at: next_reset(now),
            });

        QuotaStatus {
            count: entry.count,
            limit: self.daily_limit,
            can_use: entry.count < self.daily_limit,
            reset_at: entry.reset_at,
        }
    }

    /// Counts one successful recommendation
    pub async fn record_use(&self, client: &str) {
        if let Some(entry) = self.entries.write().await.get_mut(client) {
            entry.count += 1;
        }
    }

    /// Drops expired entries, returning how many were removed
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.reset_at > now);
        before - entries.len()
    }

    /// Spawns the background task that sweeps on a fixed cadence
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = limiter.sweep(Utc::now()).await;
                if removed > 0 {
                    tracing::debug!(removed, "Expired quota entries swept");
                }
            }
        })
    }
}

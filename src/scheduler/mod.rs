//! Scheduler module for keeping the grid view model fresh.

use crate::grid::{build_grid, now_ts, GridRow, Period, ReferenceZone};
use crate::source::{SourceError, UptimeClient};

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex, RwLock};

/// Rows built for one period, replaced whole on every refresh.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub period: Period,
    pub zone: &'static str,
    /// Unix timestamp of the refresh.
    pub generated_at: i64,
    pub rows: Vec<GridRow>,
}

/// Latest snapshot per period.
#[derive(Default)]
pub struct GridCache {
    snapshots: RwLock<HashMap<Period, Arc<Snapshot>>>,
}

impl GridCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, period: Period) -> Option<Arc<Snapshot>> {
        self.snapshots.read().await.get(&period).cloned()
    }

    pub async fn put(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        self.snapshots
            .write()
            .await
            .insert(snapshot.period, snapshot.clone());
        snapshot
    }
}

/// Periodically rebuilds every period's rows from the backend.
pub struct Refresher {
    client: Arc<UptimeClient>,
    cache: Arc<GridCache>,
    zone: ReferenceZone,
    interval: Duration,
    stop: Arc<Mutex<Option<broadcast::Sender<()>>>>,
}

impl Refresher {
    pub fn new(
        client: Arc<UptimeClient>,
        cache: Arc<GridCache>,
        zone: ReferenceZone,
        interval: Duration,
    ) -> Self {
        Self {
            client,
            cache,
            zone,
            interval,
            stop: Arc::new(Mutex::new(None)),
        }
    }

    pub fn cache(&self) -> &Arc<GridCache> {
        &self.cache
    }

    pub fn client(&self) -> &Arc<UptimeClient> {
        &self.client
    }

    pub fn zone(&self) -> ReferenceZone {
        self.zone
    }

    /// Start the background refresh task.
    pub fn start(&self) {
        let client = self.client.clone();
        let cache = self.cache.clone();
        let zone = self.zone;
        let period_interval = self.interval;
        let stop = self.stop.clone();

        tracing::info!(
            "Refresher: Starting with interval {:?} against {}",
            period_interval,
            client.base_url()
        );

        tokio::spawn(async move {
            let (tx, _) = broadcast::channel(1);
            {
                let mut stop_guard = stop.lock().await;
                *stop_guard = Some(tx.clone());
            }

            let mut rx = tx.subscribe();
            let mut interval = tokio::time::interval(period_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = rx.recv() => break,
                    _ = interval.tick() => {
                        refresh_all(&client, &cache, &zone).await;
                    }
                }
            }

            tracing::info!("Refresher: Stopped");
        });
    }

    /// Stop the background refresh task.
    pub async fn stop(&self) {
        let stop = self.stop.lock().await;
        if let Some(tx) = stop.as_ref() {
            let _ = tx.send(());
        }
    }

    /// Rebuild one period now and store it in the cache.
    pub async fn refresh(&self, period: Period) -> Result<Arc<Snapshot>, SourceError> {
        refresh_period(&self.client, &self.cache, &self.zone, period).await
    }

    /// Cached snapshot, or a fresh one when the period was never loaded.
    pub async fn snapshot(&self, period: Period) -> Result<Arc<Snapshot>, SourceError> {
        match self.cache.get(period).await {
            Some(snapshot) => Ok(snapshot),
            None => self.refresh(period).await,
        }
    }
}

/// Refresh every period; a failure keeps that period's previous snapshot.
async fn refresh_all(client: &UptimeClient, cache: &GridCache, zone: &ReferenceZone) {
    for period in Period::ALL {
        if let Err(e) = refresh_period(client, cache, zone, period).await {
            tracing::error!("Refresher: Failed to refresh {}: {}", period, e);
        }
    }
}

async fn refresh_period(
    client: &UptimeClient,
    cache: &GridCache,
    zone: &ReferenceZone,
    period: Period,
) -> Result<Arc<Snapshot>, SourceError> {
    let payload = client.fetch(period).await?;

    for (server, data) in &payload.servers {
        if data.series.len() != period.expected_samples() {
            tracing::debug!(
                "Refresher: {} returned {} samples for {} (expected {})",
                server,
                data.series.len(),
                period,
                period.expected_samples()
            );
        }
    }
    let rows = build_grid(&payload, period, zone);

    tracing::debug!("Refresher: Built {} rows for {}", rows.len(), period);

    Ok(cache
        .put(Snapshot {
            period,
            zone: zone.label(),
            generated_at: now_ts(),
            rows,
        })
        .await)
}

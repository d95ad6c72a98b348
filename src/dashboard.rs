//! Dashboard
//!
//! Collection counts shown on the landing view. A refresh issues the five
//! list requests concurrently; the published stats only change when all five
//! succeed.

use serde::de::IgnoredAny;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::resources::{CarouselImage, NavbarLink, Resource, Review, SocialLink, StoreLink};

/// Counts per content area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub images: usize,
    pub stores: usize,
    /// Social links plus navbar buttons
    pub links: usize,
    pub reviews: usize,
}

/// Fetches and publishes [`DashboardStats`]
#[derive(Debug, Clone)]
pub struct Dashboard {
    client: ApiClient,
    stats: Arc<watch::Sender<DashboardStats>>,
}

impl Dashboard {
    pub fn new(client: ApiClient) -> Self {
        let (tx, _rx) = watch::channel(DashboardStats::default());
        Self {
            client,
            stats: Arc::new(tx),
        }
    }

    /// Last successfully fetched stats
    pub fn stats(&self) -> DashboardStats {
        *self.stats.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardStats> {
        self.stats.subscribe()
    }

    async fn count<R: Resource>(&self) -> ApiResult<usize> {
        let items: Vec<IgnoredAny> = self.client.get(R::PATH).await?;
        Ok(items.len())
    }

    /// Fetch all five collections concurrently. Every request runs to
    /// completion even when another one fails; the first error in collection
    /// order is returned.
    pub async fn fetch(&self) -> ApiResult<DashboardStats> {
        let (images, stores, social, navbar, reviews) = tokio::join!(
            self.count::<CarouselImage>(),
            self.count::<StoreLink>(),
            self.count::<SocialLink>(),
            self.count::<NavbarLink>(),
            self.count::<Review>(),
        );

        Ok(DashboardStats {
            images: images?,
            stores: stores?,
            links: social? + navbar?,
            reviews: reviews?,
        })
    }

    /// Fetch and publish. On failure the previous stats stay in place.
    pub async fn refresh(&self) -> ApiResult<DashboardStats> {
        match self.fetch().await {
            Ok(stats) => {
                self.stats.send_replace(stats);
                tracing::debug!(?stats, "Dashboard refreshed");
                Ok(stats)
            }
            Err(e) => {
                tracing::error!("Failed to refresh dashboard: {}", e);
                Err(e)
            }
        }
    }

    /// Refresh now and then every `period` until the returned task is
    /// stopped or dropped. An authorization failure ends the task, since the
    /// session is gone.
    pub fn start_refresh(&self, period: Duration) -> RefreshTask {
        let dashboard = self.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if let Err(e) = dashboard.refresh().await {
                    if e.is_unauthorized() {
                        tracing::warn!("Stopping dashboard refresh: session ended");
                        break;
                    }
                }
            }
        });

        RefreshTask { handle }
    }
}

/// Handle to a running refresh loop; aborts it on drop
#[derive(Debug)]
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    /// Cancel the loop and wait for it to wind down
    pub async fn stop(mut self) {
        self.handle.abort();
        let _ = (&mut self.handle).await;
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

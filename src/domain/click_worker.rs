//! Background worker for the click-ingestion pipeline.
//!
//! Consumes queued [`ClickEvent`]s, enriches them under a bounded timeout,
//! and appends them with bounded retry. Every failure path converges on
//! "persist what we have": enrichment problems degrade to empty fields, and
//! only a final persistence failure drops the event (logged and counted,
//! never surfaced to the visitor).

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::enrichment::{Enricher, Enrichment};
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;

/// Runs the click worker until the channel closes.
///
/// Events are processed concurrently up to `concurrency` permits. An event
/// already in the channel is recorded even if the visitor disconnected before
/// the redirect response was delivered — recording is decoupled from the
/// response lifecycle.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<dyn ClickRepository>,
    enricher: Arc<dyn Enricher>,
    concurrency: usize,
    enrichment_timeout: Duration,
) {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let clicks = clicks.clone();
        let enricher = enricher.clone();

        tokio::spawn(async move {
            process_event(event, clicks, enricher, enrichment_timeout).await;
            drop(permit);
        });
    }

    debug!("Click worker channel closed, shutting down");
}

/// Enriches and persists a single event.
async fn process_event(
    event: ClickEvent,
    clicks: Arc<dyn ClickRepository>,
    enricher: Arc<dyn Enricher>,
    enrichment_timeout: Duration,
) {
    let enrichment = match tokio::time::timeout(
        enrichment_timeout,
        enricher.enrich(event.ip_address.as_deref(), event.user_agent.as_deref()),
    )
    .await
    {
        Ok(enrichment) => enrichment,
        Err(_) => {
            warn!(link_id = event.link_id, "Click enrichment timed out");
            counter!("clicks.enrichment_failed").increment(1);
            Enrichment::default()
        }
    };

    let new_click = NewClick {
        link_id: event.link_id,
        clicked_at: event.clicked_at,
        user_agent: event.user_agent,
        ip_address: event.ip_address,
        referrer: event.referrer,
        country: enrichment.country,
        device_type: enrichment.device_type,
        browser: enrichment.browser,
    };

    let strategy = ExponentialBackoff::from_millis(50).map(jitter).take(3);

    let record = || {
        let clicks = clicks.clone();
        let new_click = new_click.clone();
        async move { clicks.record_click(new_click).await }
    };

    match Retry::spawn(strategy, record).await {
        Ok(click) => {
            debug!(link_id = click.link_id, click_id = click.id, "Recorded click");
            counter!("clicks.recorded").increment(1);
        }
        Err(e) => {
            error!(link_id = new_click.link_id, error = %e, "Dropping click after retries");
            counter!("clicks.dropped").increment(1);
        }
    }
}

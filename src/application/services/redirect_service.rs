//! Redirect resolution and click capture service.

use std::sync::Arc;

use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::config::RedirectTarget;
use crate::domain::click_event::ClickEvent;
use crate::domain::entities::TrackingLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Raw request context captured for a visit.
///
/// Every field is optional; missing headers must never block a redirect.
#[derive(Debug, Clone, Default)]
pub struct VisitContext {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Cached resolution payload for a pretty slug.
///
/// Carries the link id alongside the target URL so cache hits can enqueue
/// click events without a database lookup.
#[derive(Debug, Serialize, Deserialize)]
struct CachedTarget {
    link_id: i64,
    target_url: String,
}

/// Service resolving inbound visits to their destination.
///
/// Looks up the active link, enqueues a click event, and returns the
/// visitor-facing URL. Click capture is fire-and-forget: enqueueing happens
/// before the response is produced, but neither a full queue nor a recording
/// failure ever turns into a failed redirect.
pub struct RedirectService<L: LinkRepository> {
    links: Arc<L>,
    cache: Arc<dyn CacheService>,
    click_tx: mpsc::Sender<ClickEvent>,
    redirect_target: RedirectTarget,
}

impl<L: LinkRepository> RedirectService<L> {
    /// Creates a new redirect service.
    pub fn new(
        links: Arc<L>,
        cache: Arc<dyn CacheService>,
        click_tx: mpsc::Sender<ClickEvent>,
        redirect_target: RedirectTarget,
    ) -> Self {
        Self {
            links,
            cache,
            click_tx,
            redirect_target,
        }
    }

    /// Resolves a pretty slug to its target URL, recording the visit.
    ///
    /// Inactive and unknown slugs produce the same [`AppError::NotFound`];
    /// the caller cannot probe for deactivated links.
    pub async fn resolve_slug(
        &self,
        slug: &str,
        visit: VisitContext,
    ) -> Result<String, AppError> {
        match self.cache.get_target(slug).await {
            Ok(Some(payload)) => {
                if let Ok(cached) = serde_json::from_str::<CachedTarget>(&payload) {
                    self.enqueue_click(cached.link_id, &visit);
                    return Ok(cached.target_url);
                }
                // Unparseable payload: treat as a miss and repopulate below.
                warn!(slug, "Discarding malformed cache payload");
            }
            Ok(None) => {}
            Err(e) => {
                error!(slug, error = %e, "Cache error, falling back to database");
            }
        }

        let link = self
            .links
            .find_active_by_slug(slug)
            .await?
            .ok_or_else(Self::link_not_found)?;

        let target = self.target_url(&link).to_string();

        // Asynchronously update cache (fire-and-forget).
        if let Ok(payload) = serde_json::to_string(&CachedTarget {
            link_id: link.id,
            target_url: target.clone(),
        }) {
            let cache = self.cache.clone();
            let slug = slug.to_string();
            tokio::spawn(async move {
                if let Err(e) = cache.set_target(&slug, &payload, None).await {
                    error!(slug, error = %e, "Failed to cache redirect target");
                }
            });
        }

        self.enqueue_click(link.id, &visit);

        Ok(target)
    }

    /// Resolves a link by numeric id (non-aliased links), recording the
    /// visit. Inactive links are indistinguishable from unknown ids.
    pub async fn resolve_id(&self, id: i64, visit: VisitContext) -> Result<String, AppError> {
        let link = self
            .links
            .find_by_id(id)
            .await?
            .filter(|link| link.is_active)
            .ok_or_else(Self::link_not_found)?;

        self.enqueue_click(link.id, &visit);

        Ok(self.target_url(&link).to_string())
    }

    /// Picks the visitor-facing URL per deployment configuration.
    fn target_url<'a>(&self, link: &'a TrackingLink) -> &'a str {
        match self.redirect_target {
            RedirectTarget::Destination => &link.destination_url,
            RedirectTarget::Tracking => &link.tracking_url,
        }
    }

    /// Sends a click event to the worker queue without blocking.
    ///
    /// A full queue drops the event; the redirect still succeeds.
    fn enqueue_click(&self, link_id: i64, visit: &VisitContext) {
        let event = ClickEvent::capture(
            link_id,
            visit.ip_address.clone(),
            visit.user_agent.as_deref(),
            visit.referrer.as_deref(),
        );

        match self.click_tx.try_send(event) {
            Ok(()) => debug!(link_id, "Click event enqueued"),
            Err(e) => {
                warn!(link_id, error = %e, "Click queue full, dropping event");
                counter!("clicks.queue_full").increment(1);
            }
        }
    }

    /// The visitor-facing miss outcome.
    ///
    /// Carries no identifying details: unknown slugs, deactivated slugs, and
    /// inactive ids all produce byte-identical responses, so callers cannot
    /// probe for deactivated links.
    fn link_not_found() -> AppError {
        AppError::not_found("Link not found", json!({}))
    }
}

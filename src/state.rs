//! Shared application state wired into every handler.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::config::RedirectTarget;
use crate::domain::click_event::ClickEvent;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};

/// Handler-facing application state.
///
/// Services are concretely typed over the PostgreSQL repositories; unit
/// tests exercise the services directly with mocks instead of going through
/// `AppState`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub link_service: Arc<LinkService<PgLinkRepository>>,
    pub redirect_service: Arc<RedirectService<PgLinkRepository>>,
    pub stats_service: Arc<StatsService<PgClickRepository>>,
    pub cache: Arc<dyn CacheService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires repositories and services around a connection pool.
    pub fn new(
        pool: Arc<PgPool>,
        click_tx: mpsc::Sender<ClickEvent>,
        cache: Arc<dyn CacheService>,
        behind_proxy: bool,
        redirect_target: RedirectTarget,
    ) -> Self {
        let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));
        let click_repository = Arc::new(PgClickRepository::new(pool.clone()));

        let link_service = Arc::new(LinkService::new(link_repository.clone()));
        let redirect_service = Arc::new(RedirectService::new(
            link_repository,
            cache.clone(),
            click_tx.clone(),
            redirect_target,
        ));
        let stats_service = Arc::new(StatsService::new(click_repository));

        Self {
            db: pool,
            link_service,
            redirect_service,
            stats_service,
            cache,
            click_sender: click_tx,
            behind_proxy,
        }
    }
}

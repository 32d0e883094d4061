//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod redirect;
pub mod stats;

pub use health::health_handler;
pub use links::{
    create_link_handler, deactivate_link_handler, delete_link_handler, get_link_handler,
    list_links_handler, regenerate_slug_handler,
};
pub use redirect::{redirect_by_id_handler, redirect_handler};
pub use stats::{country_stats_handler, stats_handler, stats_list_handler};

//! Application services shared by every page.
//!
//! Built once in `App` and passed down as a component prop; pages never look
//! them up from context.

use crate::shared::config::ClientConfig;
use crate::shared::master_data::query_cache::QueryCache;
use crate::shared::master_data::transport::HttpTransport;
use crate::shared::notifications::Notifier;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppServices {
    pub transport: Arc<dyn HttpTransport>,
    pub cache: QueryCache,
    pub config: Arc<ClientConfig>,
    pub notifier: Notifier,
}

impl AppServices {
    pub fn new(transport: Arc<dyn HttpTransport>, config: ClientConfig, notifier: Notifier) -> Self {
        Self {
            transport,
            cache: QueryCache::with_settings(config.cache_settings()),
            config: Arc::new(config),
            notifier,
        }
    }
}

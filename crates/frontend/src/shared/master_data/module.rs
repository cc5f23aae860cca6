//! Per-entity bundle of client, resolver and page defaults.

use super::client::ResourceClient;
use super::query_cache::QueryCache;
use super::resolver::ComboboxResolver;
use super::table_state::TableQuery;
use super::transport::HttpTransport;
use super::ui_state::ModuleUiState;
use crate::shared::config::ClientConfig;
use crate::shared::services::AppServices;
use contracts::domain::common::{AggregateRoot, CollectionSpec};
use std::sync::Arc;

/// Everything a master-data page of `E` needs, derived from the services
pub struct MasterDataModule<E: AggregateRoot> {
    client: ResourceClient<E>,
    config: Arc<ClientConfig>,
}

impl<E: AggregateRoot> Clone for MasterDataModule<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<E: AggregateRoot> MasterDataModule<E> {
    pub fn new(services: &AppServices) -> Self {
        Self::from_parts(
            Arc::clone(&services.transport),
            services.cache.clone(),
            Arc::clone(&services.config),
        )
    }

    pub fn from_parts(
        transport: Arc<dyn HttpTransport>,
        cache: QueryCache,
        config: Arc<ClientConfig>,
    ) -> Self {
        let client = ResourceClient::new(transport, cache, config.client_settings());
        Self { client, config }
    }

    pub fn collection(&self) -> &'static CollectionSpec {
        E::collection()
    }

    pub fn client(&self) -> &ResourceClient<E> {
        &self.client
    }

    pub fn resolver(&self) -> ComboboxResolver<E> {
        ComboboxResolver::new(self.client.clone(), self.config.combobox.limit)
    }

    /// First page, default sort, configured page size
    pub fn initial_query(&self) -> TableQuery {
        TableQuery::new(self.config.table.default_page_size, E::collection().default_sort)
    }

    pub fn initial_ui_state(&self) -> ModuleUiState<E> {
        ModuleUiState::new()
    }

    pub fn page_size_options(&self) -> Vec<u32> {
        self.config.page_size_options()
    }

    pub fn write_permission(&self) -> String {
        E::collection().write_permission()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_data::testing::FakeBackend;
    use contracts::domain::a003_city::aggregate::City;
    use futures::executor::block_on;
    use serde_json::json;

    fn module(backend: &FakeBackend, config: ClientConfig) -> MasterDataModule<City> {
        MasterDataModule::from_parts(Arc::new(backend.clone()), QueryCache::new(), Arc::new(config))
    }

    #[test]
    fn test_initial_query_uses_configured_page_size() {
        let mut config = ClientConfig::default();
        config.table.default_page_size = 25;
        let module = module(&FakeBackend::new(), config);

        let query = module.initial_query();
        assert_eq!(query.page, 0);
        assert_eq!(query.size, 25);
        assert_eq!(query.sort_field, "cityName");
        assert_eq!(module.write_permission(), "cities:write");
        assert!(module.initial_ui_state().selected().is_none());
    }

    #[test]
    fn test_resolver_uses_configured_limit() {
        let mut config = ClientConfig::default();
        config.combobox.limit = 5;
        let cities: Vec<_> = (1..=12)
            .map(|i| json!({ "id": i, "cityName": format!("City {:02}", i), "stateId": 1 }))
            .collect();
        let backend = FakeBackend::new().with_collection("/api/cities", cities);
        let module = module(&backend, config);

        let resolver = module.resolver();
        assert_eq!(resolver.limit(), 5);
        let candidates = block_on(resolver.candidates("", None)).unwrap();
        assert_eq!(candidates.len(), 5);
    }
}

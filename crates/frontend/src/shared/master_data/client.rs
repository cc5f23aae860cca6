//! Paginated REST client of one master-data collection.

use super::download::{self, DownloadedFile};
use super::error::ApiError;
use super::query_cache::{QueryCache, QueryKey, QueryKind};
use super::transport::{HttpResponse, HttpTransport};
use contracts::domain::common::{AggregateRoot, CollectionSpec};
use contracts::shared::api::{BulkUploadReport, MaybeEnvelope, PageRequest, PageResult, WirePage};
use contracts::shared::form::{FormData, ValidationErrors};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// Knobs of the client taken from the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    /// Extra attempts of idempotent GETs after a network failure
    pub get_retries: u32,
    /// `get_all` results of this length are probably truncated by the server
    pub reference_list_cap: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            get_retries: 1,
            reference_list_cap: 1000,
        }
    }
}

/// Decode a 2xx body, with or without the `{ data, ... }` envelope
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_response(response));
    }
    serde_json::from_slice::<MaybeEnvelope<T>>(&response.body)
        .map(MaybeEnvelope::into_data)
        .map_err(|e| ApiError::unexpected_body(response.status, e))
}

fn encode_query<T: Serialize>(params: &T) -> Result<String, ApiError> {
    serde_qs::to_string(params).map_err(|e| ApiError::Network(format!("invalid query: {}", e)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CachePolicy {
    PreferCache,
    Refresh,
}

pub struct ResourceClient<E: AggregateRoot> {
    transport: Arc<dyn HttpTransport>,
    cache: QueryCache,
    settings: ClientSettings,
    _entity: PhantomData<fn() -> E>,
}

impl<E: AggregateRoot> Clone for ResourceClient<E> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            cache: self.cache.clone(),
            settings: self.settings,
            _entity: PhantomData,
        }
    }
}

impl<E: AggregateRoot> ResourceClient<E> {
    pub fn new(transport: Arc<dyn HttpTransport>, cache: QueryCache, settings: ClientSettings) -> Self {
        Self {
            transport,
            cache,
            settings,
            _entity: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static CollectionSpec {
        E::collection()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Drop every cached query of this collection
    pub fn invalidate(&self) {
        self.cache.invalidate(E::collection().key);
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// One page of the collection, server-sorted
    pub async fn list(&self, request: &PageRequest) -> Result<PageResult<E>, ApiError> {
        self.list_with(request, CachePolicy::PreferCache).await
    }

    /// Search by term; a blank term is exactly [`ResourceClient::list`]
    pub async fn search(&self, term: &str, request: &PageRequest) -> Result<PageResult<E>, ApiError> {
        self.search_with(term, request, CachePolicy::PreferCache).await
    }

    /// Like [`ResourceClient::search`] but always asks the server; the
    /// answer replaces the cached page
    pub async fn search_fresh(&self, term: &str, request: &PageRequest) -> Result<PageResult<E>, ApiError> {
        self.search_with(term, request, CachePolicy::Refresh).await
    }

    async fn list_with(&self, request: &PageRequest, policy: CachePolicy) -> Result<PageResult<E>, ApiError> {
        check_page_size(request)?;
        let query = encode_query(request)?;
        let path = E::collection().base_path.to_string();
        self.fetch_page(QueryKind::List, &path, query, request, policy).await
    }

    async fn search_with(
        &self,
        term: &str,
        request: &PageRequest,
        policy: CachePolicy,
    ) -> Result<PageResult<E>, ApiError> {
        let term = term.trim();
        if term.is_empty() {
            return self.list_with(request, policy).await;
        }
        check_page_size(request)?;
        let collection = E::collection();
        let mut query = encode_query(request)?;
        let term_param = BTreeMap::from([(collection.search_param, term)]);
        query.push('&');
        query.push_str(&encode_query(&term_param)?);
        self.fetch_page(QueryKind::Search, &collection.search_path(), query, request, policy)
            .await
    }

    /// Every record of the collection.
    ///
    /// Servers may cap this list; a result as long as the configured cap is
    /// logged as probably truncated. Comboboxes use paginated search instead.
    pub async fn get_all(&self) -> Result<Vec<E>, ApiError> {
        let collection = E::collection();
        let key = QueryKey::new(collection.key, QueryKind::All, "");
        if let Some(hit) = self.cache.get::<Vec<E>>(&key) {
            return Ok(hit);
        }
        let revision = self.cache.revision(collection.key);

        let response = self.get_with_retry(&collection.list_all_path(), None).await?;
        let items: Vec<E> = decode(&response)?;
        if items.len() >= self.settings.reference_list_cap {
            log::warn!(
                "{}: list returned {} records (cap {}), the reference list is probably truncated",
                collection.key,
                items.len(),
                self.settings.reference_list_cap
            );
        }
        self.cache.insert_at(key, revision, items.clone());
        Ok(items)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<E, ApiError> {
        let collection = E::collection();
        let key = QueryKey::new(collection.key, QueryKind::ById, id.to_string());
        if let Some(hit) = self.cache.get::<E>(&key) {
            return Ok(hit);
        }
        let revision = self.cache.revision(collection.key);

        let response = self.get_with_retry(&collection.item_path(id), None).await?;
        let entity: E = decode(&response)?;
        self.cache.insert_at(key, revision, entity.clone());
        Ok(entity)
    }

    // ------------------------------------------------------------------------
    // Mutations (never retried)
    // ------------------------------------------------------------------------

    pub async fn create(&self, form: &E::Form) -> Result<E, ApiError> {
        let collection = E::collection();
        let body = payload(form)?;
        log::debug!("POST {}", collection.base_path);
        let response = self.transport.post_json(collection.base_path, &body).await?;
        decode(&response)
    }

    pub async fn update(&self, id: i64, form: &E::Form) -> Result<E, ApiError> {
        let path = E::collection().item_path(id);
        let body = payload(form)?;
        log::debug!("PUT {}", path);
        let response = self.transport.put_json(&path, &body).await?;
        decode(&response)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let path = E::collection().item_path(id);
        log::debug!("DELETE {}", path);
        let response = self.transport.delete(&path).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(ApiError::from_response(&response))
        }
    }

    // ------------------------------------------------------------------------
    // Spreadsheet endpoints
    // ------------------------------------------------------------------------

    pub async fn download_template(&self) -> Result<DownloadedFile, ApiError> {
        let collection = E::collection();
        let path = collection
            .template_path()
            .ok_or_else(|| unsupported(collection, "bulk upload"))?;
        let bytes = self.fetch_bytes(&path).await?;
        Ok(DownloadedFile {
            file_name: download::template_file_name(collection.file_stem),
            bytes,
        })
    }

    /// Upload a filled-in template; row failures come back in the report
    pub async fn bulk_upload(&self, file_name: &str, bytes: &[u8]) -> Result<BulkUploadReport, ApiError> {
        let collection = E::collection();
        if !collection.supports_bulk_upload() {
            return Err(unsupported(collection, "bulk upload"));
        }
        log::debug!("POST {} ({} bytes)", collection.bulk_upload_path(), bytes.len());
        let response = self
            .transport
            .post_multipart(&collection.bulk_upload_path(), file_name, bytes)
            .await?;
        decode(&response)
    }

    /// Spreadsheet of the rows rejected by the last upload
    pub async fn download_upload_errors(&self) -> Result<DownloadedFile, ApiError> {
        let collection = E::collection();
        let bytes = self.fetch_bytes(&collection.upload_errors_path()).await?;
        Ok(DownloadedFile {
            file_name: download::upload_errors_file_name(collection.file_stem, download::now()),
            bytes,
        })
    }

    pub async fn export(&self) -> Result<DownloadedFile, ApiError> {
        let collection = E::collection();
        if !collection.exportable {
            return Err(unsupported(collection, "export"));
        }
        let bytes = self.fetch_bytes(&collection.export_path()).await?;
        Ok(DownloadedFile {
            file_name: download::export_file_name(collection.file_stem, download::now()),
            bytes,
        })
    }

    // ------------------------------------------------------------------------
    // Collection-specific endpoints
    // ------------------------------------------------------------------------

    /// `GET` an arbitrary JSON resource of this collection (uncached)
    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        let query = encode_query(query)?;
        let response = self.get_with_retry(path, Some(&query)).await?;
        decode(&response)
    }

    /// `POST` a JSON body to an arbitrary resource of this collection
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::Network(format!("invalid body: {}", e)))?;
        let response = self.transport.post_json(path, &body).await?;
        decode(&response)
    }

    // ------------------------------------------------------------------------

    async fn fetch_page(
        &self,
        kind: QueryKind,
        path: &str,
        query: String,
        request: &PageRequest,
        policy: CachePolicy,
    ) -> Result<PageResult<E>, ApiError> {
        let collection = E::collection();
        let key = QueryKey::new(collection.key, kind, query.clone());
        if policy == CachePolicy::PreferCache {
            if let Some(hit) = self.cache.get::<PageResult<E>>(&key) {
                return Ok(hit);
            }
        }
        let revision = self.cache.revision(collection.key);

        let response = self.get_with_retry(path, Some(&query)).await?;
        let page = decode::<WirePage<E>>(&response)?.normalize(request);
        self.cache.insert_at(key, revision, page.clone());
        Ok(page)
    }

    async fn get_with_retry(&self, path: &str, query: Option<&str>) -> Result<HttpResponse, ApiError> {
        let mut attempt = 0;
        loop {
            log::debug!("GET {}?{}", path, query.unwrap_or_default());
            match self.transport.get(path, query).await {
                Ok(response) => return Ok(response),
                Err(err) if attempt < self.settings.get_retries => {
                    attempt += 1;
                    log::warn!("GET {} failed ({}), retry {}", path, err, attempt);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let mut attempt = 0;
        loop {
            match self.transport.get_bytes(path).await {
                Ok(response) if response.is_success() => return Ok(response.body),
                Ok(response) => return Err(ApiError::from_response(&response)),
                Err(err) if attempt < self.settings.get_retries => {
                    attempt += 1;
                    log::warn!("GET {} failed ({}), retry {}", path, err, attempt);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn check_page_size(request: &PageRequest) -> Result<(), ApiError> {
    if request.size == 0 {
        let mut errors = ValidationErrors::new();
        errors.push("size", "Page size must be greater than zero");
        return Err(ApiError::Validation(errors));
    }
    Ok(())
}

fn payload<F: FormData>(form: &F) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(form).map_err(|e| ApiError::Network(format!("invalid body: {}", e)))
}

fn unsupported(collection: &CollectionSpec, what: &str) -> ApiError {
    ApiError::NotFound(format!("{} does not support {}", collection.list_name, what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_data::query_cache::CacheSettings;
    use crate::shared::master_data::testing::FakeBackend;
    use contracts::domain::a001_bank::aggregate::{Bank, BankForm};
    use contracts::domain::a008_cost_category::aggregate::CostCategory;
    use contracts::domain::a011_vendor_type::aggregate::VendorType;
    use contracts::shared::api::SortDirection;
    use futures::executor::block_on;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicI64, Ordering};

    fn banks(n: i64) -> Vec<Value> {
        (1..=n)
            .map(|i| json!({ "id": i, "bankName": format!("Bank {:03}", i) }))
            .collect()
    }

    fn client<E: AggregateRoot>(backend: &FakeBackend) -> ResourceClient<E> {
        ResourceClient::new(
            Arc::new(backend.clone()),
            QueryCache::new(),
            ClientSettings::default(),
        )
    }

    #[test]
    fn test_blank_search_is_list() {
        let backend = FakeBackend::new().with_collection("/api/banks", banks(25));
        let request = PageRequest::new(1, 10, "bankName", SortDirection::Desc);

        let listed = block_on(client::<Bank>(&backend).list(&request)).unwrap();
        let blank = block_on(client::<Bank>(&backend).search("", &request)).unwrap();
        let spaces = block_on(client::<Bank>(&backend).search("   ", &request)).unwrap();

        assert_eq!(listed, blank);
        assert_eq!(listed, spaces);
        let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/api/banks"; 3]);
        assert_eq!(
            backend.requests()[0].query.as_deref(),
            Some("page=1&size=10&sortBy=bankName&sortDirection=desc")
        );
    }

    #[test]
    fn test_pages_are_full_except_last() {
        let backend = FakeBackend::new().with_collection("/api/banks", banks(23));
        let banks = client::<Bank>(&backend);

        for size in [1_u32, 5, 10, 23, 50] {
            let first = block_on(banks.list(&PageRequest::first(size, "bankName"))).unwrap();
            for page in 0..first.total_pages {
                let result = block_on(banks.list(&PageRequest::new(
                    page,
                    size,
                    "bankName",
                    SortDirection::Asc,
                )))
                .unwrap();
                assert!(result.content.len() <= size as usize);
                if !result.is_last() {
                    assert_eq!(result.content.len(), size as usize);
                }
                assert_eq!(result.total_elements, 23);
            }
        }
    }

    #[test]
    fn test_search_vendor_types_case_insensitive() {
        let mut types: Vec<Value> = (1..=30)
            .map(|i| json!({ "id": i, "typeName": format!("Contractor {}", i), "category": "Services" }))
            .collect();
        types.extend((31..=55).map(|i| {
            json!({ "id": i, "typeName": format!("Hardware supplier {}", i), "category": "Goods" })
        }));
        types.push(json!({ "id": 56, "typeName": "Logistics", "category": "SUPPLIER network" }));
        let backend = FakeBackend::new().with_collection("/api/vendor-types", types);

        let page = block_on(
            client::<VendorType>(&backend)
                .search("Supplier", &PageRequest::first(20, "typeName")),
        )
        .unwrap();

        assert_eq!(page.content.len(), 20);
        assert_eq!(page.total_elements, 26);
        assert_eq!(page.total_pages, 2);
        assert!(page.content.iter().all(|t| {
            t.type_name.to_lowercase().contains("supplier")
                || t.category.as_deref().unwrap_or_default().to_lowercase().contains("supplier")
        }));

        let request = backend.requests().pop().unwrap();
        assert_eq!(request.path, "/api/vendor-types/search");
        assert!(request
            .query
            .unwrap_or_default()
            .ends_with("&searchTerm=Supplier"));
    }

    #[test]
    fn test_keyword_collections() {
        let backend = FakeBackend::new().with_collection(
            "/api/cost-categories",
            vec![json!({ "id": 1, "categoryName": "Maintenance" })],
        );
        let page = block_on(
            client::<CostCategory>(&backend).search(" maint ", &PageRequest::first(10, "categoryName")),
        )
        .unwrap();
        assert_eq!(page.content.len(), 1);
        let query = backend.requests()[0].query.clone().unwrap_or_default();
        assert!(query.ends_with("&keyword=maint"), "{}", query);
    }

    #[test]
    fn test_unwrapped_bodies_are_accepted() {
        let backend = FakeBackend::new()
            .with_collection("/api/banks", banks(3))
            .without_envelope();
        let banks = client::<Bank>(&backend);
        let page = block_on(banks.list(&PageRequest::first(2, "bankName"))).unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_pages, 2);
        let bank = block_on(banks.get_by_id(3)).unwrap();
        assert_eq!(bank.bank_name, "Bank 003");
    }

    #[test]
    fn test_get_by_id_not_found() {
        let backend = FakeBackend::new().with_collection("/api/banks", banks(1));
        let err = block_on(client::<Bank>(&backend).get_by_id(99)).unwrap_err();
        assert_eq!(err, ApiError::NotFound("Record 99 not found".to_string()));
    }

    #[test]
    fn test_zero_page_size_is_rejected_locally() {
        let backend = FakeBackend::new().with_collection("/api/banks", banks(1));
        let err = block_on(
            client::<Bank>(&backend).list(&PageRequest::new(0, 0, "bankName", SortDirection::Asc)),
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(backend.request_count(), 0);
    }

    #[test]
    fn test_get_is_retried_on_network_error_only() {
        let backend = FakeBackend::new().with_collection("/api/banks", banks(2));
        let banks = client::<Bank>(&backend);

        backend.fail_network(1);
        let page = block_on(banks.list(&PageRequest::first(10, "bankName"))).unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(backend.request_count(), 2);

        backend.fail_network(2);
        let err = block_on(banks.get_by_id(1)).unwrap_err();
        assert!(err.is_network());
        assert_eq!(backend.request_count(), 4);

        // a 404 is an answer, not a transport failure
        block_on(banks.get_by_id(42)).unwrap_err();
        assert_eq!(backend.request_count(), 5);
    }

    #[test]
    fn test_get_all_and_cap() {
        let backend = FakeBackend::new().with_collection("/api/banks", banks(5));
        let capped = ResourceClient::<Bank>::new(
            Arc::new(backend.clone()),
            QueryCache::new(),
            ClientSettings {
                get_retries: 0,
                reference_list_cap: 5,
            },
        );
        let all = block_on(capped.get_all()).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(backend.requests()[0].path, "/api/banks/list");
    }

    #[test]
    fn test_spreadsheet_endpoints() {
        let backend = FakeBackend::new().with_collection("/api/banks", banks(1));
        let banks = client::<Bank>(&backend);

        let template = block_on(banks.download_template()).unwrap();
        assert_eq!(template.file_name, "Bank_BulkUpload_Template.xlsx");

        let export = block_on(banks.export()).unwrap();
        assert!(export.file_name.starts_with("Bank_Export_"));
        assert!(export.file_name.ends_with(".xlsx"));

        let report = block_on(banks.bulk_upload("banks.xlsx", b"PK")).unwrap();
        assert!(report.has_errors());
        assert_eq!(report.summary(), "2 of 3 rows imported, 1 failed");

        let errors = block_on(banks.download_upload_errors()).unwrap();
        assert!(errors.file_name.starts_with("Bank_Upload_Errors_"));

        let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "/api/banks/bulk-upload/template",
                "/api/banks/export",
                "/api/banks/bulk-upload",
                "/api/banks/bulk-upload/errors",
            ]
        );
    }

    #[test]
    fn test_fresh_search_sees_changes_made_elsewhere() {
        let backend = FakeBackend::new().with_collection("/api/banks", banks(1));
        let mine = client::<Bank>(&backend);
        let elsewhere = client::<Bank>(&backend);
        let request = PageRequest::first(20, "bankName");

        assert_eq!(block_on(mine.list(&request)).unwrap().total_elements, 1);
        let form = BankForm {
            bank_name: "Canara Bank".to_string(),
            rbi_bank_code: None,
        };
        block_on(elsewhere.create(&form)).unwrap();

        // the cached page is still served ...
        assert_eq!(block_on(mine.search("", &request)).unwrap().total_elements, 1);
        // ... until a mount asks the server again, which also refreshes the entry
        assert_eq!(block_on(mine.search_fresh("", &request)).unwrap().total_elements, 2);
        assert_eq!(block_on(mine.list(&request)).unwrap().total_elements, 2);
    }

    #[test]
    fn test_stale_page_is_refetched() {
        let backend = FakeBackend::new().with_collection("/api/banks", banks(3));
        let now = Arc::new(AtomicI64::new(0));
        let reader = Arc::clone(&now);
        let cache = QueryCache::with_clock(
            CacheSettings {
                stale_ms: 1_000,
                max_entries: 10,
            },
            Arc::new(move || reader.load(Ordering::SeqCst)),
        );
        let banks = ResourceClient::<Bank>::new(Arc::new(backend.clone()), cache, ClientSettings::default());
        let request = PageRequest::first(20, "bankName");

        block_on(banks.list(&request)).unwrap();
        block_on(banks.list(&request)).unwrap();
        assert_eq!(backend.request_count(), 1);

        now.store(1_001, Ordering::SeqCst);
        block_on(banks.list(&request)).unwrap();
        assert_eq!(backend.request_count(), 2);
    }
}

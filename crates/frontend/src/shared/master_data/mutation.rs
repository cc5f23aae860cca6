//! Create/update/delete lifecycle: `idle -> pending -> {success, error}`.

use super::client::ResourceClient;
use super::error::ApiError;
use super::notification::Notification;
use contracts::domain::common::AggregateRoot;
use contracts::shared::form::FormData;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

impl MutationStatus {
    pub fn is_pending(self) -> bool {
        self == MutationStatus::Pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn success_message(self, element_name: &str) -> String {
        let verb = match self {
            MutationKind::Create => "created",
            MutationKind::Update => "updated",
            MutationKind::Delete => "deleted",
        };
        format!("{} {} successfully", element_name, verb)
    }
}

/// Whether the drawer creates a new record or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// The UI side of a mutation: status display, toasts, drawer/dialog, form
pub trait MutationHost {
    fn status(&self) -> MutationStatus;
    fn set_status(&self, status: MutationStatus);
    /// Invalidate every cached query of the collection
    fn invalidate(&self);
    fn notify(&self, notification: Notification);
    /// Close the originating drawer or dialog
    fn close(&self);
    fn reset_form(&self);
}

/// Drive `op` through the lifecycle.
///
/// Re-entry while pending is refused with [`ApiError::Busy`]. On error the
/// drawer stays open with its input and the status returns to idle.
pub async fn run_mutation<H, T, Fut>(
    host: &H,
    kind: MutationKind,
    element_name: &str,
    op: Fut,
) -> Result<T, ApiError>
where
    H: MutationHost + ?Sized,
    Fut: Future<Output = Result<T, ApiError>>,
{
    if host.status().is_pending() {
        log::warn!("{}: {:?} ignored, a submission is in flight", element_name, kind);
        return Err(ApiError::Busy);
    }
    host.set_status(MutationStatus::Pending);

    match op.await {
        Ok(value) => {
            host.invalidate();
            host.notify(Notification::success(kind.success_message(element_name)));
            host.close();
            host.reset_form();
            host.set_status(MutationStatus::Success);
            Ok(value)
        }
        Err(err) => {
            log::error!("{}: {:?} failed: {}", element_name, kind, err);
            if !err.is_validation() {
                host.notify(Notification::from_error(&err));
            }
            host.set_status(MutationStatus::Idle);
            Err(err)
        }
    }
}

/// Validate and submit the drawer form.
///
/// Rule violations come back as [`ApiError::Validation`] without a toast and
/// without touching the network.
pub async fn submit_form<E, H>(
    host: &H,
    client: &ResourceClient<E>,
    mode: FormMode,
    form: E::Form,
) -> Result<E, ApiError>
where
    E: AggregateRoot,
    H: MutationHost + ?Sized,
{
    if host.status().is_pending() {
        return Err(ApiError::Busy);
    }
    let form = form.into_validated()?;
    let element_name = E::collection().element_name;
    match mode {
        FormMode::Create => {
            run_mutation(host, MutationKind::Create, element_name, client.create(&form)).await
        }
        FormMode::Edit(id) => {
            run_mutation(host, MutationKind::Update, element_name, client.update(id, &form)).await
        }
    }
}

pub async fn delete_entity<E, H>(host: &H, client: &ResourceClient<E>, entity: &E) -> Result<(), ApiError>
where
    E: AggregateRoot,
    H: MutationHost + ?Sized,
{
    run_mutation(
        host,
        MutationKind::Delete,
        E::collection().element_name,
        client.delete(entity.id()),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_data::client::ClientSettings;
    use crate::shared::master_data::notification::NotificationKind;
    use crate::shared::master_data::query_cache::QueryCache;
    use crate::shared::master_data::testing::FakeBackend;
    use contracts::domain::a001_bank::aggregate::{Bank, BankForm};
    use contracts::domain::a003_city::aggregate::City;
    use contracts::domain::a006_asset_category::aggregate::{AssetCategory, AssetCategoryForm};
    use contracts::shared::api::PageRequest;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::sync::Arc;

    /// Host that records what the lifecycle did to the UI
    struct RecordingHost {
        status: Cell<MutationStatus>,
        cache: QueryCache,
        collection: &'static str,
        notifications: RefCell<Vec<Notification>>,
        closed: Cell<bool>,
        reset: Cell<bool>,
    }

    impl RecordingHost {
        fn new(cache: QueryCache, collection: &'static str) -> Self {
            Self {
                status: Cell::new(MutationStatus::Idle),
                cache,
                collection,
                notifications: RefCell::new(Vec::new()),
                closed: Cell::new(false),
                reset: Cell::new(false),
            }
        }
    }

    impl MutationHost for RecordingHost {
        fn status(&self) -> MutationStatus {
            self.status.get()
        }
        fn set_status(&self, status: MutationStatus) {
            self.status.set(status);
        }
        fn invalidate(&self) {
            self.cache.invalidate(self.collection);
        }
        fn notify(&self, notification: Notification) {
            self.notifications.borrow_mut().push(notification);
        }
        fn close(&self) {
            self.closed.set(true);
        }
        fn reset_form(&self) {
            self.reset.set(true);
        }
    }

    fn client<E: AggregateRoot>(backend: &FakeBackend, cache: &QueryCache) -> ResourceClient<E> {
        ResourceClient::new(
            Arc::new(backend.clone()),
            cache.clone(),
            ClientSettings::default(),
        )
    }

    #[test]
    fn test_create_bank_without_rbi_code() {
        let backend = FakeBackend::new().with_collection("/api/banks", vec![]);
        let cache = QueryCache::new();
        let banks = client::<Bank>(&backend, &cache);
        let host = RecordingHost::new(cache.clone(), "banks");

        let form = BankForm {
            bank_name: "Test Bank".to_string(),
            rbi_bank_code: Some(String::new()),
        };
        let bank = block_on(submit_form(&host, &banks, FormMode::Create, form)).unwrap();

        assert!(bank.id > 0);
        assert_eq!(bank.bank_name, "Test Bank");
        assert_eq!(bank.rbi_bank_code, None);

        let sent = backend.requests().pop().and_then(|r| r.body).unwrap();
        assert_eq!(sent, json!({ "bankName": "Test Bank" }));

        assert_eq!(host.status(), MutationStatus::Success);
        assert!(host.closed.get());
        assert!(host.reset.get());
        let notes = host.notifications.borrow();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Success);
        assert_eq!(notes[0].message, "Bank created successfully");
    }

    #[test]
    fn test_rbi_code_passes_through_unchanged() {
        let backend = FakeBackend::new().with_collection("/api/banks", vec![]);
        let cache = QueryCache::new();
        let banks = client::<Bank>(&backend, &cache);
        let host = RecordingHost::new(cache, "banks");

        let form = BankForm {
            bank_name: "State Bank of India".to_string(),
            rbi_bank_code: Some("SBIN".to_string()),
        };
        let bank = block_on(submit_form(&host, &banks, FormMode::Create, form)).unwrap();
        assert_eq!(bank.rbi_bank_code.as_deref(), Some("SBIN"));
    }

    #[test]
    fn test_lowercase_category_code_never_reaches_network() {
        let backend = FakeBackend::new().with_collection("/api/asset-categories", vec![]);
        let cache = QueryCache::new();
        let categories = client::<AssetCategory>(&backend, &cache);
        let host = RecordingHost::new(cache, "asset-categories");

        let form = AssetCategoryForm {
            category_name: "ATM Hardware".to_string(),
            category_code: "abc".to_string(),
            description: None,
        };
        let err = block_on(submit_form(&host, &categories, FormMode::Create, form)).unwrap_err();

        match &err {
            ApiError::Validation(errors) => assert_eq!(
                errors.for_field("categoryCode"),
                Some("Category code must contain only uppercase letters, digits and underscores")
            ),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(backend.request_count(), 0);
        assert!(host.notifications.borrow().is_empty());
        assert_eq!(host.status(), MutationStatus::Idle);
        assert!(!host.closed.get());
    }

    #[test]
    fn test_delete_referenced_city_is_a_conflict() {
        let backend = FakeBackend::new()
            .with_collection(
                "/api/cities",
                vec![json!({ "id": 4, "cityName": "Pune", "stateId": 2 })],
            )
            .with_collection(
                "/api/locations",
                vec![json!({ "id": 8, "locationName": "Hinjewadi", "cityId": 4 })],
            )
            .with_reference("/api/locations", "cityId", "/api/cities");
        let cache = QueryCache::new();
        let cities = client::<City>(&backend, &cache);
        let host = RecordingHost::new(cache, "cities");

        let city = block_on(cities.get_by_id(4)).unwrap();
        let err = block_on(delete_entity(&host, &cities, &city)).unwrap_err();

        assert_eq!(
            err,
            ApiError::Conflict("Cannot delete: record is referenced by /api/locations".to_string())
        );
        let notes = host.notifications.borrow();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Error);
        assert_eq!(
            notes[0].message,
            "Cannot delete: record is referenced by /api/locations"
        );
        assert!(!host.closed.get());
        assert_eq!(host.status(), MutationStatus::Idle);

        let page = block_on(cities.list(&PageRequest::first(20, "cityName"))).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].id, 4);
    }

    #[test]
    fn test_success_invalidates_list() {
        let backend = FakeBackend::new().with_collection(
            "/api/banks",
            vec![json!({ "id": 1, "bankName": "Axis Bank" })],
        );
        let cache = QueryCache::new();
        let banks = client::<Bank>(&backend, &cache);
        let host = RecordingHost::new(cache, "banks");
        let request = PageRequest::first(20, "bankName");

        let before = block_on(banks.list(&request)).unwrap();
        assert_eq!(before.total_elements, 1);
        // served from cache
        block_on(banks.list(&request)).unwrap();
        assert_eq!(backend.request_count(), 1);

        let mut form = before.content[0].to_form();
        form.set_value("bankName", "Axis Bank Ltd");
        block_on(submit_form(&host, &banks, FormMode::Edit(1), form)).unwrap();

        let after = block_on(banks.list(&request)).unwrap();
        assert_eq!(after.content[0].bank_name, "Axis Bank Ltd");

        block_on(delete_entity(&host, &banks, &after.content[0])).unwrap();
        let emptied = block_on(banks.list(&request)).unwrap();
        assert_eq!(emptied.total_elements, 0);
    }

    #[test]
    fn test_reentry_is_refused_while_pending() {
        let backend = FakeBackend::new().with_collection("/api/banks", vec![]);
        let cache = QueryCache::new();
        let banks = client::<Bank>(&backend, &cache);
        let host = RecordingHost::new(cache, "banks");
        host.set_status(MutationStatus::Pending);

        let form = BankForm {
            bank_name: "Test Bank".to_string(),
            rbi_bank_code: None,
        };
        let err = block_on(submit_form(&host, &banks, FormMode::Create, form)).unwrap_err();
        assert_eq!(err, ApiError::Busy);
        assert_eq!(backend.request_count(), 0);
    }

    #[test]
    fn test_network_failure_keeps_drawer_open() {
        let backend = FakeBackend::new().with_collection("/api/banks", vec![]);
        let cache = QueryCache::new();
        let banks = client::<Bank>(&backend, &cache);
        let host = RecordingHost::new(cache, "banks");
        backend.fail_network(1);

        let form = BankForm {
            bank_name: "Test Bank".to_string(),
            rbi_bank_code: None,
        };
        let err = block_on(submit_form(&host, &banks, FormMode::Create, form)).unwrap_err();

        assert!(err.is_network());
        // mutations are never retried
        assert_eq!(backend.request_count(), 1);
        assert!(!host.closed.get());
        assert!(!host.reset.get());
        assert_eq!(host.status(), MutationStatus::Idle);
        assert_eq!(
            host.notifications.borrow()[0].kind,
            NotificationKind::Error
        );
    }
}

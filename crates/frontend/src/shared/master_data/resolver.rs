//! Dependent-search candidates for foreign-key comboboxes.

use super::client::ResourceClient;
use super::error::ApiError;
use contracts::domain::common::AggregateRoot;
use contracts::shared::api::PageRequest;
use std::collections::HashSet;
use std::future::Future;

pub const DEFAULT_COMBOBOX_LIMIT: u32 = 20;

/// Entity-agnostic combobox entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOption {
    pub id: i64,
    pub label: String,
}

impl ReferenceOption {
    pub fn of<E: AggregateRoot>(entity: &E) -> Self {
        Self {
            id: entity.id(),
            label: entity.display_name(),
        }
    }
}

/// De-duplicate `results` by id (first occurrence wins) and prepend
/// `selected` unless it is already among them.
pub fn merge_selected<E: AggregateRoot>(results: Vec<E>, selected: Option<E>) -> Vec<E> {
    let mut seen = HashSet::new();
    let mut merged: Vec<E> = Vec::with_capacity(results.len() + 1);
    if let Some(selected) = selected {
        if !results.iter().any(|e| e.id() == selected.id()) {
            seen.insert(selected.id());
            merged.push(selected);
        }
    }
    merged.extend(results.into_iter().filter(|e| seen.insert(e.id())));
    merged
}

/// Make sure the entity behind `selected_id` is among the candidates.
///
/// When it is missing from `results` it is fetched through `fetch_by_id` and
/// prepended. A failed fetch is logged and the search results are returned
/// as they are.
pub async fn resolve_with_guaranteed_selection<E, F, Fut>(
    results: Vec<E>,
    selected_id: Option<i64>,
    fetch_by_id: F,
) -> Vec<E>
where
    E: AggregateRoot,
    F: FnOnce(i64) -> Fut,
    Fut: Future<Output = Result<E, ApiError>>,
{
    let missing = selected_id
        .filter(|id| *id > 0)
        .filter(|id| !results.iter().any(|e| e.id() == *id));

    let selected = match missing {
        Some(id) => match fetch_by_id(id).await {
            Ok(entity) => Some(entity),
            Err(err) => {
                log::warn!(
                    "{}: selected #{} could not be resolved: {}",
                    E::collection().key,
                    id,
                    err
                );
                None
            }
        },
        None => None,
    };
    merge_selected(results, selected)
}

/// Candidate source of one combobox
pub struct ComboboxResolver<E: AggregateRoot> {
    client: ResourceClient<E>,
    limit: u32,
}

impl<E: AggregateRoot> Clone for ComboboxResolver<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            limit: self.limit,
        }
    }
}

impl<E: AggregateRoot> ComboboxResolver<E> {
    pub fn new(client: ResourceClient<E>, limit: u32) -> Self {
        let limit = if limit == 0 { DEFAULT_COMBOBOX_LIMIT } else { limit };
        Self { client, limit }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// First `limit` matches of `term` ordered by the display field, with
    /// the current selection guaranteed to be present
    pub async fn candidates(&self, term: &str, selected_id: Option<i64>) -> Result<Vec<E>, ApiError> {
        let request = PageRequest::first(self.limit, E::collection().default_sort);
        let page = self.client.search(term, &request).await?;
        let client = self.client.clone();
        Ok(
            resolve_with_guaranteed_selection(page.content, selected_id, |id| async move {
                client.get_by_id(id).await
            })
            .await,
        )
    }

    /// [`ComboboxResolver::candidates`] as display options
    pub async fn options(&self, term: &str, selected_id: Option<i64>) -> Result<Vec<ReferenceOption>, ApiError> {
        let candidates = self.candidates(term, selected_id).await?;
        Ok(candidates.iter().map(ReferenceOption::of).collect())
    }
}

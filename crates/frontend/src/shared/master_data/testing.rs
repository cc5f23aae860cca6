//! In-memory backend for native tests of the client, resolver and mutations.

use super::transport::{HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
}

/// `(child collection, foreign key field, parent collection)`
type Reference = (&'static str, &'static str, &'static str);

#[derive(Default)]
struct Store {
    collections: HashMap<&'static str, Vec<Value>>,
    next_id: i64,
    references: Vec<Reference>,
    requests: Vec<RecordedRequest>,
    network_failures: u32,
    wrap_in_envelope: bool,
}

/// Spring-style REST backend over JSON records
#[derive(Clone, Default)]
pub struct FakeBackend {
    store: Arc<Mutex<Store>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        {
            let mut store = backend.lock();
            store.next_id = 1000;
            store.wrap_in_envelope = true;
        }
        backend
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn with_collection(self, base_path: &'static str, records: Vec<Value>) -> Self {
        self.lock().collections.insert(base_path, records);
        self
    }

    /// Deleting a parent referenced by a child answers 409
    pub fn with_reference(
        self,
        child: &'static str,
        field: &'static str,
        parent: &'static str,
    ) -> Self {
        self.lock().references.push((child, field, parent));
        self
    }

    /// Answer without the `{ data, ... }` envelope
    pub fn without_envelope(self) -> Self {
        self.lock().wrap_in_envelope = false;
        self
    }

    /// The next `n` calls fail before reaching the server
    pub fn fail_network(&self, n: u32) {
        self.lock().network_failures = n;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn begin(
        &self,
        method: &'static str,
        path: &str,
        query: Option<&str>,
        body: Option<&Value>,
    ) -> Result<MutexGuard<'_, Store>, TransportError> {
        let mut store = self.lock();
        store.requests.push(RecordedRequest {
            method,
            path: path.to_string(),
            query: query.map(str::to_string),
            body: body.cloned(),
        });
        if store.network_failures > 0 {
            store.network_failures -= 1;
            return Err(TransportError::Network("connection refused".to_string()));
        }
        Ok(store)
    }
}

fn split_path<'a>(store: &Store, path: &'a str) -> Option<(&'static str, &'a str)> {
    store
        .collections
        .keys()
        .filter(|base| path.starts_with(**base))
        .max_by_key(|base| base.len())
        .map(|base| (*base, path[base.len()..].trim_start_matches('/')))
}

fn respond(store: &Store, status: u16, data: Value) -> HttpResponse {
    let body = if store.wrap_in_envelope {
        json!({ "data": data, "message": "OK", "status": status })
    } else {
        data
    };
    HttpResponse::new(status, body.to_string())
}

fn error(status: u16, message: &str) -> HttpResponse {
    HttpResponse::new(status, json!({ "message": message, "status": status }).to_string())
}

fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    query
        .and_then(|q| serde_qs::from_str::<HashMap<String, String>>(q).ok())
        .unwrap_or_default()
}

fn id_of(record: &Value) -> i64 {
    record.get("id").and_then(Value::as_i64).unwrap_or_default()
}

fn sort_key(record: &Value, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) => s.to_lowercase(),
        Some(Value::Number(n)) => format!("{:020}", n.as_i64().unwrap_or_default()),
        _ => String::new(),
    }
}

fn matches_term(record: &Value, term: &str) -> bool {
    let term = term.to_lowercase();
    record
        .as_object()
        .map(|fields| {
            fields
                .values()
                .filter_map(Value::as_str)
                .any(|v| v.to_lowercase().contains(&term))
        })
        .unwrap_or(false)
}

fn page_of(mut records: Vec<Value>, params: &HashMap<String, String>) -> Value {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = params
        .get("size")
        .and_then(|s| s.parse().ok())
        .filter(|s| *s > 0)
        .unwrap_or(20);
    if let Some(field) = params.get("sortBy") {
        records.sort_by_key(|r| sort_key(r, field));
        if params.get("sortDirection").map(String::as_str) == Some("desc") {
            records.reverse();
        }
    }
    let total = records.len();
    let content: Vec<Value> = records.into_iter().skip(page * size).take(size).collect();
    json!({
        "content": content,
        "totalElements": total,
        "totalPages": total.div_ceil(size),
        "size": size,
        "number": page,
    })
}

#[async_trait(?Send)]
impl HttpTransport for FakeBackend {
    async fn get(&self, path: &str, query: Option<&str>) -> Result<HttpResponse, TransportError> {
        let store = self.begin("GET", path, query, None)?;
        let Some((base, rest)) = split_path(&store, path) else {
            return Ok(error(404, "No such collection"));
        };
        let records = store.collections.get(base).cloned().unwrap_or_default();
        let params = parse_query(query);

        let response = match rest {
            "" => respond(&store, 200, page_of(records, &params)),
            "search" => {
                let term = params
                    .get("searchTerm")
                    .or_else(|| params.get("keyword"))
                    .cloned()
                    .unwrap_or_default();
                let hits = records.into_iter().filter(|r| matches_term(r, &term)).collect();
                respond(&store, 200, page_of(hits, &params))
            }
            "list" => respond(&store, 200, Value::Array(records)),
            "preview" => {
                let data = json!({ "nextCode": "ATM-MH-00001", "nextSequence": 1 });
                respond(&store, 200, data)
            }
            id => match id.parse::<i64>() {
                Ok(id) => match records.into_iter().find(|r| id_of(r) == id) {
                    Some(record) => respond(&store, 200, record),
                    None => error(404, &format!("Record {} not found", id)),
                },
                Err(_) => error(404, "Not found"),
            },
        };
        Ok(response)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        let mut store = self.begin("POST", path, None, Some(body))?;
        if path.ends_with("/generate") {
            let data = json!({ "siteCode": "ATM-MH-00001", "sequence": 1 });
            return Ok(respond(&store, 200, data));
        }
        if !store.collections.contains_key(path) {
            return Ok(error(404, "No such collection"));
        }
        store.next_id += 1;
        let mut record: Map<String, Value> = body.as_object().cloned().unwrap_or_default();
        record.insert("id".to_string(), json!(store.next_id));
        record.insert("createdAt".to_string(), json!("2024-03-15T10:00:00Z"));
        let record = Value::Object(record);
        if let Some(records) = store.collections.get_mut(path) {
            records.push(record.clone());
        }
        Ok(respond(&store, 201, record))
    }

    async fn put_json(&self, path: &str, body: &Value) -> Result<HttpResponse, TransportError> {
        let mut store = self.begin("PUT", path, None, Some(body))?;
        let Some((base, rest)) = split_path(&store, path) else {
            return Ok(error(404, "No such collection"));
        };
        let id: i64 = rest.parse().unwrap_or_default();
        let updated = store.collections.get_mut(base).and_then(|records| {
            let record = records.iter_mut().find(|r| id_of(r) == id)?;
            if let (Some(target), Some(changes)) = (record.as_object_mut(), body.as_object()) {
                for (k, v) in changes {
                    target.insert(k.clone(), v.clone());
                }
            }
            Some(record.clone())
        });
        Ok(match updated {
            Some(record) => respond(&store, 200, record),
            None => error(404, &format!("Record {} not found", id)),
        })
    }

    async fn delete(&self, path: &str) -> Result<HttpResponse, TransportError> {
        let mut store = self.begin("DELETE", path, None, None)?;
        let Some((base, rest)) = split_path(&store, path) else {
            return Ok(error(404, "No such collection"));
        };
        let id: i64 = rest.parse().unwrap_or_default();

        let referenced_by = store.references.iter().find(|(child, field, parent)| {
            *parent == base
                && store
                    .collections
                    .get(child)
                    .is_some_and(|rows| rows.iter().any(|r| r.get(*field).and_then(Value::as_i64) == Some(id)))
        });
        if let Some((child, _, _)) = referenced_by {
            let message = format!("Cannot delete: record is referenced by {}", child);
            return Ok(error(409, &message));
        }

        let Some(records) = store.collections.get_mut(base) else {
            return Ok(error(404, "No such collection"));
        };
        let before = records.len();
        records.retain(|r| id_of(r) != id);
        Ok(if records.len() < before {
            HttpResponse::new(204, Vec::new())
        } else {
            error(404, &format!("Record {} not found", id))
        })
    }

    async fn get_bytes(&self, path: &str) -> Result<HttpResponse, TransportError> {
        let _store = self.begin("GET", path, None, None)?;
        Ok(HttpResponse::new(200, b"PK\x03\x04fake-xlsx".to_vec()))
    }

    async fn post_multipart(
        &self,
        path: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<HttpResponse, TransportError> {
        let store = self.begin(
            "POST",
            path,
            None,
            Some(&json!({ "file": file_name, "bytes": bytes.len() })),
        )?;
        let report = json!({
            "totalRows": 3,
            "successCount": 2,
            "failureCount": 1,
            "errors": [{ "row": 3, "field": "bankName", "message": "Bank name is required" }]
        });
        Ok(respond(&store, 200, report))
    }
}

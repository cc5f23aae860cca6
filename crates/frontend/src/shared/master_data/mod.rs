//! Generic paginated CRUD core shared by every master-data module.
//!
//! Everything here is free of DOM access so it can be tested natively against
//! the in-memory backend in `testing`.

pub mod client;
pub mod download;
pub mod error;
pub mod latest_request;
pub mod module;
pub mod mutation;
pub mod notification;
pub mod query_cache;
pub mod resolver;
pub mod table_state;
pub mod transport;
pub mod ui_state;

#[cfg(test)]
pub mod testing;

pub use client::ResourceClient;
pub use error::ApiError;
pub use module::MasterDataModule;

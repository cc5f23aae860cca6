//! Common types and traits for all master-data entities

pub mod aggregate_root;
pub mod collection;
pub mod entity_metadata;

// Re-exports
pub use aggregate_root::{cell_or_dash, AggregateRoot};
pub use collection::{CollectionSpec, TemplateRoute};
pub use entity_metadata::AuditFields;

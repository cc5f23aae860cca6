//! Metadata types for describing master-data entities
//!
//! Field metadata drives three things at once: table columns, the generic
//! create/edit drawer, and client-side validation of form data.
//! All types use 'static lifetimes for zero-cost access to compile-time constants.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::metadata::FieldMetadata;
//!
//! for field in CityForm::field_metadata() {
//!     println!("{}: {}", field.name, field.ui.label);
//! }
//! ```

mod field_type;
mod types;
mod validation;

pub use field_type::{FieldSource, FieldType};
pub use types::{find_field, FieldMetadata, FieldUiMetadata};
pub use validation::ValidationRules;

use super::{AuditFields, CollectionSpec};
use crate::shared::form::FormData;
use crate::shared::metadata::FieldMetadata;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Root of a master-data entity
///
/// Entities are passive mirrors of server state: the client never derives
/// anything from them except table cells and a pre-filled edit form.
pub trait AggregateRoot:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Create/update payload of this entity
    type Form: FormData;

    // ============================================================================
    // Instance methods
    // ============================================================================

    /// Server-assigned numeric id
    fn id(&self) -> i64;

    /// Name shown in comboboxes and confirmation dialogs
    fn display_name(&self) -> String;

    /// Table cell text for a list-visible field
    fn cell_value(&self, field: &str) -> String;

    /// Server-assigned audit fields
    fn audit(&self) -> &AuditFields;

    /// Pre-filled edit form
    fn to_form(&self) -> Self::Form;

    // ============================================================================
    // Static metadata
    // ============================================================================

    /// REST collection this entity belongs to
    fn collection() -> &'static CollectionSpec;

    /// Every field of the entity: editable, lookup and audit
    fn field_metadata() -> &'static [FieldMetadata];

    /// Columns of the list view, in order
    fn list_fields() -> Vec<&'static FieldMetadata> {
        Self::field_metadata()
            .iter()
            .filter(|f| f.visible_in_list())
            .collect()
    }
}

/// Cell text of an optional value; absent values render as a dash
pub fn cell_or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

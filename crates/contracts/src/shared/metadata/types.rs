use super::field_type::{FieldSource, FieldType};
use super::validation::ValidationRules;

// ============================================================================
// Field-level metadata
// ============================================================================

/// Metadata for a single field
/// Copy trait enabled for efficient passing by value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMetadata {
    /// Wire (camelCase) field name, also used as the `sortBy` key
    pub name: &'static str,
    pub field_type: FieldType,
    pub source: FieldSource,
    pub ui: FieldUiMetadata,
    pub validation: ValidationRules,
    /// Collection key of the referenced entity (for AggregateRef)
    pub ref_aggregate: Option<&'static str>,
    pub enum_values: Option<&'static [&'static str]>,
}

impl FieldMetadata {
    const fn base(
        name: &'static str,
        label: &'static str,
        field_type: FieldType,
        validation: ValidationRules,
    ) -> Self {
        Self {
            name,
            field_type,
            source: FieldSource::Specific,
            ui: FieldUiMetadata::labeled(label),
            validation,
            ref_aggregate: None,
            enum_values: None,
        }
    }

    pub const fn text(name: &'static str, label: &'static str, validation: ValidationRules) -> Self {
        Self::base(name, label, FieldType::Text, validation)
    }

    pub const fn long_text(
        name: &'static str,
        label: &'static str,
        validation: ValidationRules,
    ) -> Self {
        let mut field = Self::base(name, label, FieldType::LongText, validation);
        field.ui.visible_in_list = false;
        field.ui.sortable = false;
        field
    }

    pub const fn number(
        name: &'static str,
        label: &'static str,
        validation: ValidationRules,
    ) -> Self {
        Self::base(name, label, FieldType::Number, validation)
    }

    pub const fn date(name: &'static str, label: &'static str, validation: ValidationRules) -> Self {
        Self::base(name, label, FieldType::Date, validation)
    }

    pub const fn enumeration(
        name: &'static str,
        label: &'static str,
        values: &'static [&'static str],
        validation: ValidationRules,
    ) -> Self {
        let mut field = Self::base(name, label, FieldType::Enum, validation);
        field.enum_values = Some(values);
        field
    }

    /// Foreign key edited through a dependent-search combobox. Hidden in the list:
    /// the table shows the denormalized lookup column instead.
    pub const fn reference(
        name: &'static str,
        label: &'static str,
        collection: &'static str,
        validation: ValidationRules,
    ) -> Self {
        let mut field = Self::base(name, label, FieldType::AggregateRef, validation);
        field.ref_aggregate = Some(collection);
        field.ui.visible_in_list = false;
        field
    }

    /// Read-only denormalized value shown in the list only
    pub const fn lookup(name: &'static str, label: &'static str) -> Self {
        let mut field = Self::base(name, label, FieldType::Text, ValidationRules::none());
        field.source = FieldSource::Lookup;
        field.ui.visible_in_form = false;
        field
    }

    pub const fn audit(name: &'static str, label: &'static str) -> Self {
        let mut field = Self::base(name, label, FieldType::Text, ValidationRules::none());
        field.source = FieldSource::Audit;
        field.ui.visible_in_form = false;
        field
    }

    pub const fn hidden_in_list(mut self) -> Self {
        self.ui.visible_in_list = false;
        self
    }

    pub const fn not_sortable(mut self) -> Self {
        self.ui.sortable = false;
        self
    }

    pub const fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.ui.placeholder = Some(placeholder);
        self
    }

    pub const fn with_hint(mut self, hint: &'static str) -> Self {
        self.ui.hint = Some(hint);
        self
    }

    /// Check if field is optional
    pub fn is_optional(&self) -> bool {
        !self.validation.required
    }

    /// Get referenced collection key (for AggregateRef)
    pub fn referenced_aggregate(&self) -> Option<&'static str> {
        self.ref_aggregate
    }

    /// Check if field should be visible in list view
    pub fn visible_in_list(&self) -> bool {
        self.ui.visible_in_list
    }

    /// Check if field should be visible in form
    pub fn visible_in_form(&self) -> bool {
        self.ui.visible_in_form && self.source.is_editable()
    }
}

/// UI metadata for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldUiMetadata {
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub hint: Option<&'static str>,
    pub visible_in_list: bool,
    pub visible_in_form: bool,
    pub sortable: bool,
}

impl FieldUiMetadata {
    pub const fn labeled(label: &'static str) -> Self {
        Self {
            label,
            placeholder: None,
            hint: None,
            visible_in_list: true,
            visible_in_form: true,
            sortable: true,
        }
    }
}

/// Default values for FieldUiMetadata
impl Default for FieldUiMetadata {
    fn default() -> Self {
        Self::labeled("")
    }
}

/// Look up a field by its wire name
pub fn find_field(fields: &'static [FieldMetadata], name: &str) -> Option<&'static FieldMetadata> {
    fields.iter().find(|f| f.name == name)
}

//! Field type enumeration for metadata system

/// Category of field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Text,           // Single-line string
    LongText,       // Multi-line string (textarea)
    Number,         // Integer or decimal input
    Date,           // ISO date string, YYYY-MM-DD
    Enum,           // One of `enum_values`
    AggregateRef,   // Reference to another collection by numeric id
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::LongText => "long_text",
            Self::Number => "number",
            Self::Date => "date",
            Self::Enum => "enum",
            Self::AggregateRef => "aggregate_ref",
        }
    }

    /// HTML input type used by the form drawer
    pub fn input_type(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Date => "date",
            _ => "text",
        }
    }
}

/// Source of field in the entity structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSource {
    #[default]
    Specific,  // Editable field of this entity
    Lookup,    // Denormalized read-only value of a referenced entity (e.g. stateName)
    Audit,     // Server-assigned audit field (createdAt, updatedBy, ...)
}

impl FieldSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Specific => "specific",
            Self::Lookup => "lookup",
            Self::Audit => "audit",
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Specific)
    }
}

use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{normalize_optional, optional_text, text_of, FieldValue, FormData};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "vendor-types",
    index: "a011",
    base_path: "/api/vendor-types",
    search_param: "searchTerm",
    file_stem: "VendorType",
    element_name: "Vendor Type",
    list_name: "Vendor Types",
    icon: "briefcase",
    default_sort: "typeName",
    template: Some(TemplateRoute::BulkUploadTemplate),
    exportable: true,
};

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "typeName",
        "Type Name",
        ValidationRules::required().max_length(100),
    ),
    FieldMetadata::text(
        "category",
        "Category",
        ValidationRules::none().max_length(100),
    ),
    FieldMetadata::long_text(
        "description",
        "Description",
        ValidationRules::none().max_length(500),
    ),
    FieldMetadata::audit("updatedAt", "Updated"),
];

/// Тип поставщика
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorType {
    pub id: i64,
    pub type_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorTypeForm {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormData for VendorTypeForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "typeName" => FieldValue::Text(&self.type_name),
            "category" => text_of(&self.category),
            "description" => text_of(&self.description),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "typeName" => self.type_name = raw.to_string(),
            "category" => self.category = optional_text(raw),
            "description" => self.description = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        normalize_optional(&mut self.category);
        normalize_optional(&mut self.description);
    }
}

impl AggregateRoot for VendorType {
    type Form = VendorTypeForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.type_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "typeName" => self.type_name.clone(),
            "category" => cell_or_dash(self.category.as_deref()),
            "description" => cell_or_dash(self.description.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> VendorTypeForm {
        VendorTypeForm {
            type_name: self.type_name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
        }
    }

    fn collection() -> &'static CollectionSpec {
        &COLLECTION
    }

    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }
}

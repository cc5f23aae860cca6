use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{normalize_optional, optional_text, text_of, FieldValue, FormData};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "cost-categories",
    index: "a008",
    base_path: "/api/cost-categories",
    search_param: "keyword",
    file_stem: "CostCategory",
    element_name: "Cost Category",
    list_name: "Cost Categories",
    icon: "folder",
    default_sort: "categoryName",
    template: Some(TemplateRoute::DownloadTemplate),
    exportable: true,
};

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "categoryName",
        "Category Name",
        ValidationRules::required().max_length(100),
    ),
    FieldMetadata::long_text(
        "description",
        "Description",
        ValidationRules::none().max_length(500),
    ),
    FieldMetadata::audit("updatedAt", "Updated"),
];

/// Категория затрат
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCategory {
    pub id: i64,
    pub category_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostCategoryForm {
    pub category_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormData for CostCategoryForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "categoryName" => FieldValue::Text(&self.category_name),
            "description" => text_of(&self.description),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "categoryName" => self.category_name = raw.to_string(),
            "description" => self.description = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        normalize_optional(&mut self.description);
    }
}

impl AggregateRoot for CostCategory {
    type Form = CostCategoryForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.category_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "categoryName" => self.category_name.clone(),
            "description" => cell_or_dash(self.description.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> CostCategoryForm {
        CostCategoryForm {
            category_name: self.category_name.clone(),
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

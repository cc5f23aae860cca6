use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{
    normalize_optional, optional_text, parse_id, text_of, FieldValue, FormData,
};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "cost-types",
    index: "a009",
    base_path: "/api/cost-types",
    search_param: "keyword",
    file_stem: "CostType",
    element_name: "Cost Type",
    list_name: "Cost Types",
    icon: "tag",
    default_sort: "typeName",
    template: Some(TemplateRoute::DownloadTemplate),
    exportable: true,
};

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "typeName",
        "Type Name",
        ValidationRules::required().max_length(100),
    ),
    FieldMetadata::reference(
        "costCategoryId",
        "Cost Category",
        "cost-categories",
        ValidationRules::required(),
    ),
    FieldMetadata::lookup("costCategoryName", "Cost Category"),
    FieldMetadata::long_text(
        "description",
        "Description",
        ValidationRules::none().max_length(500),
    ),
];

/// Тип затрат
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostType {
    pub id: i64,
    pub type_name: String,
    pub cost_category_id: i64,
    #[serde(default)]
    pub cost_category_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostTypeForm {
    pub type_name: String,
    pub cost_category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormData for CostTypeForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "typeName" => FieldValue::Text(&self.type_name),
            "costCategoryId" => FieldValue::Reference(self.cost_category_id),
            "description" => text_of(&self.description),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "typeName" => self.type_name = raw.to_string(),
            "costCategoryId" => self.cost_category_id = parse_id(raw),
            "description" => self.description = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        normalize_optional(&mut self.description);
    }
}

impl AggregateRoot for CostType {
    type Form = CostTypeForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.type_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "typeName" => self.type_name.clone(),
            "costCategoryName" => cell_or_dash(self.cost_category_name.as_deref()),
            "description" => cell_or_dash(self.description.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> CostTypeForm {
        CostTypeForm {
            type_name: self.type_name.clone(),
            cost_category_id: Some(self.cost_category_id),
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

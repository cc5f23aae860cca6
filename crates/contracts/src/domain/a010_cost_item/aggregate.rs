use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{
    normalize_optional, optional_text, parse_id, text_of, FieldValue, FormData,
};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "cost-items",
    index: "a010",
    base_path: "/api/cost-items",
    search_param: "keyword",
    file_stem: "CostItem",
    element_name: "Cost Item",
    list_name: "Cost Items",
    icon: "receipt",
    default_sort: "itemName",
    template: Some(TemplateRoute::DownloadTemplate),
    exportable: true,
};

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "itemName",
        "Item Name",
        ValidationRules::required().max_length(150),
    ),
    FieldMetadata::reference(
        "costTypeId",
        "Cost Type",
        "cost-types",
        ValidationRules::required(),
    ),
    FieldMetadata::lookup("costTypeName", "Cost Type"),
    FieldMetadata::text(
        "unitOfMeasure",
        "Unit of Measure",
        ValidationRules::none().max_length(20),
    )
    .with_placeholder("e.g. month"),
    FieldMetadata::long_text(
        "description",
        "Description",
        ValidationRules::none().max_length(500),
    ),
];

/// Статья затрат
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    pub id: i64,
    pub item_name: String,
    pub cost_type_id: i64,
    #[serde(default)]
    pub cost_type_name: Option<String>,
    #[serde(default)]
    pub unit_of_measure: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItemForm {
    pub item_name: String,
    pub cost_type_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormData for CostItemForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "itemName" => FieldValue::Text(&self.item_name),
            "costTypeId" => FieldValue::Reference(self.cost_type_id),
            "unitOfMeasure" => text_of(&self.unit_of_measure),
            "description" => text_of(&self.description),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "itemName" => self.item_name = raw.to_string(),
            "costTypeId" => self.cost_type_id = parse_id(raw),
            "unitOfMeasure" => self.unit_of_measure = optional_text(raw),
            "description" => self.description = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        normalize_optional(&mut self.unit_of_measure);
        normalize_optional(&mut self.description);
    }
}

impl AggregateRoot for CostItem {
    type Form = CostItemForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.item_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "itemName" => self.item_name.clone(),
            "costTypeName" => cell_or_dash(self.cost_type_name.as_deref()),
            "unitOfMeasure" => cell_or_dash(self.unit_of_measure.as_deref()),
            "description" => cell_or_dash(self.description.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> CostItemForm {
        CostItemForm {
            item_name: self.item_name.clone(),
            cost_type_id: Some(self.cost_type_id),
            unit_of_measure: self.unit_of_measure.clone(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_without_optionals() {
        let mut form = CostItemForm::default();
        form.set_value("itemName", "AMC Charges");
        form.set_value("costTypeId", "5");
        form.set_value("unitOfMeasure", "");
        let form = form.into_validated().unwrap();
        assert_eq!(
            serde_json::to_value(form).unwrap(),
            json!({ "itemName": "AMC Charges", "costTypeId": 5 })
        );
    }
}

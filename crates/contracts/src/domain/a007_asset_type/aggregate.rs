use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{
    normalize_optional, optional_text, parse_id, text_of, FieldValue, FormData,
};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "asset-types",
    index: "a007",
    base_path: "/api/asset-types",
    search_param: "searchTerm",
    file_stem: "AssetType",
    element_name: "Asset Type",
    list_name: "Asset Types",
    icon: "box",
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
        "typeCode",
        "Type Code",
        ValidationRules::required().max_length(20).pattern(
            r"^[A-Z0-9_]+$",
            "Type code must contain only uppercase letters, digits and underscores",
        ),
    ),
    FieldMetadata::reference(
        "assetCategoryId",
        "Asset Category",
        "asset-categories",
        ValidationRules::required(),
    ),
    FieldMetadata::lookup("assetCategoryName", "Asset Category"),
    FieldMetadata::long_text(
        "description",
        "Description",
        ValidationRules::none().max_length(500),
    ),
];

/// Тип актива
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetType {
    pub id: i64,
    pub type_name: String,
    pub type_code: String,
    pub asset_category_id: i64,
    #[serde(default)]
    pub asset_category_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTypeForm {
    pub type_name: String,
    pub type_code: String,
    pub asset_category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormData for AssetTypeForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "typeName" => FieldValue::Text(&self.type_name),
            "typeCode" => FieldValue::Text(&self.type_code),
            "assetCategoryId" => FieldValue::Reference(self.asset_category_id),
            "description" => text_of(&self.description),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "typeName" => self.type_name = raw.to_string(),
            "typeCode" => self.type_code = raw.to_string(),
            "assetCategoryId" => self.asset_category_id = parse_id(raw),
            "description" => self.description = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        normalize_optional(&mut self.description);
    }
}

impl AggregateRoot for AssetType {
    type Form = AssetTypeForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.type_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "typeName" => self.type_name.clone(),
            "typeCode" => self.type_code.clone(),
            "assetCategoryName" => cell_or_dash(self.asset_category_name.as_deref()),
            "description" => cell_or_dash(self.description.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> AssetTypeForm {
        AssetTypeForm {
            type_name: self.type_name.clone(),
            type_code: self.type_code.clone(),
            asset_category_id: Some(self.asset_category_id),
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

    #[test]
    fn test_category_reference_must_be_positive() {
        let mut form = AssetTypeForm {
            type_name: "Cash Dispenser".to_string(),
            type_code: "CD".to_string(),
            ..Default::default()
        };
        form.set_value("assetCategoryId", "0");
        assert_eq!(
            form.validate().unwrap_err().for_field("assetCategoryId"),
            Some("Asset Category is required")
        );
        form.set_value("assetCategoryId", "12");
        assert!(form.validate().is_ok());
    }
}

use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{normalize_optional, optional_text, text_of, FieldValue, FormData};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "asset-categories",
    index: "a006",
    base_path: "/api/asset-categories",
    search_param: "searchTerm",
    file_stem: "AssetCategory",
    element_name: "Asset Category",
    list_name: "Asset Categories",
    icon: "layers",
    default_sort: "categoryName",
    template: Some(TemplateRoute::BulkUploadTemplate),
    exportable: true,
};

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "categoryName",
        "Category Name",
        ValidationRules::required().max_length(100),
    ),
    FieldMetadata::text(
        "categoryCode",
        "Category Code",
        ValidationRules::required().max_length(20).pattern(
            r"^[A-Z0-9_]+$",
            "Category code must contain only uppercase letters, digits and underscores",
        ),
    )
    .with_placeholder("e.g. ATM_HW"),
    FieldMetadata::long_text(
        "description",
        "Description",
        ValidationRules::none().max_length(500),
    ),
    FieldMetadata::audit("updatedAt", "Updated"),
];

/// Категория активов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCategory {
    pub id: i64,
    pub category_name: String,
    pub category_code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCategoryForm {
    pub category_name: String,
    pub category_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormData for AssetCategoryForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "categoryName" => FieldValue::Text(&self.category_name),
            "categoryCode" => FieldValue::Text(&self.category_code),
            "description" => text_of(&self.description),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "categoryName" => self.category_name = raw.to_string(),
            "categoryCode" => self.category_code = raw.to_string(),
            "description" => self.description = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        normalize_optional(&mut self.description);
    }
}

impl AggregateRoot for AssetCategory {
    type Form = AssetCategoryForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.category_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "categoryName" => self.category_name.clone(),
            "categoryCode" => self.category_code.clone(),
            "description" => cell_or_dash(self.description.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> AssetCategoryForm {
        AssetCategoryForm {
            category_name: self.category_name.clone(),
            category_code: self.category_code.clone(),
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
    fn test_lowercase_code_is_rejected() {
        let form = AssetCategoryForm {
            category_name: "ATM Hardware".to_string(),
            category_code: "abc".to_string(),
            description: None,
        };
        let errors = form.into_validated().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.for_field("categoryCode"),
            Some("Category code must contain only uppercase letters, digits and underscores")
        );
    }

    #[test]
    fn test_valid_code() {
        let form = AssetCategoryForm {
            category_name: "ATM Hardware".to_string(),
            category_code: "ATM_HW_2".to_string(),
            description: Some("   ".to_string()),
        }
        .into_validated()
        .unwrap();
        assert_eq!(form.description, None);
    }
}

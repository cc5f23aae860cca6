use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{normalize_optional, optional_text, text_of, FieldValue, FormData};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "banks",
    index: "a001",
    base_path: "/api/banks",
    search_param: "searchTerm",
    file_stem: "Bank",
    element_name: "Bank",
    list_name: "Banks",
    icon: "bank",
    default_sort: "bankName",
    template: Some(TemplateRoute::BulkUploadTemplate),
    exportable: true,
};

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "bankName",
        "Bank Name",
        ValidationRules::required().max_length(100),
    ),
    FieldMetadata::text(
        "rbiBankCode",
        "RBI Bank Code",
        ValidationRules::none().max_length(20).pattern(
            r"^[A-Z0-9]+$",
            "RBI bank code must contain only uppercase letters and digits",
        ),
    )
    .with_placeholder("e.g. SBIN"),
    FieldMetadata::audit("createdAt", "Created"),
    FieldMetadata::audit("updatedAt", "Updated"),
];

// ============================================================================
// Aggregate Root
// ============================================================================

/// Банк
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub id: i64,
    pub bank_name: String,
    #[serde(default)]
    pub rbi_bank_code: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankForm {
    pub bank_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rbi_bank_code: Option<String>,
}

impl FormData for BankForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "bankName" => FieldValue::Text(&self.bank_name),
            "rbiBankCode" => text_of(&self.rbi_bank_code),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "bankName" => self.bank_name = raw.to_string(),
            "rbiBankCode" => self.rbi_bank_code = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        normalize_optional(&mut self.rbi_bank_code);
    }
}

impl AggregateRoot for Bank {
    type Form = BankForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.bank_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "bankName" => self.bank_name.clone(),
            "rbiBankCode" => cell_or_dash(self.rbi_bank_code.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> BankForm {
        BankForm {
            bank_name: self.bank_name.clone(),
            rbi_bank_code: self.rbi_bank_code.clone(),
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
    fn test_empty_rbi_code_is_omitted_from_payload() {
        let form = BankForm {
            bank_name: "Test Bank".to_string(),
            rbi_bank_code: Some(String::new()),
        }
        .into_validated()
        .unwrap();

        assert_eq!(serde_json::to_value(&form).unwrap(), json!({ "bankName": "Test Bank" }));
    }

    #[test]
    fn test_rbi_code_passes_through() {
        let form = BankForm {
            bank_name: "State Bank of India".to_string(),
            rbi_bank_code: Some("SBIN".to_string()),
        }
        .into_validated()
        .unwrap();

        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({ "bankName": "State Bank of India", "rbiBankCode": "SBIN" })
        );
    }

    #[test]
    fn test_rules() {
        let mut form = BankForm::default();
        form.set_value("rbiBankCode", "sbin");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.for_field("bankName"), Some("Bank Name is required"));
        assert_eq!(
            errors.for_field("rbiBankCode"),
            Some("RBI bank code must contain only uppercase letters and digits")
        );
    }

    #[test]
    fn test_deserialize_with_audit() {
        let bank: Bank = serde_json::from_value(json!({
            "id": 1,
            "bankName": "Test Bank",
            "rbiBankCode": null,
            "createdAt": "2024-03-15T14:02:26Z"
        }))
        .unwrap();
        assert_eq!(bank.rbi_bank_code, None);
        assert_eq!(bank.cell_value("rbiBankCode"), "-");
        assert_eq!(bank.cell_value("createdAt"), "2024-03-15 14:02:26");
        assert_eq!(bank.to_form().bank_name, "Test Bank");
    }
}

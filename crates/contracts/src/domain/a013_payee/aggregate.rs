use crate::domain::a012_vendor::aggregate::EMAIL_PATTERN;
use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{
    normalize_optional, optional_text, parse_id, text_of, FieldValue, FormData,
};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "payees",
    index: "a013",
    base_path: "/api/payees",
    search_param: "searchTerm",
    file_stem: "Payee",
    element_name: "Payee",
    list_name: "Payees",
    icon: "user",
    default_sort: "payeeName",
    template: Some(TemplateRoute::BulkUploadTemplate),
    exportable: true,
};

pub const PAN_PATTERN: &str = r"^[A-Z]{5}\d{4}[A-Z]$";

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "payeeName",
        "Payee Name",
        ValidationRules::required().max_length(150),
    ),
    FieldMetadata::reference("vendorId", "Vendor", "vendors", ValidationRules::none()),
    FieldMetadata::lookup("vendorName", "Vendor"),
    FieldMetadata::text(
        "panNumber",
        "PAN",
        ValidationRules::none().pattern(PAN_PATTERN, "Enter a valid 10-character PAN"),
    )
    .with_placeholder("e.g. ABCDE1234F"),
    FieldMetadata::text(
        "email",
        "Email",
        ValidationRules::none()
            .max_length(150)
            .pattern(EMAIL_PATTERN, "Enter a valid email address"),
    ),
];

/// Получатель платежей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payee {
    pub id: i64,
    pub payee_name: String,
    #[serde(default)]
    pub vendor_id: Option<i64>,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub pan_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayeeForm {
    pub payee_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl FormData for PayeeForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "payeeName" => FieldValue::Text(&self.payee_name),
            "vendorId" => FieldValue::Reference(self.vendor_id),
            "panNumber" => text_of(&self.pan_number),
            "email" => text_of(&self.email),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "payeeName" => self.payee_name = raw.to_string(),
            "vendorId" => self.vendor_id = parse_id(raw),
            "panNumber" => self.pan_number = optional_text(raw),
            "email" => self.email = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        normalize_optional(&mut self.pan_number);
        normalize_optional(&mut self.email);
        // the combobox "none" option arrives as 0
        if self.vendor_id.is_some_and(|id| id <= 0) {
            self.vendor_id = None;
        }
    }
}

impl AggregateRoot for Payee {
    type Form = PayeeForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.payee_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "payeeName" => self.payee_name.clone(),
            "vendorName" => cell_or_dash(self.vendor_name.as_deref()),
            "panNumber" => cell_or_dash(self.pan_number.as_deref()),
            "email" => cell_or_dash(self.email.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> PayeeForm {
        PayeeForm {
            payee_name: self.payee_name.clone(),
            vendor_id: self.vendor_id,
            pan_number: self.pan_number.clone(),
            email: self.email.clone(),
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
    fn test_vendor_is_optional() {
        let mut form = PayeeForm {
            payee_name: "Ravi Kumar".to_string(),
            ..Default::default()
        };
        form.set_value("vendorId", "0");
        let form = form.into_validated().unwrap();
        assert_eq!(
            serde_json::to_value(form).unwrap(),
            json!({ "payeeName": "Ravi Kumar" })
        );
    }

    #[test]
    fn test_pan_format() {
        let mut form = PayeeForm {
            payee_name: "Ravi Kumar".to_string(),
            ..Default::default()
        };
        form.set_value("panNumber", "ABCDE1234F");
        assert!(form.validate().is_ok());
        form.set_value("panNumber", "ABCD1234F");
        assert_eq!(
            form.validate().unwrap_err().for_field("panNumber"),
            Some("Enter a valid 10-character PAN")
        );
    }
}

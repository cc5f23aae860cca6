use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{
    normalize_optional, optional_text, parse_id, text_of, FieldValue, FormData,
};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "payment-details",
    index: "a014",
    base_path: "/api/payment-details",
    search_param: "searchTerm",
    file_stem: "PaymentDetail",
    element_name: "Payment Detail",
    list_name: "Payment Details",
    icon: "credit-card",
    default_sort: "accountHolderName",
    template: Some(TemplateRoute::BulkUploadTemplate),
    exportable: true,
};

pub const ACCOUNT_NUMBER_PATTERN: &str = r"^\d{9,18}$";
pub const IFSC_PATTERN: &str = r"^[A-Z]{4}0[A-Z0-9]{6}$";

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::reference("payeeId", "Payee", "payees", ValidationRules::required()),
    FieldMetadata::lookup("payeeName", "Payee"),
    FieldMetadata::reference("bankId", "Bank", "banks", ValidationRules::required()),
    FieldMetadata::lookup("bankName", "Bank"),
    FieldMetadata::text(
        "accountHolderName",
        "Account Holder",
        ValidationRules::required().max_length(150),
    ),
    FieldMetadata::text(
        "accountNumber",
        "Account Number",
        ValidationRules::required().pattern(
            ACCOUNT_NUMBER_PATTERN,
            "Account number must be 9 to 18 digits",
        ),
    ),
    FieldMetadata::text(
        "ifscCode",
        "IFSC Code",
        ValidationRules::required().pattern(IFSC_PATTERN, "Enter a valid 11-character IFSC code"),
    )
    .with_placeholder("e.g. SBIN0001234"),
    FieldMetadata::text(
        "branchName",
        "Branch",
        ValidationRules::none().max_length(150),
    ),
];

/// Банковские реквизиты получателя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetail {
    pub id: i64,
    pub payee_id: i64,
    #[serde(default)]
    pub payee_name: Option<String>,
    pub bank_id: i64,
    #[serde(default)]
    pub bank_name: Option<String>,
    pub account_holder_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl PaymentDetail {
    /// Account number with all but the last four digits hidden
    pub fn masked_account_number(&self) -> String {
        let digits: Vec<char> = self.account_number.chars().collect();
        let visible = digits.len().min(4);
        let hidden = digits.len() - visible;
        let tail: String = digits[hidden..].iter().collect();
        format!("{}{}", "X".repeat(hidden), tail)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailForm {
    pub payee_id: Option<i64>,
    pub bank_id: Option<i64>,
    pub account_holder_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
}

impl FormData for PaymentDetailForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "payeeId" => FieldValue::Reference(self.payee_id),
            "bankId" => FieldValue::Reference(self.bank_id),
            "accountHolderName" => FieldValue::Text(&self.account_holder_name),
            "accountNumber" => FieldValue::Text(&self.account_number),
            "ifscCode" => FieldValue::Text(&self.ifsc_code),
            "branchName" => text_of(&self.branch_name),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "payeeId" => self.payee_id = parse_id(raw),
            "bankId" => self.bank_id = parse_id(raw),
            "accountHolderName" => self.account_holder_name = raw.to_string(),
            "accountNumber" => self.account_number = raw.to_string(),
            "ifscCode" => self.ifsc_code = raw.to_string(),
            "branchName" => self.branch_name = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        self.account_number = self.account_number.trim().to_string();
        self.ifsc_code = self.ifsc_code.trim().to_string();
        normalize_optional(&mut self.branch_name);
    }
}

impl AggregateRoot for PaymentDetail {
    type Form = PaymentDetailForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} / {}", self.account_holder_name, self.masked_account_number())
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "payeeName" => cell_or_dash(self.payee_name.as_deref()),
            "bankName" => cell_or_dash(self.bank_name.as_deref()),
            "accountHolderName" => self.account_holder_name.clone(),
            "accountNumber" => self.masked_account_number(),
            "ifscCode" => self.ifsc_code.clone(),
            "branchName" => cell_or_dash(self.branch_name.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> PaymentDetailForm {
        PaymentDetailForm {
            payee_id: Some(self.payee_id),
            bank_id: Some(self.bank_id),
            account_holder_name: self.account_holder_name.clone(),
            account_number: self.account_number.clone(),
            ifsc_code: self.ifsc_code.clone(),
            branch_name: self.branch_name.clone(),
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

    fn form() -> PaymentDetailForm {
        PaymentDetailForm {
            payee_id: Some(2),
            bank_id: Some(1),
            account_holder_name: "Ravi Kumar".to_string(),
            account_number: "123456789012".to_string(),
            ifsc_code: "SBIN0001234".to_string(),
            branch_name: None,
        }
    }

    #[test]
    fn test_ifsc_and_account_number() {
        assert!(form().validate().is_ok());

        let mut bad = form();
        bad.set_value("ifscCode", "SBIN1001234");
        bad.set_value("accountNumber", "12345678");
        let errors = bad.validate().unwrap_err();
        assert_eq!(
            errors.for_field("ifscCode"),
            Some("Enter a valid 11-character IFSC code")
        );
        assert_eq!(
            errors.for_field("accountNumber"),
            Some("Account number must be 9 to 18 digits")
        );
    }

    #[test]
    fn test_account_number_is_masked_in_table() {
        let detail: PaymentDetail = serde_json::from_value(json!({
            "id": 9,
            "payeeId": 2,
            "bankId": 1,
            "accountHolderName": "Ravi Kumar",
            "accountNumber": "123456789012",
            "ifscCode": "SBIN0001234"
        }))
        .unwrap();
        assert_eq!(detail.cell_value("accountNumber"), "XXXXXXXX9012");
        assert_eq!(detail.cell_value("branchName"), "-");
        assert_eq!(detail.to_form().account_number, "123456789012");
    }
}

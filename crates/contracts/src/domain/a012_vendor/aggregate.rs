use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{
    normalize_optional, optional_text, parse_id, text_of, FieldValue, FormData,
};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "vendors",
    index: "a012",
    base_path: "/api/vendors",
    search_param: "searchTerm",
    file_stem: "Vendor",
    element_name: "Vendor",
    list_name: "Vendors",
    icon: "truck",
    default_sort: "vendorName",
    template: Some(TemplateRoute::BulkUploadTemplate),
    exportable: true,
};

pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
pub const PHONE_PATTERN: &str = r"^\d{10}$";
/// GSTIN: state code, PAN, entity number, `Z`, checksum
pub const GSTIN_PATTERN: &str = r"^\d{2}[A-Z]{5}\d{4}[A-Z][1-9A-Z]Z[0-9A-Z]$";

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "vendorName",
        "Vendor Name",
        ValidationRules::required().max_length(150),
    ),
    FieldMetadata::reference(
        "vendorTypeId",
        "Vendor Type",
        "vendor-types",
        ValidationRules::required(),
    ),
    FieldMetadata::lookup("vendorTypeName", "Vendor Type"),
    FieldMetadata::text(
        "contactEmail",
        "Contact Email",
        ValidationRules::none()
            .max_length(150)
            .pattern(EMAIL_PATTERN, "Enter a valid email address"),
    ),
    FieldMetadata::text(
        "contactPhone",
        "Contact Phone",
        ValidationRules::none().pattern(PHONE_PATTERN, "Phone number must be exactly 10 digits"),
    ),
    FieldMetadata::text(
        "gstNumber",
        "GST Number",
        ValidationRules::none().pattern(GSTIN_PATTERN, "Enter a valid 15-character GSTIN"),
    )
    .with_placeholder("e.g. 27AAPFU0939F1ZV"),
    FieldMetadata::long_text(
        "address",
        "Address",
        ValidationRules::none().max_length(255),
    ),
];

/// Поставщик
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: i64,
    pub vendor_name: String,
    pub vendor_type_id: i64,
    #[serde(default)]
    pub vendor_type_name: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorForm {
    pub vendor_name: String,
    pub vendor_type_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl FormData for VendorForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "vendorName" => FieldValue::Text(&self.vendor_name),
            "vendorTypeId" => FieldValue::Reference(self.vendor_type_id),
            "contactEmail" => text_of(&self.contact_email),
            "contactPhone" => text_of(&self.contact_phone),
            "gstNumber" => text_of(&self.gst_number),
            "address" => text_of(&self.address),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "vendorName" => self.vendor_name = raw.to_string(),
            "vendorTypeId" => self.vendor_type_id = parse_id(raw),
            "contactEmail" => self.contact_email = optional_text(raw),
            "contactPhone" => self.contact_phone = optional_text(raw),
            "gstNumber" => self.gst_number = optional_text(raw),
            "address" => self.address = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        normalize_optional(&mut self.contact_email);
        normalize_optional(&mut self.contact_phone);
        normalize_optional(&mut self.gst_number);
        normalize_optional(&mut self.address);
    }
}

impl AggregateRoot for Vendor {
    type Form = VendorForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.vendor_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "vendorName" => self.vendor_name.clone(),
            "vendorTypeName" => cell_or_dash(self.vendor_type_name.as_deref()),
            "contactEmail" => cell_or_dash(self.contact_email.as_deref()),
            "contactPhone" => cell_or_dash(self.contact_phone.as_deref()),
            "gstNumber" => cell_or_dash(self.gst_number.as_deref()),
            "address" => cell_or_dash(self.address.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> VendorForm {
        VendorForm {
            vendor_name: self.vendor_name.clone(),
            vendor_type_id: Some(self.vendor_type_id),
            contact_email: self.contact_email.clone(),
            contact_phone: self.contact_phone.clone(),
            gst_number: self.gst_number.clone(),
            address: self.address.clone(),
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

    fn vendor_form() -> VendorForm {
        VendorForm {
            vendor_name: "Diebold Nixdorf".to_string(),
            vendor_type_id: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_gstin_format() {
        let mut form = vendor_form();
        form.set_value("gstNumber", "27AAPFU0939F1ZV");
        assert!(form.validate().is_ok());

        form.set_value("gstNumber", "27aapfu0939f1zv");
        assert_eq!(
            form.validate().unwrap_err().for_field("gstNumber"),
            Some("Enter a valid 15-character GSTIN")
        );
    }

    #[test]
    fn test_contact_formats() {
        let mut form = vendor_form();
        form.set_value("contactEmail", "ops@example");
        form.set_value("contactPhone", "98200");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.for_field("contactEmail"), Some("Enter a valid email address"));
        assert_eq!(
            errors.for_field("contactPhone"),
            Some("Phone number must be exactly 10 digits")
        );

        form.set_value("contactEmail", "ops@example.com");
        form.set_value("contactPhone", "9820012345");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_blank_optionals_pass() {
        let mut form = vendor_form();
        form.set_value("gstNumber", "");
        form.set_value("contactEmail", "");
        let form = form.into_validated().unwrap();
        assert_eq!(form.gst_number, None);
        assert_eq!(form.contact_email, None);
    }
}

use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{
    normalize_optional, optional_text, parse_id, text_of, FieldValue, FormData,
};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "locations",
    index: "a004",
    base_path: "/api/locations",
    search_param: "searchTerm",
    file_stem: "Location",
    element_name: "Location",
    list_name: "Locations",
    icon: "building",
    default_sort: "locationName",
    template: Some(TemplateRoute::BulkUploadTemplate),
    exportable: true,
};

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "locationName",
        "Location Name",
        ValidationRules::required().max_length(150),
    ),
    FieldMetadata::reference("cityId", "City", "cities", ValidationRules::required()),
    FieldMetadata::lookup("cityName", "City"),
    FieldMetadata::lookup("stateName", "State"),
    FieldMetadata::long_text(
        "address",
        "Address",
        ValidationRules::none().max_length(255),
    ),
    FieldMetadata::text(
        "pincode",
        "Pincode",
        ValidationRules::none().pattern(r"^\d{6}$", "Pincode must be exactly 6 digits"),
    ),
];

/// Локация (площадка внутри города)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub location_name: String,
    pub city_id: i64,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationForm {
    pub location_name: String,
    pub city_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

impl FormData for LocationForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "locationName" => FieldValue::Text(&self.location_name),
            "cityId" => FieldValue::Reference(self.city_id),
            "address" => text_of(&self.address),
            "pincode" => text_of(&self.pincode),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "locationName" => self.location_name = raw.to_string(),
            "cityId" => self.city_id = parse_id(raw),
            "address" => self.address = optional_text(raw),
            "pincode" => self.pincode = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        normalize_optional(&mut self.address);
        normalize_optional(&mut self.pincode);
    }
}

impl AggregateRoot for Location {
    type Form = LocationForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.location_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "locationName" => self.location_name.clone(),
            "cityName" => cell_or_dash(self.city_name.as_deref()),
            "stateName" => cell_or_dash(self.state_name.as_deref()),
            "address" => cell_or_dash(self.address.as_deref()),
            "pincode" => cell_or_dash(self.pincode.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> LocationForm {
        LocationForm {
            location_name: self.location_name.clone(),
            city_id: Some(self.city_id),
            address: self.address.clone(),
            pincode: self.pincode.clone(),
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

    fn form() -> LocationForm {
        LocationForm {
            location_name: "Andheri East".to_string(),
            city_id: Some(3),
            address: None,
            pincode: None,
        }
    }

    #[test]
    fn test_pincode_format() {
        let mut f = form();
        f.set_value("pincode", "40006");
        assert_eq!(
            f.validate().unwrap_err().for_field("pincode"),
            Some("Pincode must be exactly 6 digits")
        );
        f.set_value("pincode", "400069");
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_empty_optionals_are_dropped() {
        let mut f = form();
        f.set_value("address", "");
        f.set_value("pincode", "  ");
        let payload = serde_json::to_value(f.into_validated().unwrap()).unwrap();
        assert_eq!(payload, json!({ "locationName": "Andheri East", "cityId": 3 }));
    }
}

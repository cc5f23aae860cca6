use crate::domain::common::{AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{parse_id, FieldValue, FormData};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "datacenters",
    index: "a005",
    base_path: "/api/datacenters",
    search_param: "searchTerm",
    file_stem: "Datacenter",
    element_name: "Datacenter",
    list_name: "Datacenters",
    icon: "server",
    default_sort: "datacenterName",
    template: Some(TemplateRoute::BulkUploadTemplate),
    exportable: true,
};

/// Allowed values of `datacenterType`
pub const DATACENTER_TYPES: &[&str] = &["DC", "DR", "NEAR_DR"];

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "datacenterName",
        "Datacenter Name",
        ValidationRules::required().max_length(150),
    ),
    FieldMetadata::text(
        "datacenterCode",
        "Datacenter Code",
        ValidationRules::required().max_length(20).pattern(
            r"^[A-Z0-9-]+$",
            "Datacenter code must contain only uppercase letters, digits and hyphens",
        ),
    ),
    FieldMetadata::enumeration(
        "datacenterType",
        "Type",
        DATACENTER_TYPES,
        ValidationRules::required().pattern(
            r"^(DC|DR|NEAR_DR)$",
            "Type must be one of DC, DR, NEAR_DR",
        ),
    ),
    FieldMetadata::reference(
        "locationId",
        "Location",
        "locations",
        ValidationRules::required(),
    ),
    FieldMetadata::lookup("locationName", "Location"),
];

/// Центр обработки данных
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datacenter {
    pub id: i64,
    pub datacenter_name: String,
    pub datacenter_code: String,
    pub datacenter_type: String,
    pub location_id: i64,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatacenterForm {
    pub datacenter_name: String,
    pub datacenter_code: String,
    pub datacenter_type: String,
    pub location_id: Option<i64>,
}

impl FormData for DatacenterForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "datacenterName" => FieldValue::Text(&self.datacenter_name),
            "datacenterCode" => FieldValue::Text(&self.datacenter_code),
            "datacenterType" => FieldValue::Text(&self.datacenter_type),
            "locationId" => FieldValue::Reference(self.location_id),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "datacenterName" => self.datacenter_name = raw.to_string(),
            "datacenterCode" => self.datacenter_code = raw.to_string(),
            "datacenterType" => self.datacenter_type = raw.to_string(),
            "locationId" => self.location_id = parse_id(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {}
}

impl AggregateRoot for Datacenter {
    type Form = DatacenterForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} ({})", self.datacenter_name, self.datacenter_code)
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "datacenterName" => self.datacenter_name.clone(),
            "datacenterCode" => self.datacenter_code.clone(),
            "datacenterType" => self.datacenter_type.clone(),
            "locationName" => self.location_name.clone().unwrap_or_default(),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> DatacenterForm {
        DatacenterForm {
            datacenter_name: self.datacenter_name.clone(),
            datacenter_code: self.datacenter_code.clone(),
            datacenter_type: self.datacenter_type.clone(),
            location_id: Some(self.location_id),
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
    fn test_type_must_be_known() {
        let form = DatacenterForm {
            datacenter_name: "Mumbai Primary".to_string(),
            datacenter_code: "MUM-DC1".to_string(),
            datacenter_type: "BACKUP".to_string(),
            location_id: Some(1),
        };
        assert_eq!(
            form.validate().unwrap_err().for_field("datacenterType"),
            Some("Type must be one of DC, DR, NEAR_DR")
        );
    }
}

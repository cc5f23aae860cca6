use crate::domain::common::{AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{parse_id, FieldValue, FormData};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "cities",
    index: "a003",
    base_path: "/api/cities",
    search_param: "searchTerm",
    file_stem: "City",
    element_name: "City",
    list_name: "Cities",
    icon: "map-pin",
    default_sort: "cityName",
    template: Some(TemplateRoute::DownloadTemplate),
    exportable: true,
};

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "cityName",
        "City Name",
        ValidationRules::required().max_length(100),
    ),
    FieldMetadata::reference("stateId", "State", "states", ValidationRules::required()),
    FieldMetadata::lookup("stateName", "State"),
    FieldMetadata::audit("updatedAt", "Updated"),
];

/// Город
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: i64,
    pub city_name: String,
    pub state_id: i64,
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityForm {
    pub city_name: String,
    pub state_id: Option<i64>,
}

impl FormData for CityForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "cityName" => FieldValue::Text(&self.city_name),
            "stateId" => FieldValue::Reference(self.state_id),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "cityName" => self.city_name = raw.to_string(),
            "stateId" => self.state_id = parse_id(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {}
}

impl AggregateRoot for City {
    type Form = CityForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.city_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "cityName" => self.city_name.clone(),
            "stateName" => self.state_name.clone().unwrap_or_default(),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> CityForm {
        CityForm {
            city_name: self.city_name.clone(),
            state_id: Some(self.state_id),
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
    fn test_state_is_required() {
        let form = CityForm {
            city_name: "Pune".to_string(),
            state_id: None,
        };
        assert_eq!(
            form.validate().unwrap_err().for_field("stateId"),
            Some("State is required")
        );
    }

    #[test]
    fn test_lookup_is_not_sent() {
        let city: City = serde_json::from_value(json!({
            "id": 4,
            "cityName": "Pune",
            "stateId": 2,
            "stateName": "Maharashtra"
        }))
        .unwrap();
        let payload = serde_json::to_value(city.to_form()).unwrap();
        assert_eq!(payload, json!({ "cityName": "Pune", "stateId": 2 }));
        assert_eq!(city.cell_value("stateName"), "Maharashtra");
    }
}

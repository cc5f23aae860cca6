use crate::domain::common::{AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{FieldValue, FormData};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "states",
    index: "a002",
    base_path: "/api/states",
    search_param: "searchTerm",
    file_stem: "State",
    element_name: "State",
    list_name: "States",
    icon: "map",
    default_sort: "stateName",
    template: Some(TemplateRoute::BulkUploadTemplate),
    exportable: true,
};

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "stateName",
        "State Name",
        ValidationRules::required().max_length(100),
    ),
    FieldMetadata::text(
        "stateCode",
        "State Code",
        ValidationRules::required().pattern(
            r"^[A-Z]{2,3}$",
            "State code must be 2 or 3 uppercase letters",
        ),
    )
    .with_placeholder("e.g. MH"),
    FieldMetadata::audit("updatedAt", "Updated"),
];

/// Штат / союзная территория
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: i64,
    pub state_name: String,
    pub state_code: String,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateForm {
    pub state_name: String,
    pub state_code: String,
}

impl FormData for StateForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "stateName" => FieldValue::Text(&self.state_name),
            "stateCode" => FieldValue::Text(&self.state_code),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "stateName" => self.state_name = raw.to_string(),
            "stateCode" => self.state_code = raw.to_string(),
            _ => {}
        }
    }

    fn normalize(&mut self) {}
}

impl AggregateRoot for State {
    type Form = StateForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        self.state_name.clone()
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "stateName" => self.state_name.clone(),
            "stateCode" => self.state_code.clone(),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> StateForm {
        StateForm {
            state_name: self.state_name.clone(),
            state_code: self.state_code.clone(),
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
    fn test_state_code_format() {
        let mut form = StateForm {
            state_name: "Maharashtra".to_string(),
            state_code: "MH".to_string(),
        };
        assert!(form.validate().is_ok());

        form.set_value("stateCode", "Mh");
        assert_eq!(
            form.validate().unwrap_err().for_field("stateCode"),
            Some("State code must be 2 or 3 uppercase letters")
        );
    }
}

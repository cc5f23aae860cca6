use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec, TemplateRoute};
use crate::shared::form::{
    normalize_optional, optional_text, parse_id, text_of, FieldValue, FormData,
};
use crate::shared::metadata::{FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "managed-projects",
    index: "a015",
    base_path: "/api/managed-projects",
    search_param: "searchTerm",
    file_stem: "ManagedProject",
    element_name: "Managed Project",
    list_name: "Managed Projects",
    icon: "clipboard",
    default_sort: "projectName",
    template: Some(TemplateRoute::BulkUploadTemplate),
    exportable: true,
};

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::text(
        "projectName",
        "Project Name",
        ValidationRules::required().max_length(150),
    ),
    FieldMetadata::text(
        "projectCode",
        "Project Code",
        ValidationRules::required().max_length(30).pattern(
            r"^[A-Z0-9_-]+$",
            "Project code must contain only uppercase letters, digits, hyphens and underscores",
        ),
    ),
    FieldMetadata::reference("bankId", "Bank", "banks", ValidationRules::required()),
    FieldMetadata::lookup("bankName", "Bank"),
    FieldMetadata::date(
        "startDate",
        "Start Date",
        ValidationRules::none().pattern(r"^\d{4}-\d{2}-\d{2}$", "Start date must be YYYY-MM-DD"),
    ),
    FieldMetadata::long_text(
        "description",
        "Description",
        ValidationRules::none().max_length(500),
    ),
];

/// Проект банка, обслуживаемый по договору
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedProject {
    pub id: i64,
    pub project_name: String,
    pub project_code: String,
    pub bank_id: i64,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedProjectForm {
    pub project_name: String,
    pub project_code: String,
    pub bank_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormData for ManagedProjectForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "projectName" => FieldValue::Text(&self.project_name),
            "projectCode" => FieldValue::Text(&self.project_code),
            "bankId" => FieldValue::Reference(self.bank_id),
            "startDate" => text_of(&self.start_date),
            "description" => text_of(&self.description),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "projectName" => self.project_name = raw.to_string(),
            "projectCode" => self.project_code = raw.to_string(),
            "bankId" => self.bank_id = parse_id(raw),
            "startDate" => self.start_date = optional_text(raw),
            "description" => self.description = optional_text(raw),
            _ => {}
        }
    }

    fn normalize(&mut self) {
        normalize_optional(&mut self.start_date);
        normalize_optional(&mut self.description);
    }
}

impl AggregateRoot for ManagedProject {
    type Form = ManagedProjectForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        format!("{} ({})", self.project_name, self.project_code)
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "projectName" => self.project_name.clone(),
            "projectCode" => self.project_code.clone(),
            "bankName" => cell_or_dash(self.bank_name.as_deref()),
            "startDate" => cell_or_dash(self.start_date.as_deref()),
            "description" => cell_or_dash(self.description.as_deref()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> ManagedProjectForm {
        ManagedProjectForm {
            project_name: self.project_name.clone(),
            project_code: self.project_code.clone(),
            bank_id: Some(self.bank_id),
            start_date: self.start_date.clone(),
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
    fn test_start_date_format() {
        let mut form = ManagedProjectForm {
            project_name: "ATM Managed Services".to_string(),
            project_code: "SBI-AMS".to_string(),
            bank_id: Some(1),
            ..Default::default()
        };
        form.set_value("startDate", "15/03/2024");
        assert_eq!(
            form.validate().unwrap_err().for_field("startDate"),
            Some("Start date must be YYYY-MM-DD")
        );
        form.set_value("startDate", "2024-03-15");
        assert!(form.validate().is_ok());
    }
}

use crate::domain::common::{cell_or_dash, AggregateRoot, AuditFields, CollectionSpec};
use crate::shared::form::{
    input_violation, normalize_optional, optional_text, parse_id, parse_number, text_of,
    FieldValue, FormData,
};
use crate::shared::metadata::{find_field, FieldMetadata, ValidationRules};
use serde::{Deserialize, Serialize};

pub const COLLECTION: CollectionSpec = CollectionSpec {
    key: "site-code-generators",
    index: "a016",
    base_path: "/api/site-code-generators",
    search_param: "searchTerm",
    file_stem: "SiteCodeGenerator",
    element_name: "Site Code Rule",
    list_name: "Site Code Generator",
    icon: "hash",
    default_sort: "projectName",
    template: None,
    exportable: true,
};

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::reference(
        "projectId",
        "Project",
        "managed-projects",
        ValidationRules::required(),
    ),
    FieldMetadata::lookup("projectName", "Project"),
    FieldMetadata::reference("stateId", "State", "states", ValidationRules::required()),
    FieldMetadata::lookup("stateName", "State"),
    FieldMetadata::text(
        "prefix",
        "Prefix",
        ValidationRules::required().max_length(10).pattern(
            r"^[A-Z0-9]+$",
            "Prefix must contain only uppercase letters and digits",
        ),
    )
    .with_placeholder("e.g. ATM"),
    FieldMetadata::text(
        "separator",
        "Separator",
        ValidationRules::none().pattern(r"^[-_/]$", "Separator must be one of - _ /"),
    )
    .hidden_in_list(),
    FieldMetadata::number(
        "sequenceStart",
        "Sequence Start",
        ValidationRules::required().range(1.0, 999_999.0),
    )
    .hidden_in_list(),
    FieldMetadata::number(
        "sequencePadding",
        "Sequence Padding",
        ValidationRules::required().range(1.0, 10.0),
    )
    .hidden_in_list()
    .with_hint("Number of digits of the sequence part"),
    FieldMetadata::lookup("lastSequence", "Last Sequence").not_sortable(),
];

/// Default separator when a rule carries none
pub const DEFAULT_SEPARATOR: &str = "-";

/// Render a site code from its parts, e.g. `ATM-MH-00012`.
///
/// The sequence is left-padded with zeros to `padding` digits and is never
/// truncated when it is wider.
pub fn render_site_code(
    prefix: &str,
    state_code: &str,
    separator: &str,
    padding: usize,
    sequence: u64,
) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if !prefix.is_empty() {
        parts.push(prefix.to_string());
    }
    if !state_code.is_empty() {
        parts.push(state_code.to_string());
    }
    parts.push(format!("{:0width$}", sequence, width = padding));
    parts.join(separator)
}

/// Правило генерации кодов площадок (проект + штат)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteCodeGenerator {
    pub id: i64,
    pub project_id: i64,
    #[serde(default)]
    pub project_name: Option<String>,
    pub state_id: i64,
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
    pub prefix: String,
    #[serde(default)]
    pub separator: Option<String>,
    pub sequence_start: u32,
    pub sequence_padding: u32,
    #[serde(default)]
    pub last_sequence: Option<u64>,
    #[serde(flatten)]
    pub audit: AuditFields,
}

impl SiteCodeGenerator {
    pub fn separator_or_default(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Sequence the server is expected to hand out next
    pub fn next_sequence(&self) -> u64 {
        match self.last_sequence {
            Some(last) => last + 1,
            None => u64::from(self.sequence_start),
        }
    }

    /// Local rendering of the next code; the server stays authoritative
    pub fn local_preview(&self) -> String {
        render_site_code(
            &self.prefix,
            self.state_code.as_deref().unwrap_or_default(),
            self.separator_or_default(),
            self.sequence_padding as usize,
            self.next_sequence(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteCodeGeneratorForm {
    pub project_id: Option<i64>,
    pub state_id: Option<i64>,
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    pub sequence_start: Option<u32>,
    pub sequence_padding: Option<u32>,
}

impl SiteCodeGeneratorForm {
    /// Format preview shown in the drawer while editing
    pub fn format_preview(&self, state_code: &str) -> Option<String> {
        if self.prefix.trim().is_empty() {
            return None;
        }
        let separator = self
            .separator
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SEPARATOR);
        Some(render_site_code(
            self.prefix.trim(),
            state_code,
            separator,
            self.sequence_padding.unwrap_or(1).clamp(1, 10) as usize,
            u64::from(self.sequence_start.unwrap_or(1)),
        ))
    }
}

fn parse_u32(raw: &str) -> Option<u32> {
    parse_number(raw)
        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32)
}

impl FormData for SiteCodeGeneratorForm {
    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }

    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "projectId" => FieldValue::Reference(self.project_id),
            "stateId" => FieldValue::Reference(self.state_id),
            "prefix" => FieldValue::Text(&self.prefix),
            "separator" => text_of(&self.separator),
            "sequenceStart" => FieldValue::Number(self.sequence_start.map(f64::from)),
            "sequencePadding" => FieldValue::Number(self.sequence_padding.map(f64::from)),
            _ => FieldValue::Absent,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) {
        match field {
            "projectId" => self.project_id = parse_id(raw),
            "stateId" => self.state_id = parse_id(raw),
            "prefix" => self.prefix = raw.to_string(),
            "separator" => self.separator = optional_text(raw),
            "sequenceStart" => self.sequence_start = parse_u32(raw),
            "sequencePadding" => self.sequence_padding = parse_u32(raw),
            _ => {}
        }
    }

    fn apply_input(&mut self, field: &str, raw: &str) -> Result<(), String> {
        self.set_value(field, raw);
        let Some(meta) = find_field(FIELDS, field) else {
            return Ok(());
        };
        if let Some(message) = input_violation(meta, raw) {
            return Err(message);
        }
        let sequence_field = matches!(field, "sequenceStart" | "sequencePadding");
        if sequence_field && !raw.trim().is_empty() && parse_u32(raw).is_none() {
            return Err(format!("{} must be a whole number", meta.ui.label));
        }
        Ok(())
    }

    fn normalize(&mut self) {
        self.prefix = self.prefix.trim().to_string();
        normalize_optional(&mut self.separator);
    }
}

impl AggregateRoot for SiteCodeGenerator {
    type Form = SiteCodeGeneratorForm;

    fn id(&self) -> i64 {
        self.id
    }

    fn display_name(&self) -> String {
        format!(
            "{} / {}",
            self.project_name.as_deref().unwrap_or("-"),
            self.state_name.as_deref().unwrap_or("-")
        )
    }

    fn cell_value(&self, field: &str) -> String {
        match field {
            "projectName" => cell_or_dash(self.project_name.as_deref()),
            "stateName" => cell_or_dash(self.state_name.as_deref()),
            "prefix" => self.prefix.clone(),
            "separator" => self.separator_or_default().to_string(),
            "sequenceStart" => self.sequence_start.to_string(),
            "sequencePadding" => self.sequence_padding.to_string(),
            "lastSequence" => self
                .last_sequence
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            other => self.audit.cell_value(other).unwrap_or_default(),
        }
    }

    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn to_form(&self) -> SiteCodeGeneratorForm {
        SiteCodeGeneratorForm {
            project_id: Some(self.project_id),
            state_id: Some(self.state_id),
            prefix: self.prefix.clone(),
            separator: self.separator.clone(),
            sequence_start: Some(self.sequence_start),
            sequence_padding: Some(self.sequence_padding),
        }
    }

    fn collection() -> &'static CollectionSpec {
        &COLLECTION
    }

    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }
}

// ============================================================================
// Preview / generate
// ============================================================================

/// Query of `GET {base}/preview` and body of `POST {base}/generate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteCodeRequest {
    pub project_id: i64,
    pub state_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteCodePreview {
    pub next_code: String,
    pub next_sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSiteCode {
    pub site_code: String,
    pub sequence: u64,
    #[serde(default)]
    pub generated_at: Option<String>,
}

pub fn preview_path() -> String {
    format!("{}/preview", COLLECTION.base_path)
}

pub fn generate_path() -> String {
    format!("{}/generate", COLLECTION.base_path)
}

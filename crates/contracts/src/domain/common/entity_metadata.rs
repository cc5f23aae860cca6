use serde::{Deserialize, Serialize};

/// Server-assigned audit fields (lifecycle tracking)
///
/// Never sent back to the server: forms carry only editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFields {
    /// Дата создания записи
    #[serde(default)]
    pub created_at: Option<String>,
    /// Дата последнего обновления
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl AuditFields {
    pub fn cell_value(&self, field: &str) -> Option<String> {
        let value = match field {
            "createdAt" => self.created_at.as_deref(),
            "updatedAt" => self.updated_at.as_deref(),
            "createdBy" => self.created_by.as_deref(),
            "updatedBy" => self.updated_by.as_deref(),
            _ => return None,
        };
        Some(super::cell_or_dash(value.map(format_timestamp).as_deref()))
    }
}

/// `2024-03-15T14:02:26.123Z` → `2024-03-15 14:02:26`; other text passes through
fn format_timestamp(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => match chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Err(_) => raw.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_cells() {
        let audit = AuditFields {
            created_at: Some("2024-03-15T14:02:26.123Z".to_string()),
            updated_at: Some("2024-03-16T09:00:00".to_string()),
            created_by: Some("admin".to_string()),
            updated_by: None,
        };
        assert_eq!(audit.cell_value("createdAt").as_deref(), Some("2024-03-15 14:02:26"));
        assert_eq!(audit.cell_value("updatedAt").as_deref(), Some("2024-03-16 09:00:00"));
        assert_eq!(audit.cell_value("createdBy").as_deref(), Some("admin"));
        assert_eq!(audit.cell_value("updatedBy").as_deref(), Some("-"));
        assert_eq!(audit.cell_value("bankName"), None);
    }
}

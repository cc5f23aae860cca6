use serde::{Deserialize, Serialize};

/// Result of `POST /api/{collection}/bulk-upload`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUploadReport {
    #[serde(default)]
    pub total_rows: u32,
    #[serde(default)]
    pub success_count: u32,
    #[serde(default)]
    pub failure_count: u32,
    #[serde(default)]
    pub errors: Vec<BulkRowError>,
}

/// Row-level rejection reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRowError {
    pub row: u32,
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
}

impl BulkUploadReport {
    pub fn has_errors(&self) -> bool {
        self.failure_count > 0 || !self.errors.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.has_errors() {
            format!(
                "{} of {} rows imported, {} failed",
                self.success_count, self.total_rows, self.failure_count
            )
        } else {
            format!("{} rows imported", self.success_count)
        }
    }
}

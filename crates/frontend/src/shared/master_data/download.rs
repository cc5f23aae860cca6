//! File names of spreadsheet downloads

use chrono::{Local, NaiveDateTime};

/// Binary payload returned by the template/export/error-report endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn timestamp(at: NaiveDateTime) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// `{Entity}_BulkUpload_Template.xlsx`
pub fn template_file_name(entity: &str) -> String {
    format!("{}_BulkUpload_Template.xlsx", entity)
}

/// `{Entity}_Export_{YYYYMMDD_HHMMSS}.xlsx`
pub fn export_file_name(entity: &str, at: NaiveDateTime) -> String {
    format!("{}_Export_{}.xlsx", entity, timestamp(at))
}

/// `{Entity}_Upload_Errors_{YYYYMMDD_HHMMSS}.xlsx`
pub fn upload_errors_file_name(entity: &str, at: NaiveDateTime) -> String {
    format!("{}_Upload_Errors_{}.xlsx", entity, timestamp(at))
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_file_names() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(9, 4, 7))
            .unwrap();
        assert_eq!(template_file_name("Bank"), "Bank_BulkUpload_Template.xlsx");
        assert_eq!(export_file_name("City", at), "City_Export_20240305_090407.xlsx");
        assert_eq!(
            upload_errors_file_name("CostItem", at),
            "CostItem_Upload_Errors_20240305_090407.xlsx"
        );
    }
}

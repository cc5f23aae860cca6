/// Where the bulk-upload template of a collection is served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateRoute {
    /// `GET {base}/bulk-upload/template`
    BulkUploadTemplate,
    /// `GET {base}/download-template`
    DownloadTemplate,
}

impl TemplateRoute {
    pub fn suffix(&self) -> &'static str {
        match self {
            TemplateRoute::BulkUploadTemplate => "/bulk-upload/template",
            TemplateRoute::DownloadTemplate => "/download-template",
        }
    }
}

/// Static description of one REST collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSpec {
    /// Cache tag and route key, e.g. `"cities"`
    pub key: &'static str,
    /// Index of the module, e.g. `"a003"`
    pub index: &'static str,
    /// `"/api/cities"`
    pub base_path: &'static str,
    /// Query parameter carrying the search term (`searchTerm` or `keyword`)
    pub search_param: &'static str,
    /// Entity name used in download file names, e.g. `"City"`
    pub file_stem: &'static str,
    /// UI name, singular
    pub element_name: &'static str,
    /// UI name, plural
    pub list_name: &'static str,
    /// Icon key of the navigation entry
    pub icon: &'static str,
    /// Default `sortBy` field; also the display field of comboboxes
    pub default_sort: &'static str,
    /// `None` when the collection has no bulk upload
    pub template: Option<TemplateRoute>,
    pub exportable: bool,
}

impl CollectionSpec {
    pub fn search_path(&self) -> String {
        format!("{}/search", self.base_path)
    }

    pub fn list_all_path(&self) -> String {
        format!("{}/list", self.base_path)
    }

    pub fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.base_path, id)
    }

    pub fn template_path(&self) -> Option<String> {
        self.template
            .map(|route| format!("{}{}", self.base_path, route.suffix()))
    }

    pub fn bulk_upload_path(&self) -> String {
        format!("{}/bulk-upload", self.base_path)
    }

    pub fn upload_errors_path(&self) -> String {
        format!("{}/bulk-upload/errors", self.base_path)
    }

    pub fn export_path(&self) -> String {
        format!("{}/export", self.base_path)
    }

    pub fn supports_bulk_upload(&self) -> bool {
        self.template.is_some()
    }

    /// Permission required for create/edit/delete/bulk actions
    pub fn write_permission(&self) -> String {
        format!("{}:write", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITIES: CollectionSpec = CollectionSpec {
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

    #[test]
    fn test_paths() {
        assert_eq!(CITIES.search_path(), "/api/cities/search");
        assert_eq!(CITIES.list_all_path(), "/api/cities/list");
        assert_eq!(CITIES.item_path(7), "/api/cities/7");
        assert_eq!(CITIES.template_path().as_deref(), Some("/api/cities/download-template"));
        assert_eq!(CITIES.upload_errors_path(), "/api/cities/bulk-upload/errors");
        assert_eq!(CITIES.write_permission(), "cities:write");
    }
}

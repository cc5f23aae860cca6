//! Server-side paging/sorting/search parameters of a table.

use contracts::shared::api::{PageRequest, SortDirection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    /// Zero-based
    pub page: u32,
    pub size: u32,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    pub search_term: String,
}

impl TableQuery {
    pub fn new(size: u32, sort_field: impl Into<String>) -> Self {
        Self {
            page: 0,
            size: size.max(1),
            sort_field: sort_field.into(),
            sort_direction: SortDirection::Asc,
            search_term: String::new(),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page,
            self.size,
            self.sort_field.clone(),
            self.sort_direction,
        )
    }

    /// A changed term always restarts from the first page
    pub fn set_search(&mut self, term: &str) {
        if self.search_term != term {
            self.search_term = term.to_string();
            self.page = 0;
        }
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, size: u32) {
        if size > 0 && size != self.size {
            self.size = size;
            self.page = 0;
        }
    }

    /// Same column flips the direction; a new column sorts ascending
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_field = field.to_string();
            self.sort_direction = SortDirection::Asc;
        }
    }

    /// Clamp the page after the total shrank (e.g. last row of a page deleted)
    pub fn clamp_page(&mut self, total_pages: u32) {
        if total_pages == 0 {
            self.page = 0;
        } else if self.page >= total_pages {
            self.page = total_pages - 1;
        }
    }
}

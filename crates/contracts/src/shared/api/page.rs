use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn is_ascending(self) -> bool {
        matches!(self, SortDirection::Asc)
    }
}

/// Query parameters of `GET /api/{collection}` and `/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort_by: impl Into<String>, sort_direction: SortDirection) -> Self {
        Self {
            page,
            size,
            sort_by: sort_by.into(),
            sort_direction,
        }
    }

    pub fn first(size: u32, sort_by: impl Into<String>) -> Self {
        Self::new(0, size, sort_by, SortDirection::Asc)
    }
}

/// Canonical page shape every list/search call is normalized into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    /// Zero-based page index
    pub number: u32,
}

impl<T> PageResult<T> {
    pub fn is_last(&self) -> bool {
        self.number + 1 >= self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
        }
    }
}

/// Page shapes produced by the different backends
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WirePage<T> {
    /// Spring Data `Page<T>`
    Spring {
        content: Vec<T>,
        #[serde(rename = "totalElements")]
        total_elements: u64,
        #[serde(rename = "totalPages")]
        total_pages: u32,
        size: u32,
        number: u32,
    },
    /// Offset-style `{ items, total, page, page_size, total_pages }`
    Offset {
        items: Vec<T>,
        total: u64,
        page: u32,
        page_size: u32,
        #[serde(default)]
        total_pages: Option<u32>,
    },
    /// Unpaginated array
    Bare(Vec<T>),
}

impl<T> WirePage<T> {
    pub fn normalize(self, request: &PageRequest) -> PageResult<T> {
        match self {
            WirePage::Spring {
                content,
                total_elements,
                total_pages,
                size,
                number,
            } => PageResult {
                content,
                total_elements,
                total_pages,
                size,
                number,
            },
            WirePage::Offset {
                items,
                total,
                page,
                page_size,
                total_pages,
            } => {
                // Only this shape may omit the page count
                let total_pages = total_pages.unwrap_or_else(|| pages_for(total, page_size));
                PageResult {
                    content: items,
                    total_elements: total,
                    total_pages,
                    size: page_size,
                    number: page,
                }
            }
            WirePage::Bare(content) => {
                let len = content.len() as u64;
                PageResult {
                    size: request.size.max(len as u32),
                    total_elements: len,
                    total_pages: if len == 0 { 0 } else { 1 },
                    number: 0,
                    content,
                }
            }
        }
    }
}

fn pages_for(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> PageRequest {
        PageRequest::first(20, "name")
    }

    #[test]
    fn test_spring_page() {
        let wire: WirePage<i32> = serde_json::from_value(json!({
            "content": [1, 2],
            "totalElements": 42,
            "totalPages": 3,
            "size": 20,
            "number": 2,
            "pageable": { "pageNumber": 2 }
        }))
        .unwrap();
        let page = wire.normalize(&request());
        assert_eq!(page.content, vec![1, 2]);
        assert_eq!(page.total_elements, 42);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number, 2);
        assert!(page.is_last());
    }

    #[test]
    fn test_offset_page_without_page_count() {
        let wire: WirePage<i32> = serde_json::from_value(json!({
            "items": [1],
            "total": 41,
            "page": 0,
            "page_size": 20
        }))
        .unwrap();
        let page = wire.normalize(&request());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.size, 20);
    }

    #[test]
    fn test_bare_array() {
        let wire: WirePage<i32> = serde_json::from_value(json!([1, 2, 3])).unwrap();
        let page = wire.normalize(&request());
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 1);
        assert!(page.content.len() as u32 <= page.size);
    }

    #[test]
    fn test_page_request_query_names() {
        let value = serde_json::to_value(PageRequest::new(1, 10, "bankName", SortDirection::Desc))
            .unwrap();
        assert_eq!(
            value,
            json!({ "page": 1, "size": 10, "sortBy": "bankName", "sortDirection": "desc" })
        );
    }
}

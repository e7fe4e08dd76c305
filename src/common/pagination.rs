// src/common/pagination.rs

use serde::Deserialize;

/// List envelope every collection endpoint returns: `{data, meta}`.
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Paginated<T> {
    pub fn is_last_page(&self) -> bool {
        self.meta.page >= self.meta.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_list_envelope() {
        let body = r#"{
            "data": ["a", "b"],
            "meta": {"total": 12, "page": 1, "page_size": 2, "total_pages": 6}
        }"#;
        let page: Paginated<String> = serde_json::from_str(body).expect("decode");
        assert_eq!(page.data, vec!["a", "b"]);
        assert_eq!(page.meta.total, 12);
        assert!(!page.is_last_page());
    }
}

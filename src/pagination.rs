use serde::Deserialize;

/// Fixed page size for every list endpoint.
pub const PAGE_SIZE: i64 = 3;

/// 1-based page number; anything below 1 normalizes to the first page.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Page {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

impl Page {
    pub fn new(page: i64) -> Self {
        Self { page }
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * PAGE_SIZE
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { page: 1 }
    }
}

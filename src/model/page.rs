use serde::{Deserialize, Serialize};

/// Page request for listings. Zero values fall back to page 1 and the default size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Resolves zero fields against `default_page_size`.
    pub fn normalized(self, default_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: if self.page_size == 0 {
                default_page_size.max(1)
            } else {
                self.page_size
            },
        }
    }

    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.page_size as usize
    }
}

/// One page of results together with the total number of matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: usize,
}

impl<T> Page<T> {
    /// Cuts the page described by `pagination` out of the full result set.
    pub fn slice(all: Vec<T>, pagination: Pagination) -> Self {
        let total = all.len();
        let items = all
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.page_size as usize)
            .collect();
        Self {
            items,
            page: pagination.page,
            page_size: pagination.page_size,
            total,
        }
    }
}

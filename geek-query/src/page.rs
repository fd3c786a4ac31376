//! Page coordinates and paged results.

use serde::{Deserialize, Serialize};

/// Default page size when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Offset/limit window into an ordered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    offset: u64,
    size: u32,
}

impl PageRequest {
    /// A window starting at `offset`. A zero `size` is raised to one.
    pub fn new(offset: u64, size: u32) -> Self {
        Self {
            offset,
            size: size.max(1),
        }
    }

    /// The `number`-th page (zero-based) of `size` rows.
    pub fn of(number: u32, size: u32) -> Self {
        let size = size.max(1);
        Self::new(u64::from(number) * u64::from(size), size)
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Zero-based page number this window starts on.
    pub fn number(&self) -> u64 {
        self.offset / u64::from(self.size)
    }

    pub fn next(&self) -> Self {
        Self::new(self.offset + u64::from(self.size), self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the total number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page: PageRequest,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            total_elements,
            page,
        }
    }

    pub fn empty(page: PageRequest) -> Self {
        Self::new(Vec::new(), page, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.page.size()))
    }

    pub fn has_next(&self) -> bool {
        self.page.offset() + (self.content.len() as u64) < self.total_elements
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
        }
    }
}

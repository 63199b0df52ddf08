use serde::Serialize;

use crate::models::TransactionError;

/// A validated `(page, size)` pair. `size` is never zero and never above the
/// optional upper bound it was built with.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PageRequest {
    page: usize,
    size: usize
}

impl PageRequest {
    pub fn new(page: usize, size: usize, max_size: Option<usize>) -> Result<Self, TransactionError> {
        if size == 0 {
            return Err(TransactionError::invalid_data("page size must be greater than zero"))
        }

        if let Some(max_size) = max_size.filter(|max_size| size > *max_size) {
            return Err(TransactionError::invalid_data(format!("page size must not exceed {max_size}")))
        }

        Ok(Self { page, size })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Index of the first element on this page, saturating instead of overflowing.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One page of a listing together with the totals needed to walk the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: usize) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages: total_elements.div_ceil(request.size())
        }
    }
}

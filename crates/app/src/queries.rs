//! Read models returned by the query use cases.

use domain::{TodoItem, TodoList};
use serde::Serialize;

/// One page of an ordered result set.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> PaginatedList<T> {
    /// Cuts page `page_number` (1-based) of size `page_size` out of `source`.
    ///
    /// A zero page number or size is treated as 1. A page past the end is
    /// empty, however large its number.
    pub fn from_source(source: Vec<T>, page_number: usize, page_size: usize) -> Self {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);

        let total_count = source.len();
        let total_pages = total_count.div_ceil(page_size);
        let offset = (page_number - 1).saturating_mul(page_size);
        let items = source
            .into_iter()
            .skip(offset)
            .take(page_size)
            .collect();

        Self {
            items,
            page_number,
            total_pages,
            total_count,
        }
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page_number < self.total_pages
    }
}

/// A list together with its items, ordered by title.
#[derive(Debug, Clone, Serialize)]
pub struct TodoListView {
    pub list: TodoList,
    pub items: Vec<TodoItem>,
}

impl TodoListView {
    /// Returns the number of done items.
    pub fn done_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_done()).count()
    }
}

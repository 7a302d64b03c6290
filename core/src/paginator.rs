use std::fmt;

use crate::error::{Result, SearchError};

/// One page of a [`Paginator`]; displays as its items back to back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T>(pub &'a [T]);

impl<'a, T> Page<'a, T> {
    pub fn items(&self) -> &'a [T] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.0 {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Consecutive fixed-size pages over a slice; the last may be shorter.
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    pages: Vec<Page<'a, T>>,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(SearchError::InvalidArgument("page size must be positive".into()));
        }
        Ok(Paginator { pages: items.chunks(page_size).map(Page).collect() })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page<'a, T>> {
        self.pages.iter()
    }
}

impl<'p, 'a, T> IntoIterator for &'p Paginator<'a, T> {
    type Item = &'p Page<'a, T>;
    type IntoIter = std::slice::Iter<'p, Page<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Paginator<'_, T>> {
    Paginator::new(items, page_size)
}

/// Shared types used across the codebase

use serde::{Deserialize, Deserializer, Serialize};

/// Normalized pagination window. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    /// Clamp caller-supplied values: page below 1 becomes 1, a missing or
    /// non-positive per_page falls back to `default_per_page`, and per_page
    /// never exceeds `max_per_page`.
    pub fn new(page: Option<i64>, per_page: Option<i64>, default_per_page: u32, max_per_page: u32) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let per_page = per_page
            .filter(|p| *p >= 1)
            .unwrap_or(default_per_page as i64)
            .clamp(1, max_per_page.max(1) as i64);

        Self { page, per_page }
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// One page of results plus the count of every row matching the filter
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn pages(&self) -> i64 {
        if self.total <= 0 {
            0
        } else {
            (self.total + self.request.per_page - 1) / self.request.per_page
        }
    }

    pub fn meta(&self) -> PageMeta {
        PageMeta {
            total: self.total,
            pages: self.pages(),
            current_page: self.request.page,
            per_page: self.request.per_page,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }
}

/// Pagination metadata flattened into list responses
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PageMeta {
    pub total: i64,
    pub pages: i64,
    pub current_page: i64,
    pub per_page: i64,
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial update payloads. Use with `#[serde(default)]`.
pub fn deserialize_nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

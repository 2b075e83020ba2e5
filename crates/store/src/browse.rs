//! Listing filters and pagination.

use retrievix_match::Item;
use serde::{Deserialize, Serialize};

/// Listing page size when none is configured.
pub const DEFAULT_PER_PAGE: usize = 6;

/// Optional listing filters; unset or blank fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowseFilter {
    /// Case-insensitive substring of title, description or location
    pub search: Option<String>,
    /// Exact category label
    pub category: Option<String>,
    /// Case-sensitive substring of the location
    pub location: Option<String>,
    /// Exact `YYYY-MM-DD` date
    pub date: Option<String>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl BrowseFilter {
    pub fn matches(&self, item: &Item) -> bool {
        let search = active(&self.search).is_none_or(|q| {
            let q = q.to_lowercase();
            item.title.to_lowercase().contains(&q)
                || item.description.to_lowercase().contains(&q)
                || item.location.to_lowercase().contains(&q)
        });

        search
            && active(&self.category).is_none_or(|c| item.category == c)
            && active(&self.location).is_none_or(|l| item.location.contains(l))
            && active(&self.date).is_none_or(|d| item.date == d)
    }
}

/// One page of filtered items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowsePage {
    pub items: Vec<Item>,
    /// 1-based page number
    pub page: usize,
    pub per_page: usize,
    /// Matches across all pages
    pub total_items: usize,
    pub total_pages: usize,
}

/// Entry of a pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "page")]
pub enum PageLink {
    Page(usize),
    Current(usize),
    Gap,
}

impl BrowsePage {
    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Pagination bar: first, last and neighbours of the current page, with
    /// a gap marker two pages away. Empty when everything fits on one page.
    pub fn page_links(&self) -> Vec<PageLink> {
        if self.total_pages <= 1 {
            return Vec::new();
        }
        (1..=self.total_pages)
            .filter_map(|i| {
                if i == self.page {
                    Some(PageLink::Current(i))
                } else if i == 1 || i == self.total_pages || i.abs_diff(self.page) <= 1 {
                    Some(PageLink::Page(i))
                } else if i.abs_diff(self.page) == 2 {
                    Some(PageLink::Gap)
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Filter `items` and cut out one page.
///
/// Page numbers start at 1 (0 is treated as 1); pages past the end are empty.
pub fn browse(items: &[Item], filter: &BrowseFilter, page: usize, per_page: usize) -> BrowsePage {
    let page = page.max(1);
    let per_page = per_page.max(1);

    let matching: Vec<&Item> = items.iter().filter(|i| filter.matches(i)).collect();
    let total_items = matching.len();

    BrowsePage {
        items: matching
            .into_iter()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect(),
        page,
        per_page,
        total_items,
        total_pages: total_items.div_ceil(per_page),
    }
}

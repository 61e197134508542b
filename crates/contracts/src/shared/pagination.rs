use serde::{Deserialize, Serialize};

/// One page of a listing, in the shape the UI renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 0,
            total_count: 0,
        }
    }
}

impl<T> PageResult<T> {
    /// Single unpaginated page holding every item
    pub fn single(items: Vec<T>) -> Self {
        let total_count = items.len();
        Self {
            items,
            page: 1,
            total_pages: 1,
            total_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_pagination(&self) -> bool {
        self.total_pages > 1
    }
}

/// Listing responses the backend is known to return.
///
/// Variants are tried in declaration order, so a body with `content` is always
/// read as [`PageResponse::Spring`] even if it carries other fields too.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PageResponse<T> {
    /// Spring Data `Page<T>`
    Spring {
        content: Vec<T>,
        #[serde(rename = "totalPages", default)]
        total_pages: Option<usize>,
        #[serde(rename = "totalElements", default)]
        total_elements: Option<usize>,
    },
    /// `{ products, total }` wrapper
    Wrapped {
        products: Vec<T>,
        #[serde(default)]
        total: Option<usize>,
    },
    /// Bare JSON array
    Bare(Vec<T>),
}

impl<T> PageResponse<T> {
    /// Reconciles the response into a [`PageResult`].
    ///
    /// Zero counters are treated as absent: the total falls back to the
    /// number of returned items and the page count to `ceil(total / page_size)`.
    pub fn into_page(self, page: usize, page_size: usize) -> PageResult<T> {
        let (items, total_pages, total) = match self {
            PageResponse::Spring {
                content,
                total_pages,
                total_elements,
            } => (content, total_pages, total_elements),
            PageResponse::Wrapped { products, total } => (products, None, total),
            PageResponse::Bare(items) => (items, None, None),
        };

        let total_count = total.filter(|t| *t > 0).unwrap_or(items.len());
        let total_pages = total_pages
            .filter(|p| *p > 0)
            .unwrap_or_else(|| pages_for(total_count, page_size));

        PageResult {
            items,
            page: page.max(1),
            total_pages,
            total_count,
        }
    }
}

/// `ceil(total / page_size)`; zero for an empty listing
pub fn pages_for(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> PageResponse<u32> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn bare_array_derives_counts_from_length() {
        let items: Vec<u32> = (0..25).collect();
        let json = serde_json::to_string(&items).unwrap();
        let page = decode(&json).into_page(1, 20);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.items.len(), 25);
    }

    #[test]
    fn all_shapes_agree_on_totals() {
        let items: Vec<u32> = (0..25).collect();
        let list = serde_json::to_string(&items).unwrap();
        let spring = format!(r#"{{"content":{},"totalPages":2,"totalElements":25}}"#, list);
        let wrapped = format!(r#"{{"products":{},"total":25}}"#, list);

        for json in [list.as_str(), spring.as_str(), wrapped.as_str()] {
            let page = decode(json).into_page(1, 20);
            assert_eq!((page.total_pages, page.total_count), (2, 25), "{}", json);
        }
    }

    #[test]
    fn spring_page_uses_server_counters() {
        let page = decode(r#"{"content":[1,2],"totalPages":7,"totalElements":134,"number":3}"#)
            .into_page(4, 20);
        assert!(matches!(page, PageResult { page: 4, total_pages: 7, total_count: 134, .. }));
    }

    #[test]
    fn wrapped_without_total_falls_back_to_len() {
        let page = decode(r#"{"products":[1,2,3]}"#).into_page(1, 10);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn variant_dispatch_is_exhaustive() {
        assert!(matches!(decode("[]"), PageResponse::Bare(_)));
        assert!(matches!(decode(r#"{"products":[]}"#), PageResponse::Wrapped { .. }));
        assert!(matches!(decode(r#"{"content":[]}"#), PageResponse::Spring { .. }));
        assert!(serde_json::from_str::<PageResponse<u32>>(r#"{"items":[]}"#).is_err());
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let page = decode("[]").into_page(1, 20);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
        assert_eq!(pages_for(0, 10), 0);
        assert_eq!(pages_for(10, 10), 1);
        assert_eq!(pages_for(11, 10), 2);
    }
}

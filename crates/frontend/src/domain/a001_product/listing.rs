//! Product listing engine shared by the catalog and the stock console.
//!
//! A listing is either a filter call (paged on the server) or, when the
//! catalog was opened from an offer, one name search per product name merged
//! into a single page. Responses carry a [`Ticket`]; only the latest one is
//! allowed to touch [`ListingState`].

use std::collections::HashSet;

use async_trait::async_trait;
use contracts::domain::a001_product::aggregate::{Product, ProductFilter};
use contracts::enums::ProductCategory;
use contracts::shared::{PageResponse, PageResult};
use futures_util::future::join_all;

use crate::routes::route::CatalogQuery;
use crate::shared::error::AppError;

/// Product lookups the listing needs
#[async_trait(?Send)]
pub trait ProductSource {
    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, AppError>;
    async fn filter(&self, criteria: &ProductFilter) -> Result<PageResponse<Product>, AppError>;
}

/// Criteria of one listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub query: Option<String>,
    pub category: Option<ProductCategory>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Explicit product names; overrides every other criterion
    pub names: Vec<String>,
}

impl ListingQuery {
    pub fn is_by_names(&self) -> bool {
        !self.names.is_empty()
    }

    /// Filter call for a 1-based `page`
    pub fn to_filter(&self, page: usize, page_size: usize) -> ProductFilter {
        ProductFilter {
            query: self.query.clone(),
            category: self.category,
            min_price: self.min_price,
            max_price: self.max_price,
            ids: None,
            page: page.saturating_sub(1) as i64,
            size: page_size as i64,
        }
    }
}

impl From<&CatalogQuery> for ListingQuery {
    fn from(q: &CatalogQuery) -> Self {
        Self {
            query: q.search.clone(),
            category: q.category,
            min_price: None,
            max_price: None,
            names: q.names.clone(),
        }
    }
}

/// Fetches one page of products for `query`.
pub async fn fetch_listing<S: ProductSource + ?Sized>(
    source: &S,
    query: &ListingQuery,
    page: usize,
    page_size: usize,
) -> Result<PageResult<Product>, AppError> {
    if query.is_by_names() {
        let results = join_all(query.names.iter().map(|name| source.search_by_name(name))).await;
        let mut found = Vec::new();
        for result in results {
            found.extend(result?);
        }
        return Ok(PageResult::single(dedupe_by_id(found)));
    }

    let criteria = query.to_filter(page, page_size);
    let response = source.filter(&criteria).await?;
    Ok(response.into_page(page, page_size))
}

/// Keeps the first product of every id, in input order.
pub fn dedupe_by_id(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|p| seen.insert(p.id))
        .collect()
}

/// Identifies one issued listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Monotonic ticket counter
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// What a listing screen renders
#[derive(Debug, Default)]
pub struct ListingState {
    pub result: PageResult<Product>,
    pub loading: bool,
    pub error: Option<String>,
    sequence: RequestSequence,
}

impl ListingState {
    /// Marks a fetch as started and returns its ticket.
    pub fn begin(&mut self) -> Ticket {
        self.loading = true;
        self.sequence.issue()
    }

    /// Page changes are accepted inside `1..=total_pages` while idle.
    pub fn can_go_to(&self, page: usize) -> bool {
        page >= 1 && page <= self.result.total_pages && !self.loading
    }

    /// Stores the outcome of the request behind `ticket`.
    ///
    /// Returns `false` and leaves the state untouched for a stale ticket.
    pub fn apply(&mut self, ticket: Ticket, outcome: Result<PageResult<Product>, AppError>) -> bool {
        if !self.sequence.is_latest(ticket) {
            log::debug!("listing: dropping stale response {:?}", ticket);
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(page) => {
                self.result = page;
                self.error = None;
            }
            Err(e) => {
                log::error!("listing fetch failed: {}", e);
                self.result = PageResult {
                    items: Vec::new(),
                    page: 1,
                    total_pages: 0,
                    total_count: 0,
                };
                self.error = Some(e.user_message());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::aggregate::ProductId;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id: ProductId(id),
            name: name.to_string(),
            description: String::new(),
            price: 1.0,
            image_url: None,
            category: ProductCategory::Otros,
        }
    }

    #[derive(Default)]
    struct FakeProducts {
        by_name: HashMap<String, Vec<Product>>,
        page: Vec<Product>,
        filters: RefCell<Vec<ProductFilter>>,
        fail: bool,
    }

    #[async_trait(?Send)]
    impl ProductSource for FakeProducts {
        async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, AppError> {
            if self.fail {
                return Err(AppError::Network("offline".into()));
            }
            Ok(self.by_name.get(name).cloned().unwrap_or_default())
        }

        async fn filter(&self, criteria: &ProductFilter) -> Result<PageResponse<Product>, AppError> {
            self.filters.borrow_mut().push(criteria.clone());
            if self.fail {
                return Err(AppError::Http {
                    status: 500,
                    message: "Error del servidor al filtrar productos".into(),
                });
            }
            Ok(PageResponse::Bare(self.page.clone()))
        }
    }

    #[test]
    fn names_mode_dedupes_by_id_keeping_first() {
        let mut source = FakeProducts::default();
        source.by_name.insert("A".into(), vec![product(1, "A")]);
        source.by_name.insert("B".into(), vec![product(2, "B"), product(1, "A bis")]);
        let query = ListingQuery {
            names: vec!["A".into(), "B".into(), "A".into()],
            ..Default::default()
        };

        let page = block_on(fetch_listing(&source, &query, 3, 20)).unwrap();
        let ids: Vec<i64> = page.items.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(page.items[0].name, "A");
        assert_eq!((page.page, page.total_pages, page.total_count), (1, 1, 2));
        assert!(source.filters.borrow().is_empty());
    }

    #[test]
    fn filter_mode_sends_zero_based_page() {
        let source = FakeProducts {
            page: (1..=25).map(|i| product(i, "x")).collect(),
            ..Default::default()
        };
        let query = ListingQuery {
            category: Some(ProductCategory::Oftalmologicos),
            ..Default::default()
        };

        let page = block_on(fetch_listing(&source, &query, 2, 20)).unwrap();
        let sent = source.filters.borrow();
        assert_eq!(sent[0].page, 1);
        assert_eq!(sent[0].size, 20);
        assert_eq!(sent[0].category, Some(ProductCategory::Oftalmologicos));
        assert_eq!((page.page, page.total_pages, page.total_count), (2, 2, 25));
    }

    #[test]
    fn failing_name_search_fails_the_listing() {
        let source = FakeProducts {
            fail: true,
            ..Default::default()
        };
        let query = ListingQuery {
            names: vec!["A".into()],
            ..Default::default()
        };
        assert!(block_on(fetch_listing(&source, &query, 1, 20)).is_err());
    }

    #[test]
    fn stale_ticket_never_overwrites_newer_state() {
        let mut state = ListingState::default();
        let first = state.begin();
        let second = state.begin();

        assert!(state.apply(second, Ok(PageResult::single(vec![product(2, "new")]))));
        assert!(!state.apply(first, Ok(PageResult::single(vec![product(1, "old")]))));
        assert_eq!(state.result.items[0].id, ProductId(2));
        assert!(!state.loading);
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut state = ListingState::default();
        let first = state.begin();
        let _second = state.begin();
        state.apply(first, Err(AppError::Timeout));
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn page_changes_stay_in_range_and_wait_for_idle() {
        let mut state = ListingState::default();
        let ticket = state.begin();
        state.apply(
            ticket,
            Ok(PageResult {
                items: vec![product(1, "a")],
                page: 1,
                total_pages: 3,
                total_count: 41,
            }),
        );
        assert!(!state.can_go_to(0));
        assert!(state.can_go_to(1));
        assert!(state.can_go_to(3));
        assert!(!state.can_go_to(4));

        state.begin();
        assert!(!state.can_go_to(2));
    }

    #[test]
    fn error_clears_results() {
        let mut state = ListingState::default();
        let ok = state.begin();
        state.apply(ok, Ok(PageResult::single(vec![product(1, "a")])));

        let failed = state.begin();
        state.apply(
            failed,
            Err(AppError::Http {
                status: 500,
                message: "Error del servidor al filtrar productos".into(),
            }),
        );
        assert!(state.result.items.is_empty());
        assert_eq!(state.result.total_pages, 0);
        assert_eq!(state.result.total_count, 0);
        assert_eq!(state.error.as_deref(), Some("Error del servidor al filtrar productos"));
    }

    #[test]
    fn catalog_query_maps_to_listing_query() {
        let q = CatalogQuery::names(vec!["Aspirina".into()]);
        let listing = ListingQuery::from(&q);
        assert!(listing.is_by_names());

        let q = CatalogQuery::search("ibu");
        let filter = ListingQuery::from(&q).to_filter(1, 20);
        assert_eq!(filter.query.as_deref(), Some("ibu"));
        assert_eq!(filter.page, 0);
    }
}

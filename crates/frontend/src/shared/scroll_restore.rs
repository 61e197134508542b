//! Keeps the catalog scroll offset across a visit to a product page.
//!
//! The catalog stores its offset in session storage right before opening a
//! product. Coming back, the offset is re-applied once the listing has
//! rendered enough content to scroll that far.

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ScrollBehavior, ScrollToOptions};

use super::storage::{BrowserStorage, KeyValueStorage, SCROLL_POSITION_KEY};

/// Delay before the first extent check
pub const INITIAL_DELAY_MS: u32 = 50;
/// Delay between further checks
pub const RETRY_DELAY_MS: u32 = 100;
pub const MAX_RETRIES: u32 = 10;
/// Below this scrollable extent the listing is considered not rendered yet
pub const MIN_EXTENT_PX: f64 = 200.0;

/// Kind of page being entered, as far as scrolling is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Catalog,
    ProductDetail,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollPlan {
    /// Wait for content, then scroll to the saved offset
    Restore(f64),
    /// Scroll to top, keep any saved offset
    Top,
    /// Scroll to top and forget the saved offset
    TopAndClear,
}

/// Decides what entering `kind` does with the saved offset.
pub fn plan(kind: PageKind, saved: Option<&str>) -> ScrollPlan {
    match kind {
        PageKind::Catalog => match saved {
            None => ScrollPlan::Top,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(y) if y.is_finite() && y >= 0.0 => ScrollPlan::Restore(y),
                _ => ScrollPlan::TopAndClear,
            },
        },
        PageKind::ProductDetail => ScrollPlan::Top,
        PageKind::Other => ScrollPlan::TopAndClear,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RestoreStep {
    ScrollTo(f64),
    Retry,
    GiveUp,
}

/// Bounded polling for a restore; one call per extent check.
#[derive(Debug, Clone)]
pub struct RestoreAttempts {
    target: f64,
    retries: u32,
}

impl RestoreAttempts {
    pub fn new(target: f64) -> Self {
        Self { target, retries: 0 }
    }

    /// `max_scroll` is the reachable extent: page height minus viewport height.
    pub fn next(&mut self, max_scroll: f64) -> RestoreStep {
        if max_scroll > MIN_EXTENT_PX {
            return RestoreStep::ScrollTo(self.target.min(max_scroll.max(0.0)));
        }
        if self.retries >= MAX_RETRIES {
            return RestoreStep::GiveUp;
        }
        self.retries += 1;
        RestoreStep::Retry
    }
}

/// Stores the current offset; called by the catalog before opening a product.
pub fn save_position() {
    let y = web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0);
    BrowserStorage::Session.set(SCROLL_POSITION_KEY, &y.round().to_string());
}

pub fn has_saved_position() -> bool {
    BrowserStorage::Session.get(SCROLL_POSITION_KEY).is_some()
}

/// Applies the scroll policy for a freshly entered page.
pub fn on_page_enter(kind: PageKind) {
    let storage = BrowserStorage::Session;
    match plan(kind, storage.get(SCROLL_POSITION_KEY).as_deref()) {
        ScrollPlan::Top => scroll_to(0.0, ScrollBehavior::Instant),
        ScrollPlan::TopAndClear => {
            scroll_to(0.0, ScrollBehavior::Instant);
            storage.remove(SCROLL_POSITION_KEY);
        }
        ScrollPlan::Restore(target) => spawn_local(async move {
            TimeoutFuture::new(INITIAL_DELAY_MS).await;
            let mut attempts = RestoreAttempts::new(target);
            loop {
                match attempts.next(max_scroll()) {
                    RestoreStep::ScrollTo(y) => {
                        scroll_to(y, ScrollBehavior::Instant);
                        storage.remove(SCROLL_POSITION_KEY);
                        log::debug!("scroll: restored catalog offset {}", y);
                        break;
                    }
                    RestoreStep::Retry => TimeoutFuture::new(RETRY_DELAY_MS).await,
                    RestoreStep::GiveUp => {
                        storage.remove(SCROLL_POSITION_KEY);
                        log::debug!("scroll: catalog never grew tall enough, offset dropped");
                        break;
                    }
                }
            }
        }),
    }
}

/// Smooth scroll to top, used by catalog page changes
pub fn scroll_top_smooth() {
    scroll_to(0.0, ScrollBehavior::Smooth);
}

fn scroll_to(top: f64, behavior: ScrollBehavior) {
    if let Some(window) = web_sys::window() {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(behavior);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

fn max_scroll() -> f64 {
    let Some(window) = web_sys::window() else {
        return 0.0;
    };
    let Some(document) = window.document() else {
        return 0.0;
    };
    let body = document.body().map(|b| b.scroll_height()).unwrap_or(0);
    let root = document
        .document_element()
        .map(|e| e.scroll_height())
        .unwrap_or(0);
    let viewport = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    f64::from(body.max(root)) - viewport
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_plans() {
        assert_eq!(plan(PageKind::Catalog, None), ScrollPlan::Top);
        assert_eq!(plan(PageKind::Catalog, Some("640")), ScrollPlan::Restore(640.0));
        assert_eq!(plan(PageKind::Catalog, Some("abc")), ScrollPlan::TopAndClear);
        assert_eq!(plan(PageKind::Catalog, Some("-5")), ScrollPlan::TopAndClear);
    }

    #[test]
    fn other_pages_plans() {
        assert_eq!(plan(PageKind::ProductDetail, Some("640")), ScrollPlan::Top);
        assert_eq!(plan(PageKind::Other, Some("640")), ScrollPlan::TopAndClear);
        assert_eq!(plan(PageKind::Other, None), ScrollPlan::TopAndClear);
    }

    #[test]
    fn restore_clamps_to_reachable_extent() {
        let mut attempts = RestoreAttempts::new(5000.0);
        assert_eq!(attempts.next(1200.0), RestoreStep::ScrollTo(1200.0));

        let mut attempts = RestoreAttempts::new(300.0);
        assert_eq!(attempts.next(1200.0), RestoreStep::ScrollTo(300.0));
    }

    #[test]
    fn restore_waits_for_content_then_scrolls() {
        let mut attempts = RestoreAttempts::new(800.0);
        assert_eq!(attempts.next(0.0), RestoreStep::Retry);
        assert_eq!(attempts.next(200.0), RestoreStep::Retry);
        assert_eq!(attempts.next(900.0), RestoreStep::ScrollTo(800.0));
    }

    #[test]
    fn restore_gives_up_after_ten_retries() {
        let mut attempts = RestoreAttempts::new(800.0);
        for _ in 0..MAX_RETRIES {
            assert_eq!(attempts.next(50.0), RestoreStep::Retry);
        }
        assert_eq!(attempts.next(50.0), RestoreStep::GiveUp);
    }
}

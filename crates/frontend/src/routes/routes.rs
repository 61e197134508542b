use leptos::prelude::*;

use super::route::{CatalogQuery, Route};
use crate::domain::a001_product::ui::{CatalogPage, ProductDetailsPage, StockPage};
use crate::layout::global_context::use_global;
use crate::layout::Shell;
use crate::shared::scroll_restore::{on_page_enter, PageKind};
use crate::system::auth::guard::{RequireAdmin, RequireAuth};
use crate::system::pages::home::HomePage;
use crate::system::pages::verify::VerifyAccountPage;
use crate::system::users::ui::profile::ProfilePage;

/// Mounted page. Catalog queries are not part of it, so moving between
/// catalog views keeps the same catalog component alive.
#[derive(Debug, Clone, PartialEq)]
enum Page {
    Home,
    Catalog,
    Product(String),
    Stock,
    Profile,
    Verify(Option<String>),
}

impl Page {
    fn of(route: &Route) -> Self {
        match route {
            Route::Home => Page::Home,
            Route::Catalog(_) => Page::Catalog,
            Route::Product(id) => Page::Product(id.clone()),
            Route::Stock => Page::Stock,
            Route::Profile => Page::Profile,
            Route::Verify { token } => Page::Verify(token.clone()),
        }
    }

    fn scroll_kind(&self) -> PageKind {
        match self {
            Page::Catalog => PageKind::Catalog,
            Page::Product(_) => PageKind::ProductDetail,
            _ => PageKind::Other,
        }
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let ctx = use_global();

    let page = Memo::new(move |_| ctx.route.with(Page::of));
    // keeps the last catalog query while another page is shown
    let catalog_query = Memo::new(move |prev: Option<&CatalogQuery>| {
        ctx.route.with(|route| match route {
            Route::Catalog(q) => q.clone(),
            _ => prev.cloned().unwrap_or_default(),
        })
    });

    Effect::new(move |_| {
        let kind = page.with(Page::scroll_kind);
        on_page_enter(kind);
    });

    view! {
        <Shell>
            {move || match page.get() {
                Page::Home => view! { <HomePage /> }.into_any(),
                Page::Catalog => view! { <CatalogPage query=catalog_query /> }.into_any(),
                Page::Product(id) => view! { <ProductDetailsPage id=id /> }.into_any(),
                Page::Stock => view! {
                    <RequireAdmin>
                        <StockPage />
                    </RequireAdmin>
                }.into_any(),
                Page::Profile => view! {
                    <RequireAuth>
                        <ProfilePage />
                    </RequireAuth>
                }.into_any(),
                Page::Verify(token) => view! { <VerifyAccountPage token=token /> }.into_any(),
            }}
        </Shell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_queries_share_one_page() {
        let a = Page::of(&Route::Catalog(CatalogQuery::search("aspirina")));
        let b = Page::of(&Route::Catalog(CatalogQuery::default()));
        assert_eq!(a, b);
        assert_eq!(a.scroll_kind(), PageKind::Catalog);
        assert_ne!(
            Page::of(&Route::Product("1".into())),
            Page::of(&Route::Product("2".into()))
        );
        assert_eq!(Page::of(&Route::Stock).scroll_kind(), PageKind::Other);
    }
}

mod card;

use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::card::ProductCard;
use crate::domain::a001_product::api::ProductsApi;
use crate::domain::a001_product::listing::{fetch_listing, ListingQuery, ListingState};
use crate::layout::global_context::use_global;
use crate::routes::route::CatalogQuery;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::CATALOG_PAGE_SIZE;
use crate::shared::scroll_restore::{has_saved_position, scroll_top_smooth};

/// Which of the catalog entry points is active
#[derive(Debug, Clone, PartialEq)]
enum CatalogMode {
    Offer,
    Search(String),
    Category(&'static str),
    All,
}

impl CatalogMode {
    fn of(query: &CatalogQuery) -> Self {
        if !query.names.is_empty() {
            CatalogMode::Offer
        } else if let Some(term) = query.search.as_deref().filter(|s| !s.is_empty()) {
            CatalogMode::Search(term.to_string())
        } else if let Some(category) = query.category {
            CatalogMode::Category(category.label())
        } else {
            CatalogMode::All
        }
    }

    fn title(&self) -> String {
        match self {
            CatalogMode::Offer => "Productos de la Oferta".to_string(),
            CatalogMode::Search(term) => format!("Resultados para \"{}\"", term),
            CatalogMode::Category(label) => label.to_string(),
            CatalogMode::All => "Todos los Productos".to_string(),
        }
    }

    fn empty_title(&self) -> &'static str {
        match self {
            CatalogMode::Offer => "No se encontraron productos para esta oferta",
            CatalogMode::Category(_) => "No hay productos en esta categoría",
            CatalogMode::Search(_) => "No se encontraron productos",
            CatalogMode::All => "No hay productos disponibles",
        }
    }

    fn empty_hint(&self) -> &'static str {
        match self {
            CatalogMode::Offer => {
                "Los productos de esta oferta podrían no estar disponibles temporalmente."
            }
            CatalogMode::Category(_) => {
                "Prueba seleccionando otra categoría desde el menú de filtros."
            }
            CatalogMode::Search(_) => "Intenta con otros términos de búsqueda.",
            CatalogMode::All => "Los productos aparecerán aquí cuando estén disponibles.",
        }
    }

    /// Counter line under the title
    fn summary(&self, total: usize) -> String {
        let one = total == 1;
        match self {
            CatalogMode::Search(_) => format!(
                "{} {}",
                total,
                if one { "resultado encontrado" } else { "resultados encontrados" }
            ),
            CatalogMode::All => format!(
                "{} {}",
                total,
                if one { "producto disponible" } else { "productos disponibles" }
            ),
            _ => format!("{} {}", total, if one { "producto" } else { "productos" }),
        }
    }
}

/// Product grid (`/productos`)
#[component]
pub fn CatalogPage(#[prop(into)] query: Signal<CatalogQuery>) -> impl IntoView {
    let ctx = use_global();
    let state = RwSignal::new(ListingState::default());
    let mode = Memo::new(move |_| CatalogMode::of(&query.get()));

    let load = move |page: usize| {
        let criteria = ListingQuery::from(&query.get_untracked());
        let Some(ticket) = state.try_update(|s| s.begin()) else {
            return;
        };
        log::debug!("catalog: loading page {} ({:?})", page, criteria);
        spawn_local(async move {
            let outcome = fetch_listing(&ProductsApi, &criteria, page, CATALOG_PAGE_SIZE).await;
            state.update(|s| {
                s.apply(ticket, outcome);
            });
        });
    };

    // new criteria always start from the first page
    Effect::new(move |_| {
        query.track();
        load(1);
    });

    let on_page_change = Callback::new(move |page: usize| {
        if state.with_untracked(|s| s.can_go_to(page)) {
            load(page);
            if !has_saved_position() {
                scroll_top_smooth();
            }
        }
    });

    let current_page = Signal::derive(move || state.with(|s| s.result.page));
    let total_pages = Signal::derive(move || state.with(|s| s.result.total_pages));
    let total_count = Signal::derive(move || state.with(|s| s.result.total_count));
    let loading = Signal::derive(move || state.with(|s| s.loading));

    let reload = move |_| {
        if let Some(w) = web_sys::window() {
            if w.location().reload().is_err() {
                log::error!("catalog: reload failed");
            }
        }
    };

    view! {
        <div class="catalog-page">
            {move || {
                if loading.get() {
                    return view! {
                        <div class="catalog-page__loading"><Spinner /></div>
                    }.into_any();
                }
                if let Some(err) = state.with(|s| s.error.clone()) {
                    return view! {
                        <div class="catalog-page__error">
                            <h2>"Error"</h2>
                            <p>{err}</p>
                            <Button appearance=ButtonAppearance::Primary on_click=reload>
                                "Recargar página"
                            </Button>
                        </div>
                    }.into_any();
                }

                let m = mode.get();
                let items = state.with(|s| s.result.items.clone());
                let total = total_count.get();
                let pages = total_pages.get();
                let page = current_page.get();

                let banner = match &m {
                    CatalogMode::Offer => view! {
                        <div class="catalog-banner catalog-banner--offer">
                            <span>"Productos incluidos en la promoción"</span>
                            <span class="catalog-banner__count">{m.summary(total)}</span>
                            <button class="catalog-banner__back" on:click=move |_| ctx.back()>
                                "← Volver a ofertas"
                            </button>
                        </div>
                    }.into_any(),
                    CatalogMode::Category(label) => view! {
                        <div class="catalog-banner catalog-banner--category">
                            <span>"Sección: "<strong>{*label}</strong></span>
                            <span class="catalog-banner__count">{m.summary(total)}</span>
                        </div>
                    }.into_any(),
                    CatalogMode::Search(_) | CatalogMode::All => {
                        let hint = if matches!(m, CatalogMode::All) {
                            "Usa la paginación para navegar entre las páginas"
                        } else {
                            "Navegación por páginas disponible abajo"
                        };
                        view! {
                            <div class="catalog-page__summary">
                                <p>
                                    {m.summary(total)}
                                    {(items.len() < total).then(|| view! {
                                        <span class="muted">{format!(" (Página {} de {})", page, pages)}</span>
                                    })}
                                </p>
                                {(pages > 1).then(|| view! { <p class="muted">{hint}</p> })}
                            </div>
                        }.into_any()
                    }
                };

                let body = if items.is_empty() {
                    view! {
                        <div class="empty-state">
                            <h3>{m.empty_title()}</h3>
                            <p class="muted">{m.empty_hint()}</p>
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <div class="product-grid">
                            {items.into_iter().map(|product| view! { <ProductCard product=product /> }).collect_view()}
                        </div>
                        <Show when=move || { total_pages.get() > 1 }>
                            <PaginationControls
                                current_page=current_page
                                total_pages=total_pages
                                total_count=total_count
                                disabled=loading
                                on_page_change=on_page_change
                            />
                        </Show>
                    }.into_any()
                };

                view! {
                    <div class="catalog-page__header">
                        <h1>{m.title()}</h1>
                        {banner}
                    </div>
                    {body}
                }.into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::ProductCategory;

    #[test]
    fn names_take_precedence_over_search_and_category() {
        let mut q = CatalogQuery::names(vec!["Aspirina".into()]);
        q.search = Some("ibu".into());
        q.category = Some(ProductCategory::Otros);
        assert_eq!(CatalogMode::of(&q), CatalogMode::Offer);
        assert_eq!(CatalogMode::of(&q).title(), "Productos de la Oferta");
    }

    #[test]
    fn titles_follow_the_active_mode() {
        assert_eq!(
            CatalogMode::of(&CatalogQuery::search("jarabe")).title(),
            "Resultados para \"jarabe\""
        );
        assert_eq!(
            CatalogMode::of(&CatalogQuery::category(ProductCategory::Oftalmologicos)).title(),
            "Oftalmológicos"
        );
        assert_eq!(CatalogMode::of(&CatalogQuery::default()).title(), "Todos los Productos");
    }

    #[test]
    fn summary_uses_singular_for_one() {
        assert_eq!(CatalogMode::All.summary(1), "1 producto disponible");
        assert_eq!(CatalogMode::Search("x".into()).summary(3), "3 resultados encontrados");
        assert_eq!(CatalogMode::Offer.summary(2), "2 productos");
    }
}

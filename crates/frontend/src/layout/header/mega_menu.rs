use contracts::enums::ProductCategory;
use leptos::prelude::*;

use crate::layout::global_context::use_global;
use crate::routes::route::{CatalogQuery, Route};
use crate::shared::icons;

/// "Filtrar por Sección" dropdown of the header
#[component]
pub fn MegaMenuCategory() -> impl IntoView {
    let ctx = use_global();
    let is_open = ctx.menu_open;

    let go = move |query: CatalogQuery| {
        ctx.navigate(Route::Catalog(query));
        is_open.set(false);
    };

    view! {
        <div class="mega-menu-category" on:mouseleave=move |_| is_open.set(false)>
            <button
                class="mega-menu-btn"
                class:mega-menu-btn-active=move || is_open.get()
                on:click=move |_| ctx.toggle_menu()
            >
                <span>"Filtrar por Sección"</span>
                <span class="mega-menu-chevron" class:mega-menu-chevron-open=move || is_open.get()>
                    {icons::icon("chevron-down")}
                </span>
            </button>

            <div class="mega-menu-panel" class:mega-menu-panel-open=move || is_open.get()>
                <div class="mega-menu-content mega-menu-grid-2">
                    <button class="mega-menu-card" on:click=move |_| go(CatalogQuery::default())>
                        <div class="mega-menu-card-title">"Todas las secciones"</div>
                    </button>
                    {ProductCategory::all().into_iter().map(|category| view! {
                        <button class="mega-menu-card" on:click=move |_| go(CatalogQuery::category(category))>
                            <span class=format!("mega-menu-dot {}", category.badge_class())></span>
                            <div class="mega-menu-card-title">{category.long_label()}</div>
                        </button>
                    }).collect_view()}
                </div>
            </div>
        </div>
    }
}

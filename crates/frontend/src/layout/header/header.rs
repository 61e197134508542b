use leptos::prelude::*;

use crate::layout::global_context::use_global;
use crate::layout::header::mega_menu::MegaMenuCategory;
use crate::routes::route::{CatalogQuery, Route};
use crate::shared::http::clear_basic_auth;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginModal;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_global();
    let auth = use_auth();
    let search = RwSignal::new(String::new());

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let query = CatalogQuery::search(&search.get_untracked());
        ctx.navigate(Route::Catalog(query));
    };

    let logout = move |_| {
        auth.logout();
        clear_basic_auth();
        ctx.navigate(Route::Home);
    };

    let is_current = move |matches: fn(&Route) -> bool| {
        move || {
            if ctx.route.with(matches) {
                "nav-link nav-link--active"
            } else {
                "nav-link"
            }
        }
    };

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <a
                    class="header__title"
                    href="/"
                    on:click=move |ev| {
                        ev.prevent_default();
                        ctx.navigate(Route::Home);
                    }
                >
                    "Astrafarma"
                </a>
                <nav class="header__nav">
                    <button
                        class=is_current(Route::is_catalog)
                        on:click=move |_| ctx.navigate(Route::Catalog(CatalogQuery::default()))
                    >
                        {icon("products")}
                        " Catálogo"
                    </button>
                    <Show when=move || auth.is_admin()>
                        <button
                            class=is_current(|r| matches!(r, Route::Stock))
                            on:click=move |_| ctx.navigate(Route::Stock)
                        >
                            {icon("inventory")}
                            " Stock"
                        </button>
                    </Show>
                    <Show when=move || auth.is_authenticated()>
                        <button
                            class=is_current(|r| matches!(r, Route::Profile))
                            on:click=move |_| ctx.navigate(Route::Profile)
                        >
                            {icon("user")}
                            " Usuario"
                        </button>
                    </Show>
                </nav>
            </div>

            <div class="header__search">
                <form class="search-bar" on:submit=on_search>
                    <input
                        type="text"
                        class="search-bar__input"
                        placeholder="Buscar productos..."
                        prop:value=move || search.get()
                        on:input=move |ev| search.set(event_target_value(&ev))
                    />
                    <button type="submit" class="search-bar__button">
                        {icon("search")}
                        " Buscar"
                    </button>
                </form>
                <MegaMenuCategory />
            </div>

            <div class="header__actions">
                <Show
                    when=move || auth.is_authenticated()
                    fallback=move || view! {
                        <button class="button button--primary" on:click=move |_| ctx.open_login()>
                            "Iniciar Sesión"
                        </button>
                    }
                >
                    <button class="button button--ghost" title="Cerrar sesión" on:click=logout>
                        {icon("logout")}
                        " Salir"
                    </button>
                </Show>
            </div>

            <Show when=move || ctx.login_open.get()>
                <LoginModal />
            </Show>
        </header>
    }
}

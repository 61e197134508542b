use contracts::enums::ProductCategory;
use leptos::prelude::*;

use crate::layout::global_context::use_global;
use crate::routes::route::{CatalogQuery, Route};
use crate::shared::config::config;
use crate::shared::whatsapp::whatsapp_link;

#[component]
pub fn Footer() -> impl IntoView {
    let ctx = use_global();
    let phone = config().whatsapp_phone.clone();
    let chat = whatsapp_link(&phone, "Hola, tengo una consulta sobre Astrafarma.");

    view! {
        <footer data-zone="footer" class="footer">
            <div class="footer__column">
                <span class="footer__brand">"Astrafarma"</span>
                <p class="muted">"Tu farmacia de confianza."</p>
            </div>
            <div class="footer__column">
                <h4>"Secciones"</h4>
                <ul>
                    {ProductCategory::all().into_iter().map(|category| view! {
                        <li>
                            <button
                                class="button button--link"
                                on:click=move |_| ctx.navigate(Route::Catalog(CatalogQuery::category(category)))
                            >
                                {category.label()}
                            </button>
                        </li>
                    }).collect_view()}
                </ul>
            </div>
            <div class="footer__column">
                <h4>"Contacto"</h4>
                <a href=chat target="_blank" rel="noopener">"WhatsApp"</a>
                {(!phone.is_empty()).then(|| view! { <p class="muted">{format!("+{}", phone)}</p> })}
            </div>
        </footer>
    }
}

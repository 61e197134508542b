use contracts::domain::a001_product::aggregate::Product;
use leptos::prelude::*;

use crate::layout::global_context::use_global;
use crate::routes::route::Route;
use crate::shared::icons::icon;
use crate::shared::scroll_restore::save_position;
use crate::shared::whatsapp::{open_whatsapp, product_card_inquiry};

#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let ctx = use_global();
    let image_failed = RwSignal::new(false);

    let id = product.id;
    let open = move || {
        if id.value() <= 0 {
            log::error!("invalid product id: {}", id);
            return;
        }
        save_position();
        ctx.navigate(Route::Product(id.to_string()));
    };

    let name = product.name.clone();
    let on_chat = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        open_whatsapp(&product_card_inquiry(&name));
    };

    let image = product.image().map(str::to_string);
    let alt = product.name.clone();

    view! {
        <div class="product-card">
            <div class="product-card__image" on:click=move |_| open()>
                {move || match image.clone() {
                    Some(src) if !image_failed.get() => view! {
                        <img
                            src=src
                            alt=alt.clone()
                            loading="lazy"
                            on:error=move |_| image_failed.set(true)
                        />
                    }.into_any(),
                    _ => view! { <div class="product-card__no-image">"Sin imagen"</div> }.into_any(),
                }}
            </div>
            <div class="product-card__body">
                <h3 class="product-card__name">{product.name.clone()}</h3>
                <p class="product-card__description">{product.description.clone()}</p>
                <div class="product-card__footer">
                    <span class="product-card__price">{product.formatted_price()}</span>
                    <div class="product-card__actions">
                        <button
                            class="button button--secondary button--small"
                            on:click=move |ev: leptos::ev::MouseEvent| {
                                ev.stop_propagation();
                                open();
                            }
                        >
                            "Ver más"
                        </button>
                        <button class="button button--whatsapp button--small" on:click=on_chat>
                            {icon("whatsapp")}
                            <span>"Chat"</span>
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

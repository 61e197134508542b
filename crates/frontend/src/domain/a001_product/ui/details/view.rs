use leptos::prelude::*;
use thaw::*;

use super::view_model::ProductDetailsViewModel;
use crate::layout::global_context::use_global;
use crate::routes::route::Route;
use crate::shared::icons::icon;

/// Product detail (`/producto/{id}`)
#[component]
pub fn ProductDetailsPage(id: String) -> impl IntoView {
    let ctx = use_global();
    let vm = ProductDetailsViewModel::new();
    vm.load(&id);

    let image_failed = RwSignal::new(false);
    let retry_id = StoredValue::new(id);

    view! {
        <div class="product-details">
            {move || {
                if vm.loading.get() {
                    return view! { <div class="product-details__loading"><Spinner /></div> }.into_any();
                }
                let Some(product) = vm.product.get() else {
                    let message = vm.error.get().unwrap_or_default();
                    return view! {
                        <div class="empty-state">
                            <h2>"Producto no encontrado"</h2>
                            <p class="muted">{message}</p>
                            <div class="empty-state__actions">
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    on_click=move |_| vm.load(&retry_id.get_value())
                                >
                                    "Reintentar"
                                </Button>
                                <Button
                                    appearance=ButtonAppearance::Secondary
                                    on_click=move |_| ctx.navigate(Route::Home)
                                >
                                    "Volver al inicio"
                                </Button>
                            </div>
                        </div>
                    }.into_any();
                };

                let image = product.image().map(str::to_string);
                let alt = product.name.clone();
                let description = if product.description.trim().is_empty() {
                    "No hay descripción disponible para este producto.".to_string()
                } else {
                    product.description.clone()
                };

                view! {
                    <button class="back-button" on:click=move |_| ctx.back()>
                        {icon("chevron-left")}
                        " Volver"
                    </button>
                    <div class="product-details__card">
                        <div class="product-details__image">
                            {match image {
                                Some(src) => view! {
                                    <Show
                                        when=move || !image_failed.get()
                                        fallback=|| view! { <span class="muted">"Sin imagen disponible"</span> }
                                    >
                                        <img
                                            src=src.clone()
                                            alt=alt.clone()
                                            on:error=move |_| image_failed.set(true)
                                        />
                                    </Show>
                                }.into_any(),
                                None => view! { <span class="muted">"Sin imagen disponible"</span> }.into_any(),
                            }}
                        </div>
                        <div class="product-details__info">
                            <h1>{product.name.clone()}</h1>
                            <section>
                                <h3>"Descripción"</h3>
                                <p>{description}</p>
                            </section>
                            <div class="product-details__price">
                                <span class="price">{product.formatted_price()}</span>
                                <span class="muted">" por unidad"</span>
                            </div>

                            <section class="quantity">
                                <h3>"Cantidad"</h3>
                                <div class="quantity__controls">
                                    <button
                                        class="quantity__step"
                                        disabled=move || { vm.quantity.get() <= 1 }
                                        on:click=move |_| vm.set_quantity(vm.quantity.get_untracked() as i64 - 1)
                                    >
                                        "−"
                                    </button>
                                    <input
                                        type="number"
                                        min="1"
                                        class="quantity__input"
                                        prop:value=move || vm.quantity.get().to_string()
                                        on:change=move |ev| {
                                            let parsed = event_target_value(&ev).trim().parse::<i64>().unwrap_or(1);
                                            vm.set_quantity(parsed);
                                        }
                                    />
                                    <span class="muted">
                                        {move || if vm.quantity.get() == 1 { "unidad" } else { "unidades" }}
                                    </span>
                                    <button
                                        class="quantity__step"
                                        on:click=move |_| vm.set_quantity(vm.quantity.get_untracked() as i64 + 1)
                                    >
                                        "+"
                                    </button>
                                </div>
                            </section>

                            <Show when=move || { vm.quantity.get() > 1 }>
                                <div class="product-details__total">
                                    <span>"Total:"</span>
                                    <span class="price">{move || vm.total().unwrap_or_default()}</span>
                                </div>
                            </Show>

                            <button class="button button--whatsapp button--block" on:click=move |_| vm.ask_on_whatsapp()>
                                {icon("whatsapp")}
                                " Consultar disponibilidad"
                            </button>
                            <p class="muted">
                                "Te contactaremos para confirmar disponibilidad y coordinar la entrega"
                            </p>
                        </div>
                    </div>
                }.into_any()
            }}
        </div>
    }
}

use contracts::domain::a002_offer::aggregate::Offer;
use leptos::prelude::*;

use crate::shared::date_utils::format_day;

/// Discount rows shown on a text banner before collapsing into "+N"
const LISTED_DISCOUNTS: usize = 3;

/// Slide of an offer without banner image
#[component]
pub fn TextOfferBanner(offer: Offer) -> impl IntoView {
    let title = offer.title.clone().filter(|t| !t.trim().is_empty());
    let description = Some(offer.description.clone()).filter(|d| !d.trim().is_empty());
    let product_count = offer.product_names.len();
    let max_discount = offer.max_discount();
    let hidden = offer.discounts.len().saturating_sub(LISTED_DISCOUNTS);
    let listed: Vec<_> = offer.discounts.iter().take(LISTED_DISCOUNTS).cloned().collect();
    let label = title.clone().unwrap_or_else(|| "Banner de oferta".to_string());

    view! {
        <section class="offer-banner offer-banner--text" aria-label=label role="region">
            {title.map(|t| view! {
                <div class="offer-banner__heading">
                    <h2>{t}</h2>
                    <div class="offer-banner__rule"></div>
                </div>
            })}
            {description.map(|d| view! { <p class="offer-banner__description">{d}</p> })}

            <div class="offer-banner__facts">
                <div class="offer-banner__fact">
                    <span class="offer-banner__fact-label">"Válida hasta"</span>
                    {format_day(offer.end_date)}
                </div>
                {(product_count > 0).then(|| view! {
                    <div class="offer-banner__fact">
                        <span class="offer-banner__fact-label">"Productos"</span>
                        {format!("{} disponibles", product_count)}
                    </div>
                })}
                {(max_discount > 0).then(|| view! {
                    <div class="offer-banner__fact offer-banner__fact--strong">
                        <span class="offer-banner__fact-label">"Hasta"</span>
                        {format!("{}% OFF", max_discount)}
                    </div>
                })}
            </div>

            {(!listed.is_empty()).then(|| view! {
                <div class="offer-banner__discounts">
                    <h3>"Descuentos disponibles:"</h3>
                    {listed.into_iter().map(|d| view! {
                        <div class="offer-banner__discount">
                            <span>{d.product_name}</span>
                            <span class="offer-banner__pct">{format!("{}% OFF", d.discount_percentage)}</span>
                        </div>
                    }).collect_view()}
                    {(hidden > 0).then(|| view! {
                        <div class="offer-banner__more">{format!("+{} productos más", hidden)}</div>
                    })}
                </div>
            })}
        </section>
    }
}

/// Banner slide; falls back to the text layout when the image cannot load
#[component]
pub fn ImageOfferBanner(offer: Offer) -> impl IntoView {
    let failed = RwSignal::new(false);
    let loaded = RwSignal::new(false);
    let src = offer.image_url.clone().unwrap_or_default();
    let alt = offer
        .title
        .clone()
        .unwrap_or_else(|| format!("Oferta {}", offer.id));
    let title = offer.title.clone().filter(|t| !t.trim().is_empty());
    let fallback = offer.clone();

    view! {
        <Show
            when=move || !failed.get()
            fallback=move || view! { <TextOfferBanner offer=fallback.clone() /> }
        >
            <div class="offer-banner offer-banner--image">
                <Show when=move || !loaded.get()>
                    <div class="offer-banner__loading">
                        <span class="muted">"Cargando imagen..."</span>
                    </div>
                </Show>
                <img
                    src=src.clone()
                    alt=alt.clone()
                    loading="lazy"
                    class=move || if loaded.get() { "offer-banner__img" } else { "offer-banner__img offer-banner__img--hidden" }
                    on:load=move |_| loaded.set(true)
                    on:error=move |_| failed.set(true)
                />
                {title.clone().map(|t| view! {
                    <div class="offer-banner__caption">
                        <h3>{t}</h3>
                    </div>
                })}
            </div>
        </Show>
    }
}

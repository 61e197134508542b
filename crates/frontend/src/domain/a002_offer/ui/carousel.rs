use contracts::domain::a002_offer::aggregate::{Offer, OfferId};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::banner::{ImageOfferBanner, TextOfferBanner};
use super::form::OfferFormModal;
use super::notify::{notified_message, OfferNotifyModal};
use crate::domain::a002_offer::api;
use crate::domain::a002_offer::carousel::Carousel;
use crate::domain::a002_offer::context::use_offers;
use crate::layout::global_context::use_global;
use crate::routes::route::{CatalogQuery, Route};
use crate::shared::components::notification::{Notice, Notification};
use crate::shared::icons::icon;
use crate::shared::modal_frame::ConfirmDialog;
use crate::shared::scheduler::{RepeatingTask, TimerCommand};
use crate::shared::whatsapp::open_whatsapp;
use crate::system::auth::context::use_auth;

/// Which offer dialog is open
#[derive(Clone)]
enum Dialog {
    Create,
    Edit(Offer),
    Notify,
}

/// Catalog route listing the products of `offer`
pub fn offer_route(offer: &Offer) -> Route {
    let names = offer.valid_product_names();
    if names.is_empty() {
        Route::Catalog(CatalogQuery::default())
    } else {
        Route::Catalog(CatalogQuery::names(names))
    }
}

/// Rotating banner of the active offers with the admin toolbar
#[component]
pub fn OfferCarousel() -> impl IntoView {
    let ctx = use_global();
    let auth = use_auth();
    let offers = use_offers();

    let active = offers.active;
    let carousel = RwSignal::new(Carousel::default());
    let task = StoredValue::new_local(RepeatingTask::new(move || {
        carousel.update(|c| {
            c.tick();
        });
    }));
    let apply = move |command: TimerCommand| task.update_value(|t| t.apply(command));

    Effect::new(move |_| {
        let count = active.with(Vec::len);
        let admin = auth.is_admin();
        let command = carousel.try_update(|c| {
            c.set_admin(admin);
            c.set_count(count)
        });
        if let Some(command) = command {
            apply(command);
        }
    });
    on_cleanup(move || apply(TimerCommand::Disarm));

    let dialog = RwSignal::new(None::<Dialog>);
    let to_delete = RwSignal::new(None::<OfferId>);
    let deleting = RwSignal::new(false);
    let notifying = RwSignal::new(false);
    let notice = RwSignal::new(None::<Notice>);

    let is_admin = Signal::derive(move || auth.is_admin());
    let count = Signal::derive(move || active.with(Vec::len));
    let current = Memo::new(move |_| {
        let idx = carousel.with(|c| c.index());
        active.with(|a| a.get(idx).cloned())
    });

    let open_offer = move |offer: &Offer| ctx.navigate(offer_route(offer));

    let confirm_delete = Callback::new(move |_| {
        let (Some(id), Some(token)) = (to_delete.get_untracked(), auth.token()) else {
            return;
        };
        deleting.set(true);
        spawn_local(async move {
            if let Err(e) = offers.delete(&token, id).await {
                log::error!("offer {} delete failed: {}", id, e);
                notice.set(Some(Notice::error(
                    "Error al eliminar la oferta. Por favor, intenta nuevamente.",
                )));
            }
            deleting.set(false);
            to_delete.set(None);
        });
    });

    let confirm_notify = Callback::new(move |mut ids: Vec<OfferId>| {
        let Some(token) = auth.token() else {
            return;
        };
        ids.retain(|id| offers.is_active(*id));
        if ids.is_empty() {
            return;
        }
        notifying.set(true);
        spawn_local(async move {
            match offers.notify(&token, &ids).await {
                Ok(()) => {
                    notice.set(Some(Notice::success(notified_message(ids.len()))));
                    dialog.set(None);
                }
                Err(e) => {
                    log::error!("offer notify failed: {}", e);
                    notice.set(Some(Notice::error(
                        "Error al enviar las notificaciones. Por favor, intenta nuevamente.",
                    )));
                }
            }
            notifying.set(false);
        });
    });

    // edit the backend's current copy; the cached one is the fallback
    let open_edit = move |offer: Offer| {
        spawn_local(async move {
            let fresh = match api::get(offer.id).await {
                Ok(fresh) => fresh,
                Err(e) => {
                    log::warn!("offer {} reload failed, editing cached copy: {}", offer.id, e);
                    offer
                }
            };
            dialog.set(Some(Dialog::Edit(fresh)));
        });
    };

    let admin_toolbar = move || {
        let offer = current.get();
        view! {
            <div class="offer-toolbar">
                <button class="button button--primary" on:click=move |_| dialog.set(Some(Dialog::Notify))>
                    {icon("mail")}
                    " Notificar Ofertas"
                </button>
                <button class="button button--info" on:click=move |_| dialog.set(Some(Dialog::Create))>
                    "+ Nueva Oferta"
                </button>
                {offer.map(|offer| {
                    let id = offer.id;
                    view! {
                        <button class="button button--warning" on:click=move |_| open_edit(offer.clone())>
                            {icon("edit")}
                            " Editar"
                        </button>
                        <button
                            class="button button--danger"
                            disabled=move || deleting.get()
                            on:click=move |_| to_delete.set(Some(id))
                        >
                            {icon("trash")}
                            {move || if deleting.get() && to_delete.get() == Some(id) { " Eliminando..." } else { " Eliminar" }}
                        </button>
                    }
                })}
            </div>
        }
    };

    let slides = move || {
        let idx = carousel.with(|c| c.index());
        active
            .get()
            .into_iter()
            .enumerate()
            .map(|(i, offer)| {
                let class = if i == idx { "carousel__slide carousel__slide--current" } else { "carousel__slide" };
                let target = offer.clone();
                let banner = if offer.is_image_offer() {
                    view! { <ImageOfferBanner offer=offer /> }.into_any()
                } else {
                    view! { <TextOfferBanner offer=offer /> }.into_any()
                };
                view! {
                    <div class=class on:click=move |_| open_offer(&target)>
                        {banner}
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <Notification notice=notice />
        {move || {
            if offers.loading.get() {
                return view! {
                    <div class="carousel carousel--loading">
                        <span class="muted">"Cargando ofertas..."</span>
                    </div>
                }.into_any();
            }
            if count.get() == 0 && !is_admin.get() {
                return ().into_any();
            }
            view! {
                <Show when=move || is_admin.get()>
                    {admin_toolbar}
                </Show>
                <Show when=move || { is_admin.get() && count.get() > 1 }>
                    <div class="notice notice--info">
                        "Modo Administrador: Auto-rotación desactivada. Usa las flechas para navegar."
                    </div>
                </Show>

                <div
                    class="carousel"
                    on:mouseenter=move |_| {
                        if let Some(command) = carousel.try_update(|c| c.hover_enter()) {
                            apply(command);
                        }
                    }
                    on:mouseleave=move |_| {
                        if let Some(command) = carousel.try_update(|c| c.hover_leave()) {
                            apply(command);
                        }
                    }
                >
                    <div class="carousel__track">
                        <Show
                            when=move || { count.get() > 0 }
                            fallback=move || view! {
                                <div class="carousel__empty">
                                    <p>"No hay ofertas activas"</p>
                                    <Show when=move || is_admin.get()>
                                        <p class="muted">"Haz clic en \"Nueva Oferta\" para agregar una"</p>
                                    </Show>
                                </div>
                            }
                        >
                            {slides}
                        </Show>
                    </div>

                    <Show when=move || { count.get() > 1 }>
                        <button
                            class="carousel__arrow carousel__arrow--prev"
                            aria-label="Oferta anterior"
                            on:click=move |_| carousel.update(|c| c.prev())
                        >
                            {icon("chevron-left")}
                        </button>
                        <button
                            class="carousel__arrow carousel__arrow--next"
                            aria-label="Siguiente oferta"
                            on:click=move |_| carousel.update(|c| c.next())
                        >
                            {icon("chevron-right")}
                        </button>
                        <div class="carousel__dots">
                            {move || (0..count.get()).map(|i| view! {
                                <button
                                    class=move || if carousel.with(|c| c.index()) == i { "carousel__dot carousel__dot--active" } else { "carousel__dot" }
                                    aria-label=format!("Ir a oferta {}", i + 1)
                                    on:click=move |_| carousel.update(|c| c.select(i))
                                />
                            }).collect_view()}
                        </div>
                        <div class="carousel__auto">
                            <span class=move || if is_admin.get() { "carousel__led" } else { "carousel__led carousel__led--on" }></span>
                            "Auto"
                        </div>
                    </Show>
                </div>

                {move || current.get().map(|offer| {
                    let ask = offer.clone();
                    view! {
                        <div class="offer-actions">
                            <button class="button button--whatsapp" on:click=move |_| open_whatsapp(&ask.inquiry_message())>
                                {icon("whatsapp")}
                                " Consultar Oferta"
                            </button>
                            <button class="button button--info" on:click=move |_| open_offer(&offer)>
                                {icon("products")}
                                " Ver Productos"
                            </button>
                        </div>
                    }
                })}
            }.into_any()
        }}

        {move || dialog.get().map(|d| match d {
            Dialog::Create => view! {
                <OfferFormModal offer=None on_close=Callback::new(move |_| dialog.set(None)) />
            }.into_any(),
            Dialog::Edit(offer) => view! {
                <OfferFormModal offer=Some(offer) on_close=Callback::new(move |_| dialog.set(None)) />
            }.into_any(),
            Dialog::Notify => view! {
                <OfferNotifyModal
                    active=offers.active
                    busy=notifying
                    on_confirm=confirm_notify
                    on_close=Callback::new(move |_| dialog.set(None))
                />
            }.into_any(),
        })}

        {move || to_delete.get().map(|_| view! {
            <ConfirmDialog
                title="Eliminar oferta"
                message="¿Estás seguro de que quieres eliminar esta oferta?"
                busy=deleting
                on_confirm=confirm_delete
                on_cancel=Callback::new(move |_| {
                    if !deleting.get_untracked() {
                        to_delete.set(None);
                    }
                })
            />
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a002_offer::aggregate::OfferDto;

    fn offer(names: &[&str]) -> Offer {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        Offer {
            id: OfferId(1),
            data: OfferDto {
                title: Some("Verano".into()),
                description: String::new(),
                image_url: None,
                start_date: day.and_hms_opt(0, 0, 0).unwrap(),
                end_date: day.and_hms_opt(23, 59, 59).unwrap(),
                product_names: names.iter().map(|n| n.to_string()).collect(),
                discounts: Vec::new(),
                whatsapp_message: String::new(),
            },
        }
    }

    #[test]
    fn offer_opens_catalog_with_its_products() {
        assert_eq!(
            offer_route(&offer(&[" Aspirina ", "", "Ibuprofeno"])),
            Route::Catalog(CatalogQuery::names(vec!["Aspirina".into(), "Ibuprofeno".into()]))
        );
        assert_eq!(offer_route(&offer(&["  "])), Route::Catalog(CatalogQuery::default()));
    }
}

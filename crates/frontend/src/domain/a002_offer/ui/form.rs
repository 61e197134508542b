use contracts::domain::a002_offer::aggregate::{Offer, OfferId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

use crate::domain::a002_offer::context::use_offers;
use crate::domain::a002_offer::form::OfferDraft;
use crate::shared::modal_frame::ModalFrame;
use crate::system::auth::context::use_auth;

/// Create (no `offer`) or edit dialog of an offer
#[component]
pub fn OfferFormModal(offer: Option<Offer>, on_close: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let offers = use_offers();
    let editing: Option<OfferId> = offer.as_ref().map(|o| o.id);
    let is_edit = editing.is_some();

    let draft = RwSignal::new(offer.as_ref().map(OfferDraft::from).unwrap_or_default());
    let file_mode = RwSignal::new(false);
    let image_file = RwSignal::new_local(None::<File>);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let switch_source = move |from_file: bool| {
        file_mode.set(from_file);
        if from_file {
            draft.update(|d| d.image_url.clear());
        } else {
            image_file.set(None);
        }
    };

    let on_file = move |ev: leptos::ev::Event| {
        let file = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        image_file.set(file);
    };

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = auth.token() else {
            return;
        };
        error.set(None);
        let use_image = draft.with_untracked(|d| d.use_image);
        // a picked file only counts in banner mode
        let file = image_file.get_untracked().filter(|_| use_image);
        let dto = match draft.with_untracked(|d| d.to_dto(file.is_some())) {
            Ok(dto) => dto,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        saving.set(true);
        spawn_local(async move {
            let result = match editing {
                Some(id) => offers.update(&token, id, &dto, file.as_ref()).await,
                None => offers.create(&token, &dto, file.as_ref()).await,
            };
            saving.set(false);
            match result {
                Ok(()) => on_close.run(()),
                Err(e) => {
                    log::error!("offer save failed: {}", e);
                    let msg = if e.is_validation() {
                        e.user_message()
                    } else if is_edit {
                        "Error al actualizar la oferta".to_string()
                    } else {
                        "Error al crear la oferta".to_string()
                    };
                    error.set(Some(msg));
                }
            }
        });
    };

    let close = Callback::new(move |_| {
        if !saving.get_untracked() {
            on_close.run(());
        }
    });

    let preview = move || {
        if let Some(name) = image_file.with(|f| f.as_ref().map(|f| f.name())) {
            return view! { <span class="muted">{name}</span> }.into_any();
        }
        let url = draft.with(|d| d.image_url.trim().to_string());
        if url.is_empty() {
            view! { <span class="muted">"Sin imagen"</span> }.into_any()
        } else {
            view! { <img src=url alt="Vista previa del banner" /> }.into_any()
        }
    };

    let segment_class = move |active: bool| {
        if active {
            "segmented__item segmented__item--active"
        } else {
            "segmented__item"
        }
    };

    let title = if is_edit { "Editar Oferta" } else { "Nueva Oferta" };

    view! {
        <ModalFrame title=title.to_string() on_close=close close_on_overlay=false modal_class="offer-modal">
            <div class="offer-modal__mode">
                <button
                    type="button"
                    role="switch"
                    aria-checked=move || draft.with(|d| d.use_image).to_string()
                    class=move || if draft.with(|d| d.use_image) { "switch switch--on" } else { "switch" }
                    on:click=move |_| draft.update(|d| d.use_image = !d.use_image)
                >
                    <span class="switch__knob"></span>
                </button>
                <span class="muted">
                    {move || if draft.with(|d| d.use_image) {
                        "Modo: Banner con imagen"
                    } else {
                        "Modo: Título y descripción"
                    }}
                </span>
            </div>

            <form class="offer-form" on:submit=submit>
                <Show
                    when=move || draft.with(|d| d.use_image)
                    fallback=move || view! {
                        <div class="form__group">
                            <label class="form__label">"Título"</label>
                            <input
                                type="text"
                                class="form__input"
                                placeholder="Título de la oferta"
                                prop:value=move || draft.with(|d| d.title.clone())
                                on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                            />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Descripción"</label>
                            <textarea
                                class="form__textarea"
                                rows="3"
                                prop:value=move || draft.with(|d| d.description.clone())
                                on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                            />
                        </div>
                    }
                >
                    <div class="form__group">
                        <label class="form__label">"Vista previa de la imagen"</label>
                        <div class="offer-form__preview">{preview}</div>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Tipo de carga de imagen"</label>
                        <div class="segmented">
                            <button
                                type="button"
                                class=move || segment_class(!file_mode.get())
                                disabled=move || saving.get()
                                on:click=move |_| switch_source(false)
                            >
                                "Por URL"
                            </button>
                            <button
                                type="button"
                                class=move || segment_class(file_mode.get())
                                disabled=move || saving.get()
                                on:click=move |_| switch_source(true)
                            >
                                "Subir archivo"
                            </button>
                        </div>
                    </div>
                    <Show
                        when=move || !file_mode.get()
                        fallback=move || view! {
                            <label class="file-drop">
                                <input type="file" accept="image/*" on:change=on_file disabled=move || saving.get() />
                                <span>
                                    {move || image_file.with(|f| f.as_ref().map(|f| f.name())).unwrap_or_else(|| {
                                        "Haz clic para seleccionar o arrastra una imagen aquí".to_string()
                                    })}
                                </span>
                                <span class="muted">"PNG, JPG, JPEG hasta 10MB"</span>
                            </label>
                        }
                    >
                        <div class="form__group">
                            <label class="form__label">"URL de la Imagen"</label>
                            <input
                                type="url"
                                class="form__input"
                                placeholder="https://ejemplo.com/banner.jpg (opcional)"
                                prop:value=move || draft.with(|d| d.image_url.clone())
                                on:input=move |ev| draft.update(|d| d.image_url = event_target_value(&ev))
                                disabled=move || saving.get()
                            />
                        </div>
                    </Show>
                </Show>

                <div class="form__row">
                    <div class="form__group">
                        <label class="form__label">"Fecha Inicio"</label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || draft.with(|d| d.start_date.clone())
                            on:input=move |ev| draft.update(|d| d.start_date = event_target_value(&ev))
                        />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Fecha Fin"</label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || draft.with(|d| d.end_date.clone())
                            on:input=move |ev| draft.update(|d| d.end_date = event_target_value(&ev))
                        />
                    </div>
                </div>

                <div class="form__group">
                    <label class="form__label">"Nombres de Productos (separados por coma)"</label>
                    <input
                        type="text"
                        class="form__input"
                        placeholder="Producto A, Producto B"
                        prop:value=move || draft.with(|d| d.names_text().to_string())
                        on:input=move |ev| draft.update(|d| d.set_names_text(event_target_value(&ev)))
                    />
                    <p class="form__hint">"Ingrese los nombres separados por comas (ej: Producto A, Producto B)"</p>
                </div>

                {move || {
                    let names = draft.with(|d| d.names());
                    (!names.is_empty()).then(|| view! {
                        <div class="form__group">
                            <label class="form__label">"Descuentos por Producto (%)"</label>
                            {names.into_iter().enumerate().map(|(idx, name)| view! {
                                <div class="offer-form__discount">
                                    <span>{name}</span>
                                    <input
                                        type="text"
                                        inputmode="numeric"
                                        class="form__input form__input--narrow"
                                        placeholder="% Desc."
                                        prop:value=move || draft.with(|d| d.discount(idx).map(|p| p.to_string()).unwrap_or_default())
                                        on:input=move |ev| draft.update(|d| d.set_discount(idx, &event_target_value(&ev)))
                                    />
                                    <span class="muted">"%"</span>
                                </div>
                            }).collect_view()}
                        </div>
                    })
                }}

                {move || error.get().map(|e| view! {
                    <div class="error-message">
                        <span>{e}</span>
                        <button type="button" class="error-message__close" on:click=move |_| error.set(None)>
                            "×"
                        </button>
                    </div>
                })}

                <div class="modal__actions">
                    <button
                        type="button"
                        class="button button--secondary"
                        disabled=move || saving.get()
                        on:click=move |_| close.run(())
                    >
                        "Cancelar"
                    </button>
                    <button type="submit" class="button button--primary" disabled=move || saving.get()>
                        {move || match (saving.get(), is_edit) {
                            (true, true) => "Actualizando...",
                            (true, false) => "Creando...",
                            (false, true) => "Actualizar",
                            (false, false) => "Crear",
                        }}
                    </button>
                </div>
            </form>
        </ModalFrame>
    }
}

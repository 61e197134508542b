use contracts::domain::a002_offer::aggregate::{Offer, OfferId};
use leptos::prelude::*;

use crate::shared::modal_frame::ModalFrame;

/// Offers picked for the e-mail blast, in click order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferSelection(Vec<OfferId>);

impl OfferSelection {
    pub fn contains(&self, id: OfferId) -> bool {
        self.0.contains(&id)
    }

    pub fn toggle(&mut self, id: OfferId) {
        match self.0.iter().position(|x| *x == id) {
            Some(pos) => {
                self.0.remove(pos);
            }
            None => self.0.push(id),
        }
    }

    /// Selects every offer, or clears when all are already selected
    pub fn toggle_all(&mut self, available: &[OfferId]) {
        if self.0.len() == available.len() {
            self.0.clear();
        } else {
            self.0 = available.to_vec();
        }
    }

    pub fn ids(&self) -> &[OfferId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn notified_message(count: usize) -> String {
    format!(
        "Se han enviado las notificaciones para {} {} exitosamente.",
        count,
        if count == 1 { "oferta" } else { "ofertas" }
    )
}

/// Picks active offers to e-mail to subscribers
#[component]
pub fn OfferNotifyModal(
    /// Offers currently inside their date window
    #[prop(into)] active: Signal<Vec<Offer>>,
    #[prop(into)] busy: Signal<bool>,
    on_confirm: Callback<Vec<OfferId>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let selection = RwSignal::new(OfferSelection::default());
    let active_ids = move || active.with(|a| a.iter().map(|o| o.id).collect::<Vec<_>>());

    let close = Callback::new(move |_| {
        selection.set(OfferSelection::default());
        on_close.run(());
    });

    let confirm = move |_| {
        let ids = selection.with_untracked(|s| s.ids().to_vec());
        if !ids.is_empty() {
            on_confirm.run(ids);
            selection.set(OfferSelection::default());
        }
    };

    view! {
        <ModalFrame title="Notificar Ofertas por Correo" on_close=close modal_class="notify-modal">
            <p class="muted">
                "Selecciona las ofertas activas que deseas notificar por correo electrónico. "
                "Solo se muestran ofertas que están actualmente vigentes."
            </p>
            <Show
                when=move || active.with(|a| !a.is_empty())
                fallback=|| view! {
                    <div class="empty-state">
                        <p class="empty-state__title">"No hay ofertas activas"</p>
                        <p class="muted">"Crea ofertas activas para poder enviar notificaciones."</p>
                    </div>
                }
            >
                <div class="notify-modal__bar">
                    <span>
                        {move || {
                            let n = active.with(Vec::len);
                            format!("{} {}", n, if n == 1 { "oferta activa" } else { "ofertas activas" })
                        }}
                    </span>
                    <button
                        class="button button--link"
                        on:click=move |_| {
                            let ids = active_ids();
                            selection.update(|s| s.toggle_all(&ids));
                        }
                    >
                        {move || if selection.with(|s| s.len()) == active.with(Vec::len) {
                            "Deseleccionar todas"
                        } else {
                            "Seleccionar todas"
                        }}
                    </button>
                </div>
                <ul class="notify-modal__list">
                    <For
                        each=move || active.get()
                        key=|offer| offer.id
                        children=move |offer| {
                            let id = offer.id;
                            let name = offer
                                .title
                                .clone()
                                .filter(|t| !t.trim().is_empty())
                                .unwrap_or_else(|| format!("Oferta #{}", id));
                            let checked = move || selection.with(|s| s.contains(id));
                            view! {
                                <li
                                    class=move || if checked() { "notify-modal__item notify-modal__item--selected" } else { "notify-modal__item" }
                                    on:click=move |_| selection.update(|s| s.toggle(id))
                                >
                                    <input type="checkbox" prop:checked=checked />
                                    <div>
                                        <div class="notify-modal__name">{name}</div>
                                        <div class="muted">
                                            {format!("Hasta {}% · {} productos", offer.max_discount(), offer.product_names.len())}
                                        </div>
                                    </div>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
            <div class="modal__actions">
                <button class="button button--secondary" disabled=move || busy.get() on:click=move |_| close.run(())>
                    "Cancelar"
                </button>
                <button
                    class="button button--primary"
                    disabled=move || busy.get() || selection.with(|s| s.is_empty())
                    on:click=confirm
                >
                    {move || if busy.get() {
                        "Enviando...".to_string()
                    } else {
                        format!("Enviar notificaciones ({})", selection.with(|s| s.len()))
                    }}
                </button>
            </div>
        </ModalFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_all_selects_then_clears() {
        let ids = [OfferId(1), OfferId(2)];
        let mut s = OfferSelection::default();
        s.toggle(OfferId(2));
        s.toggle_all(&ids);
        assert_eq!(s.ids(), &ids);
        s.toggle_all(&ids);
        assert!(s.is_empty());
    }

    #[test]
    fn toggle_flips_membership() {
        let mut s = OfferSelection::default();
        s.toggle(OfferId(3));
        assert!(s.contains(OfferId(3)));
        s.toggle(OfferId(3));
        assert!(!s.contains(OfferId(3)));
    }

    #[test]
    fn success_message_pluralizes() {
        assert_eq!(
            notified_message(1),
            "Se han enviado las notificaciones para 1 oferta exitosamente."
        );
        assert!(notified_message(3).contains("3 ofertas"));
    }
}

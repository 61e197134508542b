use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use super::state::use_edit_state;
use crate::shared::components::notification::Notice;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;

/// "Subir catálogo": enabled once a product changed in this session
#[component]
pub fn ExportCatalogButton(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    let auth = use_auth();
    let edit_state = use_edit_state();
    let (uploading, set_uploading) = signal(false);

    let upload = move |_| {
        let Some(token) = auth.token() else {
            notice.set(Some(Notice::error("Error al subir catálogo a Supabase.")));
            return;
        };
        set_uploading.set(true);
        spawn_local(async move {
            match api::export_catalog(&token).await {
                Ok(()) => {
                    log::info!("catalog exported");
                    edit_state.reset();
                    notice.set(Some(Notice::success("¡Catálogo subido correctamente a Supabase!")));
                }
                Err(e) => {
                    log::error!("catalog export failed: {}", e);
                    notice.set(Some(Notice::error("Error al subir catálogo a Supabase.")));
                }
            }
            set_uploading.set(false);
        });
    };

    let title = move || {
        if !edit_state.is_edited() {
            "No hay cambios por subir"
        } else if uploading.get() {
            "Subiendo..."
        } else {
            "Subir catálogo a Supabase"
        }
    };

    view! {
        <span title=title>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=upload
                disabled=Signal::derive(move || !edit_state.is_edited() || uploading.get())
            >
                {move || if uploading.get() {
                    view! { <Spinner /> }.into_any()
                } else {
                    icon("upload")
                }}
                {move || if uploading.get() { " Subiendo..." } else { " Subir catálogo" }}
            </Button>
        </span>
    }
}

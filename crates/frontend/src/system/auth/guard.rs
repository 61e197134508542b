use leptos::prelude::*;
use leptos::task::spawn_local;

use super::context::use_auth;
use crate::layout::global_context::use_global;
use crate::routes::route::Route;
use crate::system::users::api;

/// Component that requires authentication.
/// Redirects home when there is no session; refreshes a placeholder profile.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let ctx = use_global();
    let (refreshing, set_refreshing) = signal(false);
    // token whose profile was already requested; at most one fetch per token
    let requested_for = StoredValue::new(None::<String>);

    Effect::new(move |_| {
        let session = auth.session.get();
        if session.loading {
            return;
        }
        if !session.is_authenticated() {
            ctx.replace(Route::Home);
            return;
        }
        if session.needs_profile() && !refreshing.get_untracked() {
            let Some(token) = session.token.clone() else {
                return;
            };
            if requested_for.with_value(|t| t.as_deref() == Some(token.as_str())) {
                return;
            }
            requested_for.set_value(Some(token.clone()));
            set_refreshing.set(true);
            spawn_local(async move {
                match api::get_me(&token).await {
                    Ok(profile) => auth.set_profile(profile),
                    Err(e) => log::error!("profile refresh failed: {}", e),
                }
                set_refreshing.set(false);
            });
        }
    });

    view! {
        <Show
            when=move || {
                let session = auth.session.get();
                !session.loading && session.is_authenticated() && session.profile.is_some()
                    && !refreshing.get()
            }
            fallback=|| view! { <div class="guard-notice">"Cargando..."</div> }
        >
            {children()}
        </Show>
    }
}

/// Component that requires admin privileges.
/// Redirects home once the session is known and is not an admin one.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let ctx = use_global();

    Effect::new(move |_| {
        let session = auth.session.get();
        if !session.loading && !session.is_admin() {
            ctx.replace(Route::Home);
        }
    });

    view! {
        <Show
            when=move || auth.is_admin()
            fallback=move || {
                auth.is_loading()
                    .then(|| view! { <div class="guard-notice">"Verificando permisos..."</div> })
            }
        >
            {children()}
        </Show>
    }
}

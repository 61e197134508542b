use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::global_context::use_global;
use crate::routes::route::Route;
use crate::system::auth::{api, context::use_auth};

/// Delay before returning home, whatever the outcome
const REDIRECT_DELAY_MS: u32 = 500;

/// Landing page of the e-mail verification link (`/verify?token=`)
#[component]
pub fn VerifyAccountPage(token: Option<String>) -> impl IntoView {
    let ctx = use_global();
    let auth = use_auth();

    spawn_local(async move {
        if let Some(token) = token {
            match api::verify(&token).await {
                Ok(response) => auth.verified(&response),
                Err(e) => log::error!("account verification failed: {}", e),
            }
        }
        TimeoutFuture::new(REDIRECT_DELAY_MS).await;
        ctx.navigate(Route::Home);
    });

    view! {
        <div class="verify-page">
            <h1>"Verificación de Cuenta"</h1>
            <p class="verify-page__message">
                "¡Tu cuenta está siendo verificada! Serás redirigido al inicio en unos segundos..."
            </p>
        </div>
    }
}

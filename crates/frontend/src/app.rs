use leptos::prelude::*;

use crate::domain::a002_offer::context::OfferProvider;
use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use crate::usecases::u501_export_catalog::ProductEditState;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    let ctx = AppGlobalContext::new();
    ctx.init_router_integration();
    provide_context(ctx);

    // "catalog edited" flag lives for the whole session
    provide_context(ProductEditState::new());

    view! {
        <AuthProvider>
            <OfferProvider>
                <AppRoutes />
            </OfferProvider>
        </AuthProvider>
    }
}

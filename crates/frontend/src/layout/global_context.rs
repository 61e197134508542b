use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::window;

use crate::routes::route::Route;

/// App-wide UI state: current route and shell toggles
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub route: RwSignal<Route>,
    pub login_open: RwSignal<bool>,
    /// Category menu of the header
    pub menu_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            route: RwSignal::new(current_location_route()),
            login_open: RwSignal::new(false),
            menu_open: RwSignal::new(false),
        }
    }

    /// Keeps `route` in sync with browser back/forward.
    pub fn init_router_integration(&self) {
        let route = self.route;
        let on_pop = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |_| {
            route.set(current_location_route());
        });
        if let Some(w) = window() {
            if w
                .add_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref())
                .is_err()
            {
                log::error!("router: failed to subscribe to popstate");
            }
        }
        // lives as long as the page
        on_pop.forget();
    }

    /// Pushes a history entry and switches the page.
    pub fn navigate(&self, to: Route) {
        self.write_history(&to, false);
        self.menu_open.set(false);
        self.route.set(to);
    }

    /// Like [`navigate`](Self::navigate) without a new history entry
    pub fn replace(&self, to: Route) {
        self.write_history(&to, true);
        self.route.set(to);
    }

    pub fn back(&self) {
        if let Some(Err(e)) = window().and_then(|w| w.history().ok()).map(|h| h.back()) {
            log::error!("router: history.back failed: {:?}", e);
        }
    }

    fn write_history(&self, to: &Route, replace: bool) {
        let url = to.to_url();
        let Some(history) = window().and_then(|w| w.history().ok()) else {
            return;
        };
        let result = if replace {
            history.replace_state_with_url(&JsValue::NULL, "", Some(&url))
        } else {
            history.push_state_with_url(&JsValue::NULL, "", Some(&url))
        };
        if result.is_err() {
            log::error!("router: failed to update history with {}", url);
        }
    }

    pub fn open_login(&self) {
        self.login_open.set(true);
    }

    pub fn toggle_menu(&self) {
        self.menu_open.update(|val| *val = !*val);
    }
}

pub fn use_global() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext context not found")
}

fn current_location_route() -> Route {
    let location = window().map(|w| w.location());
    let path = location
        .as_ref()
        .and_then(|l| l.pathname().ok())
        .unwrap_or_default();
    let search = location
        .as_ref()
        .and_then(|l| l.search().ok())
        .unwrap_or_default();
    Route::parse(&path, &search)
}

use contracts::system::auth::LoginResponse;
use contracts::system::users::Profile;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::session::{Session, SessionStore};
use crate::shared::storage::BrowserStorage;
use crate::system::users::api::UsersApi;

/// Handle to the session signals. Copy, so it can be moved into async blocks
/// that outlive the reactive owner lookup.
#[derive(Clone, Copy)]
pub struct Auth {
    pub session: ReadSignal<Session>,
    set_session: WriteSignal<Session>,
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (session, set_session) = signal(Session::default());

    // Restore the session from localStorage once, on mount
    spawn_local(async move {
        let mut store = SessionStore::new(BrowserStorage::Local);
        let restored = store.bootstrap(&UsersApi).await;
        set_session.set(restored);
    });

    provide_context(Auth {
        session,
        set_session,
    });

    children()
}

/// Hook to access auth state
pub fn use_auth() -> Auth {
    use_context::<Auth>().expect("AuthProvider not found in component tree")
}

impl Auth {
    fn update(&self, f: impl FnOnce(&mut SessionStore<BrowserStorage>) -> Session) {
        let mut store = SessionStore::resume(BrowserStorage::Local, self.session.get_untracked());
        self.set_session.set(f(&mut store));
    }

    pub fn is_loading(&self) -> bool {
        self.session.get().loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.get().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session.get().is_admin()
    }

    /// Current token without tracking
    pub fn token(&self) -> Option<String> {
        self.session.get_untracked().token
    }

    pub fn login(&self, response: &LoginResponse, email: &str) {
        self.update(|store| store.login(response, email));
        log::info!("session: logged in as {}", response.role.code());
    }

    pub fn signup(&self, response: &LoginResponse, full_name: &str, email: &str) {
        self.update(|store| store.signup(response, full_name, email));
        log::info!("session: account created");
    }

    pub fn verified(&self, response: &LoginResponse) {
        self.update(|store| store.verified(response));
    }

    pub fn set_profile(&self, profile: Profile) {
        self.update(|store| store.set_profile(profile));
    }

    pub fn logout(&self) {
        self.update(|store| store.logout());
        log::info!("session: logged out");
    }
}

//! Session lifecycle: restore on start, login/signup/verify, logout.
//!
//! [`SessionStore`] owns the persisted part (token and role in durable
//! storage); every command returns a fresh [`Session`] snapshot that the UI
//! puts into its signal.

use async_trait::async_trait;
use contracts::enums::Role;
use contracts::system::auth::LoginResponse;
use contracts::system::users::Profile;

use crate::shared::error::AppError;
use crate::shared::storage::{KeyValueStorage, LEGACY_USER_KEY, ROLE_KEY, TOKEN_KEY};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    /// May lag behind `token` while the profile is being fetched
    pub profile: Option<Profile>,
    /// Profile came from `GET /api/users/me` for the current token
    pub profile_fetched: bool,
    /// True until the startup restore has finished
    pub loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            token: None,
            profile: None,
            profile_fetched: false,
            loading: true,
        }
    }
}

impl Session {
    fn anonymous() -> Self {
        Self {
            token: None,
            profile: None,
            profile_fetched: false,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.role().map(|r| r.is_admin()).unwrap_or(false)
    }

    /// Signed in, but the profile is still a placeholder. Turns false after
    /// one successful fetch whatever the backend returned.
    pub fn needs_profile(&self) -> bool {
        self.is_authenticated() && !self.profile_fetched
    }
}

/// Source of the full profile for a token
#[async_trait(?Send)]
pub trait ProfileSource {
    async fn me(&self, token: &str) -> Result<Profile, AppError>;
}

/// What the startup restore has to do, decided from durable storage alone
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapPlan {
    Anonymous,
    /// Role cached: no request, placeholder profile
    CachedRole { token: String, role: Role },
    FetchProfile { token: String },
}

pub fn plan_bootstrap(storage: &impl KeyValueStorage) -> BootstrapPlan {
    let Some(token) = storage.get(TOKEN_KEY).filter(|t| !t.is_empty()) else {
        return BootstrapPlan::Anonymous;
    };
    match storage.get(ROLE_KEY).as_deref().and_then(Role::from_code) {
        Some(role) => BootstrapPlan::CachedRole { token, role },
        None => BootstrapPlan::FetchProfile { token },
    }
}

pub struct SessionStore<S: KeyValueStorage> {
    storage: S,
    session: Session,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Fresh store in the loading state
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            session: Session::default(),
        }
    }

    /// Store continuing from an existing snapshot
    pub fn resume(storage: S, session: Session) -> Self {
        Self { storage, session }
    }

    pub fn snapshot(&self) -> Session {
        self.session.clone()
    }

    /// One-shot restore: `loading -> authenticated | anonymous`.
    pub async fn bootstrap<P: ProfileSource + ?Sized>(&mut self, profiles: &P) -> Session {
        match plan_bootstrap(&self.storage) {
            BootstrapPlan::Anonymous => {
                self.session = Session::anonymous();
                log::info!("session: anonymous");
            }
            BootstrapPlan::CachedRole { token, role } => {
                self.session = Session {
                    token: Some(token),
                    profile: Some(Profile::placeholder(role, "")),
                    profile_fetched: false,
                    loading: false,
                };
                log::info!("session: restored with cached role {}", role.code());
            }
            BootstrapPlan::FetchProfile { token } => match profiles.me(&token).await {
                Ok(profile) => {
                    self.storage.set(ROLE_KEY, profile.role.code());
                    self.session = Session {
                        token: Some(token),
                        profile: Some(profile),
                        profile_fetched: true,
                        loading: false,
                    };
                    log::info!("session: restored from profile");
                }
                Err(e) => {
                    log::error!("session: profile fetch failed, logging out: {}", e);
                    self.logout();
                }
            },
        }
        self.storage.remove(LEGACY_USER_KEY);
        self.snapshot()
    }

    /// Successful login: token and role persisted, placeholder profile.
    pub fn login(&mut self, response: &LoginResponse, email: &str) -> Session {
        self.signed_in(response, Profile::placeholder(response.role, email))
    }

    /// Successful signup: like login, the name is already known.
    pub fn signup(&mut self, response: &LoginResponse, full_name: &str, email: &str) -> Session {
        let mut profile = Profile::placeholder(response.role, email);
        profile.full_name = full_name.to_string();
        self.signed_in(response, profile)
    }

    /// Token obtained from an e-mail verification link
    pub fn verified(&mut self, response: &LoginResponse) -> Session {
        self.signed_in(response, Profile::placeholder(response.role, ""))
    }

    fn signed_in(&mut self, response: &LoginResponse, profile: Profile) -> Session {
        self.storage.set(TOKEN_KEY, &response.token);
        self.storage.set(ROLE_KEY, response.role.code());
        self.storage.remove(LEGACY_USER_KEY);
        self.session = Session {
            token: Some(response.token.clone()),
            profile: Some(profile),
            profile_fetched: false,
            loading: false,
        };
        self.snapshot()
    }

    /// Replaces the cached profile, e.g. after `GET /api/users/me`.
    pub fn set_profile(&mut self, profile: Profile) -> Session {
        self.storage.set(ROLE_KEY, profile.role.code());
        self.session.profile = Some(profile);
        self.session.profile_fetched = true;
        self.snapshot()
    }

    /// Clears token, profile and role together.
    pub fn logout(&mut self) -> Session {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(ROLE_KEY);
        self.storage.remove(LEGACY_USER_KEY);
        self.session = Session::anonymous();
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use futures::executor::block_on;
    use std::cell::Cell;

    struct FakeProfiles {
        result: Result<Profile, AppError>,
        calls: Cell<usize>,
    }

    impl FakeProfiles {
        fn ok(role: Role) -> Self {
            Self {
                result: Ok(Profile {
                    id: 7,
                    full_name: "Ana Torres".into(),
                    email: "ana@astrafarma.pe".into(),
                    role,
                    ..Default::default()
                }),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                result: Err(AppError::Auth),
                calls: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl ProfileSource for FakeProfiles {
        async fn me(&self, token: &str) -> Result<Profile, AppError> {
            assert_eq!(token, "tok");
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    #[test]
    fn starts_loading() {
        let store = SessionStore::new(MemoryStorage::new());
        assert!(store.snapshot().loading);
    }

    #[test]
    fn no_token_means_anonymous() {
        let storage = MemoryStorage::new();
        let profiles = FakeProfiles::ok(Role::User);
        let s = block_on(SessionStore::new(&storage).bootstrap(&profiles));
        assert!(!s.loading);
        assert!(!s.is_authenticated());
        assert_eq!(profiles.calls.get(), 0);
    }

    #[test]
    fn cached_role_skips_profile_fetch() {
        let storage = MemoryStorage::with(&[(TOKEN_KEY, "tok"), (ROLE_KEY, "ADMIN")]);
        let profiles = FakeProfiles::ok(Role::User);
        let s = block_on(SessionStore::new(&storage).bootstrap(&profiles));
        assert_eq!(profiles.calls.get(), 0);
        assert!(s.is_admin());
        let p = s.profile.as_ref().unwrap();
        assert_eq!((p.id, p.full_name.as_str()), (0, ""));
        assert!(s.needs_profile());
    }

    #[test]
    fn missing_role_fetches_and_caches_it() {
        let storage = MemoryStorage::with(&[(TOKEN_KEY, "tok"), (LEGACY_USER_KEY, "{}")]);
        let profiles = FakeProfiles::ok(Role::Admin);
        let s = block_on(SessionStore::new(&storage).bootstrap(&profiles));
        assert_eq!(profiles.calls.get(), 1);
        assert_eq!(storage.get(ROLE_KEY).as_deref(), Some("ADMIN"));
        assert_eq!(storage.get(LEGACY_USER_KEY), None);
        assert_eq!(s.profile.unwrap().full_name, "Ana Torres");
    }

    #[test]
    fn failed_fetch_forces_logout() {
        let storage = MemoryStorage::with(&[(TOKEN_KEY, "tok")]);
        let s = block_on(SessionStore::new(&storage).bootstrap(&FakeProfiles::failing()));
        assert!(!s.loading);
        assert_eq!(s.token, None);
        assert_eq!(s.profile, None);
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn login_then_logout_clears_everything() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(&storage);
        let resp = LoginResponse {
            token: "tok".into(),
            role: Role::User,
        };
        let s = store.login(&resp, "ana@astrafarma.pe");
        assert!(s.is_authenticated());
        assert!(!s.is_admin());
        assert_eq!(s.profile.as_ref().unwrap().email, "ana@astrafarma.pe");
        assert_eq!(storage.get(ROLE_KEY).as_deref(), Some("USER"));

        let s = store.logout();
        assert_eq!((s.token, s.profile), (None, None));
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(ROLE_KEY), None);
    }

    #[test]
    fn signup_keeps_full_name() {
        let storage = MemoryStorage::new();
        let resp = LoginResponse {
            token: "tok".into(),
            role: Role::User,
        };
        let s = SessionStore::new(&storage).signup(&resp, "Ana Torres", "ana@x.pe");
        assert_eq!(s.profile.as_ref().unwrap().full_name, "Ana Torres");
        assert!(s.needs_profile());
    }

    #[test]
    fn fetched_profile_without_name_is_not_refetched() {
        let storage = MemoryStorage::with(&[(TOKEN_KEY, "tok"), (ROLE_KEY, "USER")]);
        let mut store = SessionStore::new(&storage);
        let restored = block_on(store.bootstrap(&FakeProfiles::ok(Role::User)));
        assert!(restored.needs_profile());

        let s = store.set_profile(Profile {
            id: 3,
            email: "sin.nombre@gmail.com".into(),
            ..Default::default()
        });
        assert!(s.profile.as_ref().unwrap().full_name.is_empty());
        assert!(!s.needs_profile());

        let mut resumed = SessionStore::resume(&storage, s);
        assert!(!resumed.snapshot().needs_profile());
        let s = resumed.login(
            &LoginResponse {
                token: "tok2".into(),
                role: Role::User,
            },
            "otra@x.pe",
        );
        assert!(s.needs_profile());
    }

    #[test]
    fn profile_fetched_at_startup_is_final() {
        let storage = MemoryStorage::with(&[(TOKEN_KEY, "tok")]);
        let s = block_on(SessionStore::new(&storage).bootstrap(&FakeProfiles::ok(Role::User)));
        assert!(!s.needs_profile());
        assert!(s.profile_fetched);
    }
}

use contracts::enums::Gender;
use contracts::system::users::{Profile, ProfileUpdate, TopCategory};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::global_context::use_global;
use crate::routes::route::{CatalogQuery, Route};
use crate::shared::components::notification::{Notice, Notification};
use crate::shared::date_utils::format_date;
use crate::shared::http::clear_basic_auth;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ConfirmDialog;
use crate::system::auth::context::use_auth;
use crate::system::users::api;

/// Editable copy of the profile fields
#[derive(Clone, Copy)]
struct ProfileForm {
    full_name: RwSignal<String>,
    phone_number: RwSignal<String>,
    gender: RwSignal<Gender>,
    birthday: RwSignal<String>,
}

impl ProfileForm {
    fn new() -> Self {
        Self {
            full_name: RwSignal::new(String::new()),
            phone_number: RwSignal::new(String::new()),
            gender: RwSignal::new(Gender::Other),
            birthday: RwSignal::new(String::new()),
        }
    }

    fn load(&self, p: &Profile) {
        self.full_name.set(p.full_name.clone());
        self.phone_number.set(p.phone_number.clone().unwrap_or_default());
        self.gender.set(p.gender.unwrap_or_default());
        self.birthday.set(p.birthday.clone().unwrap_or_default());
    }

    fn to_update(&self, email: &str) -> ProfileUpdate {
        ProfileUpdate {
            full_name: Some(self.full_name.get_untracked().trim().to_string()),
            email: Some(email.to_string()),
            phone_number: Some(self.phone_number.get_untracked().trim().to_string()),
            gender: Some(self.gender.get_untracked()),
            birthday: Some(self.birthday.get_untracked()),
        }
    }
}

/// "Mi Perfil" page (`/usuario`)
#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let ctx = use_global();

    let profile = Memo::new(move |_| auth.session.get().profile.unwrap_or_default());
    let form = ProfileForm::new();
    let edit_mode = RwSignal::new(false);
    let saving = RwSignal::new(false);
    let confirm_delete = RwSignal::new(false);
    let notice = RwSignal::new(None::<Notice>);
    let (top_categories, set_top_categories) = signal(Vec::<TopCategory>::new());

    form.load(&profile.get_untracked());

    if let Some(token) = auth.token() {
        spawn_local(async move {
            match api::top_categories(&token).await {
                Ok(list) => set_top_categories.set(list),
                Err(e) => log::error!("top categories: {}", e),
            }
        });
    }

    let start_edit = move |_| {
        form.load(&profile.get_untracked());
        notice.set(None);
        edit_mode.set(true);
    };

    let cancel_edit = move |_| {
        form.load(&profile.get_untracked());
        edit_mode.set(false);
    };

    let save = move |_| {
        let Some(token) = auth.token() else {
            return;
        };
        let current = profile.get_untracked();
        let update = form.to_update(&current.email);
        if let Err(msg) = update.validate() {
            notice.set(Some(Notice::error(msg)));
            return;
        }
        saving.set(true);
        notice.set(None);
        spawn_local(async move {
            match api::update_me(&token, &update).await {
                Ok(stored) => {
                    // the backend may answer with a partial profile
                    let refreshed = if stored.is_complete() {
                        stored
                    } else {
                        update.merge_into(&current)
                    };
                    auth.set_profile(refreshed);
                    notice.set(Some(Notice::success("Datos actualizados correctamente")));
                    edit_mode.set(false);
                }
                Err(e) => {
                    log::error!("profile update failed: {}", e);
                    notice.set(Some(Notice::error("Error al actualizar los datos")));
                }
            }
            saving.set(false);
        });
    };

    let delete_account = Callback::new(move |_| {
        let Some(token) = auth.token() else {
            return;
        };
        saving.set(true);
        spawn_local(async move {
            match api::delete_me(&token).await {
                Ok(()) => {
                    confirm_delete.set(false);
                    auth.logout();
                    clear_basic_auth();
                    ctx.navigate(Route::Home);
                }
                Err(e) => {
                    log::error!("account deletion failed: {}", e);
                    confirm_delete.set(false);
                    notice.set(Some(Notice::error(e.user_message())));
                }
            }
            saving.set(false);
        });
    });

    let field = move |label: &'static str, value: Signal<String>| {
        view! {
            <div class="profile-field">
                <label class="form__label">{label}</label>
                <div class="profile-field__value">
                    {move || {
                        let v = value.get();
                        if v.is_empty() { "No disponible".to_string() } else { v }
                    }}
                </div>
            </div>
        }
    };

    view! {
        <div class="profile-page">
            <div class="profile-page__header">
                <div class="profile-avatar">{move || profile.get().initial()}</div>
                <h1>"Mi Perfil"</h1>
                <p>"Gestiona tu información personal y preferencias"</p>
            </div>

            <Notification notice=notice />

            <div class="profile-page__grid">
                <section class="card profile-card">
                    <div class="card__header">
                        <h2>"Información Personal"</h2>
                        <Show when=move || !edit_mode.get()>
                            <Button appearance=ButtonAppearance::Primary on_click=start_edit>
                                {icon("edit")}
                                " Editar datos"
                            </Button>
                        </Show>
                    </div>

                    <Show
                        when=move || edit_mode.get()
                        fallback=move || view! {
                            <div class="profile-fields">
                                {field("Nombre completo", Signal::derive(move || profile.get().full_name))}
                                {field("Correo electrónico", Signal::derive(move || profile.get().email))}
                                {field("Teléfono", Signal::derive(move || profile.get().phone_number.unwrap_or_default()))}
                                {field("Fecha de nacimiento", Signal::derive(move || {
                                    profile.get().birthday.map(|b| format_date(&b)).unwrap_or_default()
                                }))}
                                {field("Género", Signal::derive(move || {
                                    profile.get().gender.unwrap_or_default().label().to_string()
                                }))}
                            </div>
                        }
                    >
                        <div class="profile-fields">
                            <div class="form__group">
                                <label class="form__label">"Nombre completo *"</label>
                                <Input value=form.full_name placeholder="Ingresa tu nombre completo" />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Correo electrónico"</label>
                                <div class="profile-field__value">{move || profile.get().email}</div>
                                <p class="form__hint">"El correo electrónico no se puede modificar"</p>
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Teléfono *"</label>
                                <Input value=form.phone_number placeholder="Ingresa tu teléfono" />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Fecha de nacimiento *"</label>
                                <input
                                    type="date"
                                    class="form__input"
                                    prop:value=move || form.birthday.get()
                                    on:input=move |ev| form.birthday.set(event_target_value(&ev))
                                    disabled=move || saving.get()
                                />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Género"</label>
                                <select
                                    class="form__select"
                                    prop:value=move || form.gender.get().code()
                                    on:change=move |ev| {
                                        if let Some(g) = Gender::from_code(&event_target_value(&ev)) {
                                            form.gender.set(g);
                                        }
                                    }
                                    disabled=move || saving.get()
                                >
                                    {Gender::all().into_iter().map(|g| view! {
                                        <option value=g.code()>{g.label()}</option>
                                    }).collect_view()}
                                </select>
                            </div>
                        </div>
                        <div class="profile-card__actions">
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=save
                                disabled=Signal::derive(move || saving.get())
                            >
                                {move || if saving.get() { "Guardando..." } else { "Guardar cambios" }}
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=cancel_edit
                                disabled=Signal::derive(move || saving.get())
                            >
                                "Cancelar"
                            </Button>
                        </div>
                    </Show>
                </section>

                <aside class="profile-page__side">
                    <section class="card">
                        <h3>"Estado de la cuenta"</h3>
                        <div class="profile-status">
                            <span>"Rol:"</span>
                            <span class="pill">{move || profile.get().role.code()}</span>
                        </div>
                        <div class="profile-status">
                            <span>"Verificado:"</span>
                            {move || if profile.get().verified {
                                view! { <span class="pill pill--success">"Verificado"</span> }
                            } else {
                                view! { <span class="pill pill--warning">"No verificado"</span> }
                            }}
                        </div>
                    </section>

                    <section class="card">
                        <h3>"Tus categorías favoritas"</h3>
                        {move || {
                            let list = top_categories.get();
                            if list.is_empty() {
                                view! { <p class="muted">"Aún no hay compras registradas"</p> }.into_any()
                            } else {
                                view! {
                                    <ul class="top-categories">
                                        {list.into_iter().map(|tc| {
                                            let category = tc.category;
                                            view! {
                                                <li>
                                                    <a
                                                        href="#"
                                                        class=format!("badge {}", category.badge_class())
                                                        on:click=move |ev| {
                                                            ev.prevent_default();
                                                            ctx.navigate(Route::Catalog(CatalogQuery::category(category)));
                                                        }
                                                    >
                                                        {category.label()}
                                                    </a>
                                                    <span class="top-categories__count">{tc.count}</span>
                                                </li>
                                            }
                                        }).collect_view()}
                                    </ul>
                                }.into_any()
                            }
                        }}
                    </section>

                    <section class="card card--danger">
                        <h3>"Control de cuenta"</h3>
                        <p class="muted">
                            "Una vez que elimines tu cuenta, no hay vuelta atrás. Por favor, estate seguro."
                        </p>
                        <button
                            class="button button--danger"
                            disabled=move || saving.get()
                            on:click=move |_| confirm_delete.set(true)
                        >
                            {icon("trash")}
                            " Eliminar cuenta"
                        </button>
                    </section>
                </aside>
            </div>

            <Show when=move || confirm_delete.get()>
                <ConfirmDialog
                    title="Eliminar cuenta"
                    message="¿Estás seguro de que deseas eliminar tu cuenta? Esta acción no se puede deshacer."
                    busy=saving
                    on_confirm=delete_account
                    on_cancel=Callback::new(move |_| confirm_delete.set(false))
                />
            </Show>
        </div>
    }
}

use contracts::enums::Gender;
use contracts::system::auth::SignupRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::global_context::use_global;
use crate::shared::modal_frame::ModalFrame;
use crate::system::auth::{api, context::use_auth};

/// Login / signup dialog opened from the header
#[component]
pub fn LoginModal() -> impl IntoView {
    let ctx = use_global();
    let auth = use_auth();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let full_name = RwSignal::new(String::new());
    let phone_number = RwSignal::new(String::new());
    let gender = RwSignal::new(Gender::Male);
    let birthday = RwSignal::new(String::new());
    let is_register = RwSignal::new(false);
    let error_message = RwSignal::new(None::<String>);
    let is_loading = RwSignal::new(false);

    let close = Callback::new(move |_| {
        if !is_loading.get_untracked() {
            error_message.set(None);
            ctx.login_open.set(false);
        }
    });

    let handle_login = move || {
        let email_val = email.get_untracked();
        let password_val = password.get_untracked();
        is_loading.set(true);
        error_message.set(None);

        spawn_local(async move {
            match api::login(email_val.clone(), password_val).await {
                Ok(response) => {
                    auth.login(&response, &email_val);
                    email.set(String::new());
                    password.set(String::new());
                    ctx.login_open.set(false);
                }
                Err(e) => {
                    log::error!("login failed: {}", e);
                    error_message.set(Some("Credenciales incorrectas o error de servidor".into()));
                }
            }
            is_loading.set(false);
        });
    };

    let handle_register = move || {
        let request = SignupRequest {
            full_name: full_name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            phone_number: phone_number.get_untracked().trim().to_string(),
            gender: gender.get_untracked(),
            birthday: birthday.get_untracked(),
        };
        if let Err(msg) = request.validate() {
            error_message.set(Some(msg.to_string()));
            return;
        }
        is_loading.set(true);
        error_message.set(None);

        spawn_local(async move {
            match api::signup(&request).await {
                Ok(response) => {
                    auth.signup(&response, &request.full_name, &request.email);
                    email.set(String::new());
                    password.set(String::new());
                    ctx.login_open.set(false);
                }
                Err(e) => {
                    log::error!("signup failed: {}", e);
                    error_message.set(Some("Error al registrar usuario".into()));
                }
            }
            is_loading.set(false);
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_register.get_untracked() {
            handle_register();
        } else {
            handle_login();
        }
    };

    view! {
        <ModalFrame
            title=Signal::derive(move || {
                let title = if is_register.get() { "Registrarse" } else { "Iniciar Sesión" };
                title.to_string()
            })
            on_close=close
            close_on_overlay=false
            modal_class="login-modal"
        >
            <form class="login-form" on:submit=on_submit>
                {move || error_message.get().map(|e| view! {
                    <div class="error-message">{e}</div>
                })}

                <button
                    type="button"
                    class="google-button"
                    disabled=move || is_loading.get()
                    on:click=move |_| api::login_with_google()
                >
                    "Ingresa con Google"
                </button>
                <div class="login-form__divider">"o"</div>

                <Show when=move || is_register.get()>
                    <div class="form__group">
                        <label class="form__label">"Nombre completo"</label>
                        <Input value=full_name placeholder="Tu nombre completo" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Teléfono"</label>
                        <Input value=phone_number placeholder="999 999 999" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Género"</label>
                        <select
                            class="form__select"
                            on:change=move |ev| {
                                if let Some(g) = Gender::from_code(&event_target_value(&ev)) {
                                    gender.set(g);
                                }
                            }
                            prop:value=move || gender.get().code()
                        >
                            {[Gender::Male, Gender::Female].into_iter().map(|g| view! {
                                <option value=g.code()>{g.label()}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Fecha de nacimiento"</label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || birthday.get()
                            on:input=move |ev| birthday.set(event_target_value(&ev))
                        />
                    </div>
                </Show>

                <div class="form__group">
                    <label class="form__label">"Correo electrónico"</label>
                    <input
                        type="email"
                        class="form__input"
                        placeholder="tu@correo.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        required
                        disabled=move || is_loading.get()
                    />
                </div>

                <div class="form__group">
                    <label class="form__label">"Contraseña"</label>
                    <div class="password-field">
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            class="form__input"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                        <button
                            type="button"
                            class="password-field__toggle"
                            on:click=move |_| show_password.update(|v| *v = !*v)
                        >
                            {move || if show_password.get() { "Ocultar" } else { "Mostrar" }}
                        </button>
                    </div>
                </div>

                <button type="submit" class="button button--primary" disabled=move || is_loading.get()>
                    {move || match (is_loading.get(), is_register.get()) {
                        (true, _) => "Procesando...",
                        (false, true) => "Registrarse",
                        (false, false) => "Iniciar Sesión",
                    }}
                </button>

                <Button
                    appearance=ButtonAppearance::Transparent
                    on_click=move |_| {
                        is_register.update(|v| *v = !*v);
                        error_message.set(None);
                    }
                >
                    {move || if is_register.get() {
                        "¿Ya tienes cuenta? Inicia sesión"
                    } else {
                        "¿No tienes cuenta? Regístrate"
                    }}
                </Button>
            </form>
        </ModalFrame>
    }
}

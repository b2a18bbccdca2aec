use contracts::system::navigation::Locale;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::settings::use_ui_settings;
use crate::system::auth::{api, context};

struct LoginTexts {
    heading: &'static str,
    username: &'static str,
    password: &'static str,
    submit: &'static str,
    submitting: &'static str,
    failed: &'static str,
}

fn texts(locale: Locale) -> LoginTexts {
    match locale {
        Locale::En => LoginTexts {
            heading: "Sign in",
            username: "Username",
            password: "Password",
            submit: "Sign in",
            submitting: "Signing in...",
            failed: "Login failed",
        },
        Locale::Ru => LoginTexts {
            heading: "Вход в систему",
            username: "Логин",
            password: "Пароль",
            submit: "Войти",
            submitting: "Вход...",
            failed: "Не удалось войти",
        },
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error_message, set_error_message) = create_signal(Option::<String>::None);
    let (is_loading, set_is_loading) = create_signal(false);

    let (_, set_auth_state) = context::use_auth();
    let ui = use_ui_settings();
    let t = move || texts(ui.locale());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            match api::login(username_val, password_val).await {
                Ok(response) => context::apply_login(set_auth_state, response),
                Err(e) => {
                    log::warn!("{}", e);
                    set_error_message.set(Some(format!("{}: {}", t().failed, e)));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Back Office"</h1>
                <h2>{move || t().heading}</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">{move || t().username}</label>
                        <input
                            type="text"
                            id="username"
                            value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{move || t().password}</label>
                        <input
                            type="password"
                            id="password"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { t().submitting } else { t().submit }}
                    </button>
                </form>

                <div class="login-locale">
                    {Locale::ALL.iter().map(|&locale| view! {
                        <button
                            type="button"
                            class="login-locale__btn"
                            class:login-locale__btn--active=move || ui.locale() == locale
                            on:click=move |_| ui.set_locale(locale)
                        >
                            {locale.as_str()}
                        </button>
                    }).collect_view()}
                </div>
            </div>
        </div>
    }
}

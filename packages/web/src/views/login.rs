//! Login page view.

use api::{ApiError, AuthClient};
use dioxus::prelude::*;
use session::CredentialStore;

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_context::<AuthClient>();
    let credentials = use_context::<CredentialStore>();
    let nav = use_navigator();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let mut username_error = use_signal(|| false);
    let mut password_error = use_signal(|| false);

    // If already signed in, skip the form
    if credentials.is_admitted() {
        nav.replace(Route::Leaves {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let auth = auth.clone();
        spawn(async move {
            error.set(None);
            username_error.set(false);
            password_error.set(false);

            let u = username().trim().to_string();
            let p = password();
            if u.is_empty() || p.is_empty() {
                username_error.set(u.is_empty());
                password_error.set(p.is_empty());
                return;
            }

            loading.set(true);
            match auth.login(&u, &p).await {
                Ok(_) => {
                    nav.replace(Route::Leaves {});
                }
                Err(err) => {
                    loading.set(false);
                    match err {
                        // a 401 on the login call itself means the
                        // credentials were wrong, not that a session ended
                        ApiError::SessionExpired => {
                            username_error.set(true);
                            password_error.set(true);
                            error.set(Some("Invalid username or password.".to_string()));
                        }
                        ApiError::Operation { message, .. } => {
                            let lowered = message.to_lowercase();
                            if lowered.contains("user not found") {
                                username_error.set(true);
                                error.set(Some(
                                    "User not found. Please check your username.".to_string(),
                                ));
                            } else if lowered.contains("invalid username or password") {
                                username_error.set(true);
                                password_error.set(true);
                                error.set(Some("Invalid username or password.".to_string()));
                            } else if message.is_empty() {
                                error.set(Some("Login failed. Please try again.".to_string()));
                            } else {
                                error.set(Some(message));
                            }
                        }
                        other => {
                            tracing::error!("login failed: {other}");
                            error.set(Some(other.to_string()));
                        }
                    }
                }
            }
        });
    };

    let username_class = if username_error() { "input input--error" } else { "input" };
    let password_class = if password_error() { "input input--error" } else { "input" };
    let submit_label = if loading() { "Signing in..." } else { "Login" };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-card__title", "Leave Request Login" }

                if let Some(message) = error() {
                    div { class: "form-alert", "{message}" }
                }

                form {
                    novalidate: true,
                    onsubmit: handle_login,

                    div {
                        class: "form-field",
                        label { r#for: "login-username", "Username" }
                        input {
                            id: "login-username",
                            class: "{username_class}",
                            r#type: "text",
                            value: "{username}",
                            oninput: move |evt: FormEvent| username.set(evt.value()),
                        }
                        if username_error() {
                            p { class: "field-error", "Username is required" }
                        }
                    }

                    div {
                        class: "form-field",
                        label { r#for: "login-password", "Password" }
                        input {
                            id: "login-password",
                            class: "{password_class}",
                            r#type: "password",
                            value: "{password}",
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                        if password_error() {
                            p { class: "field-error", "Password is required" }
                        }
                    }

                    button {
                        class: "btn btn--primary btn--full",
                        r#type: "submit",
                        disabled: loading(),
                        "{submit_label}"
                    }
                }

                p {
                    class: "auth-card__footer",
                    "Don't have an account? "
                    Link { to: Route::SignUp {}, "Register" }
                }
            }
        }
    }
}

//! Registration page view.

use api::{ApiError, AuthClient, SignupOutcome};
use dioxus::prelude::*;
use ui::{push_notice, use_notices, NoticeLevel};

use crate::Route;

/// Sign-up page component.
#[component]
pub fn SignUp() -> Element {
    let auth = use_context::<AuthClient>();
    let notices = use_notices();
    let nav = use_navigator();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);
    let mut username_error = use_signal(|| false);
    let mut password_error = use_signal(|| false);

    let handle_signup = move |evt: FormEvent| {
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
            match auth.signup(&u, &p).await {
                Ok(SignupOutcome::Admitted) => {
                    nav.replace(Route::Leaves {});
                }
                Ok(SignupOutcome::LoginRequired) => {
                    let mut notices = notices;
                    push_notice(
                        &mut notices,
                        NoticeLevel::Success,
                        "Account created. Please sign in.",
                    );
                    nav.replace(Route::Login {});
                }
                Err(err) => {
                    loading.set(false);
                    match err {
                        ApiError::Operation { message, .. } if !message.is_empty() => {
                            error.set(Some(message));
                        }
                        other => {
                            tracing::error!("signup failed: {other}");
                            error.set(Some("Sign up failed".to_string()));
                        }
                    }
                }
            }
        });
    };

    let username_class = if username_error() { "input input--error" } else { "input" };
    let password_class = if password_error() { "input input--error" } else { "input" };
    let submit_label = if loading() { "Signing up..." } else { "Sign Up" };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-card__title", "Sign Up" }

                if let Some(message) = error() {
                    div { class: "form-alert", "{message}" }
                }

                form {
                    novalidate: true,
                    onsubmit: handle_signup,

                    div {
                        class: "form-field",
                        label { r#for: "signup-username", "Username" }
                        input {
                            id: "signup-username",
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
                        label { r#for: "signup-password", "Password" }
                        input {
                            id: "signup-password",
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
                    "Already have an account? "
                    Link { to: Route::Login {}, "Login" }
                }
            }
        }
    }
}

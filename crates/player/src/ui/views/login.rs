//! Login screen.

use dioxus::prelude::*;

use crate::state::{use_app, use_session, Screen};
use crate::ui::components::{ErrorBanner, FormField};

#[component]
pub fn LoginView() -> Element {
    let app = use_app();
    let mut session = use_session();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_message = use_signal(|| Option::<String>::None);
    let mut is_busy = use_signal(|| false);

    let handle_login = move |e: FormEvent| {
        e.prevent_default();
        let app = app.clone();
        let username_value = username.read().clone();
        let password_value = password.read().clone();

        is_busy.set(true);
        error_message.set(None);

        spawn(async move {
            match app
                .use_cases
                .auth
                .login(&username_value, &password_value)
                .await
            {
                Ok(user) => {
                    password.set(String::new());
                    session.sign_in(user);
                }
                Err(e) => error_message.set(Some(e.user_message())),
            }
            is_busy.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-screen",
            form {
                class: "card auth-card",
                onsubmit: handle_login,
                h1 { "Tavernkeep" }
                p { class: "muted", "Sign in to manage your characters." }

                ErrorBanner { message: error_message.read().clone() }

                FormField {
                    label: "Username",
                    input {
                        r#type: "text",
                        value: "{username}",
                        autofocus: true,
                        oninput: move |e| username.set(e.value()),
                    }
                }
                FormField {
                    label: "Password",
                    input {
                        r#type: "password",
                        value: "{password}",
                        oninput: move |e| password.set(e.value()),
                    }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: *is_busy.read(),
                    if *is_busy.read() { "Signing in..." } else { "Log in" }
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| session.navigate(Screen::Register),
                    "Create an account"
                }
            }
        }
    }
}

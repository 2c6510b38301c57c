//! Registration screen.

use dioxus::prelude::*;

use crate::state::{use_app, use_session, Screen};
use crate::ui::components::{ErrorBanner, FormField};

#[component]
pub fn RegisterView() -> Element {
    let app = use_app();
    let mut session = use_session();

    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut repeat_password = use_signal(String::new);
    let mut error_message = use_signal(|| Option::<String>::None);
    let mut is_busy = use_signal(|| false);

    let handle_register = move |e: FormEvent| {
        e.prevent_default();
        let app = app.clone();
        let username_value = username.read().clone();
        let email_value = email.read().clone();
        let password_value = password.read().clone();
        let repeat_value = repeat_password.read().clone();

        is_busy.set(true);
        error_message.set(None);

        spawn(async move {
            match app
                .use_cases
                .auth
                .register(&username_value, &password_value, &repeat_value, &email_value)
                .await
            {
                Ok(user) => session.sign_in(user),
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
                onsubmit: handle_register,
                h1 { "Create account" }

                ErrorBanner { message: error_message.read().clone() }

                FormField {
                    label: "Username",
                    input {
                        r#type: "text",
                        value: "{username}",
                        oninput: move |e| username.set(e.value()),
                    }
                }
                FormField {
                    label: "Email",
                    input {
                        r#type: "email",
                        value: "{email}",
                        oninput: move |e| email.set(e.value()),
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
                FormField {
                    label: "Repeat password",
                    input {
                        r#type: "password",
                        value: "{repeat_password}",
                        oninput: move |e| repeat_password.set(e.value()),
                    }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: *is_busy.read(),
                    "Register"
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| session.navigate(Screen::Login),
                    "Back to login"
                }
            }
        }
    }
}

use dioxus::prelude::*;

use crate::state::{use_session, Screen};

/// Top bar with back navigation, the signed-in user and logout.
#[component]
pub fn NavBar(title: String) -> Element {
    let mut session = use_session();
    let username = session
        .user
        .read()
        .as_ref()
        .map(|u| u.username.to_string())
        .unwrap_or_default();
    let at_menu = *session.screen.read() == Screen::Menu;

    rsx! {
        header {
            class: "nav-bar",
            if !at_menu {
                button {
                    class: "btn btn-link",
                    onclick: move |_| session.back(),
                    "← Back"
                }
            }
            h1 { "{title}" }
            div {
                class: "nav-user",
                span { "{username}" }
                button {
                    class: "btn btn-small",
                    onclick: move |_| session.sign_out(),
                    "Log out"
                }
            }
        }
    }
}

use dioxus::prelude::*;
use tavernkeep_domain::User;

use crate::state::{use_session, Screen};

#[component]
pub fn MainMenu(user: User) -> Element {
    let mut session = use_session();

    rsx! {
        div {
            class: "menu",
            p { class: "muted", "Welcome back, {user.username}." }
            button {
                class: "btn btn-primary menu-item",
                onclick: move |_| session.navigate(Screen::CreateCharacter),
                "Create character"
            }
            button {
                class: "btn menu-item",
                onclick: move |_| session.navigate(Screen::Characters),
                "My characters"
            }
            button {
                class: "btn menu-item",
                onclick: move |_| session.navigate(Screen::Dice),
                "Dice roller"
            }
            if user.is_admin {
                button {
                    class: "btn menu-item",
                    onclick: move |_| session.navigate(Screen::Admin),
                    "Admin panel"
                }
            }
            button {
                class: "btn btn-link menu-item",
                onclick: move |_| session.sign_out(),
                "Log out"
            }
        }
    }
}

use std::sync::Arc;

use dioxus::prelude::*;
use tavernkeep_engine::{App, AppConfig};

use crate::state::{use_session, view_for, AppHandle, Screen, SessionState, View};

pub mod components;
pub mod views;

use views::{
    AdminPanel, AdminUserView, CharacterCreation, CharacterList, CharacterSheetView, DiceRoller,
    LoginView, MainMenu, RegisterView,
};

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    // Provided by the composition root (see `crates/player/src/main.rs`).
    let config = use_context::<AppConfig>();

    // Opening the pool needs the runtime the UI drives, so it happens here.
    let engine = use_resource(move || {
        let config = config.clone();
        async move {
            App::new(config)
                .await
                .map(|app| AppHandle(Arc::new(app)))
                .map_err(|e| {
                    tracing::error!(error = %e, "Failed to open the character database");
                    e.to_string()
                })
        }
    });

    let state = engine.read().clone();
    rsx! {
        match state {
            None => rsx! {
                div { class: "splash", p { "Opening the tavern..." } }
            },
            Some(Err(message)) => rsx! {
                div {
                    class: "splash",
                    h1 { "Tavernkeep could not start" }
                    p { class: "error-banner", "{message}" }
                }
            },
            Some(Ok(handle)) => rsx! {
                Shell { app: handle }
            },
        }
    }
}

#[component]
fn Shell(app: AppHandle) -> Element {
    // These must be created inside an active Dioxus runtime.
    use_context_provider(|| app.clone());
    use_context_provider(SessionState::new);

    let session = use_session();
    let view = view_for(*session.screen.read(), session.current_user());
    let screen = view.screen();

    let body = match view {
        View::Login => rsx! { LoginView {} },
        View::Register => rsx! { RegisterView {} },
        View::Menu(user) => rsx! { MainMenu { user } },
        View::CreateCharacter(user) => rsx! { CharacterCreation { user } },
        View::Characters(user) => rsx! { CharacterList { user } },
        View::Sheet(user, id) => rsx! {
            CharacterSheetView { key: "{id}", user, character_id: id }
        },
        View::Dice => rsx! { DiceRoller {} },
        View::Admin(user) => rsx! { AdminPanel { user } },
        View::AdminUser(user, target) => rsx! {
            AdminUserView { key: "{target}", user, target }
        },
    };

    let title = screen_title(screen);

    rsx! {
        div {
            class: "app-shell",
            if screen.is_public() {
                {body}
            } else {
                components::NavBar { title }
                main { class: "content", {body} }
            }
        }
    }
}

fn screen_title(screen: Screen) -> String {
    match screen {
        Screen::Login | Screen::Register => "Tavernkeep",
        Screen::Menu => "Main menu",
        Screen::CreateCharacter => "New character",
        Screen::Characters => "My characters",
        Screen::Sheet(_) => "Character sheet",
        Screen::Dice => "Dice roller",
        Screen::Admin => "Admin panel",
        Screen::AdminUser(_) => "User characters",
    }
    .to_string()
}

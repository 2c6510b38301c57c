//! The signed-in user's characters.

use dioxus::prelude::*;
use tavernkeep_domain::{Character, CharacterId, User};

use crate::state::{use_app, use_session, Screen};
use crate::ui::components::ErrorBanner;

#[component]
pub fn CharacterList(user: User) -> Element {
    let app = use_app();
    let mut session = use_session();

    let mut characters = use_signal(Vec::<Character>::new);
    let mut is_loading = use_signal(|| true);
    let mut error_message = use_signal(|| Option::<String>::None);

    let app_for_load = app.clone();
    let user_for_load = user.clone();
    use_effect(move || {
        let app = app_for_load.clone();
        let user = user_for_load.clone();
        spawn(async move {
            match app.use_cases.characters.list(&user).await {
                Ok(list) => characters.set(list),
                Err(e) => error_message.set(Some(e.user_message())),
            }
            is_loading.set(false);
        });
    });

    let handle_delete = move |id: CharacterId| {
        let app = app.clone();
        let user = user.clone();
        error_message.set(None);
        spawn(async move {
            match app.use_cases.characters.delete(&user, id).await {
                Ok(()) => characters.write().retain(|c| c.id != id),
                Err(e) => error_message.set(Some(e.user_message())),
            }
        });
    };

    let rows = characters.read().clone();

    rsx! {
        div {
            class: "character-list",
            ErrorBanner { message: error_message.read().clone() }

            if *is_loading.read() {
                p { class: "muted", "Loading characters..." }
            } else if rows.is_empty() {
                div {
                    class: "empty-state",
                    p { "You have no characters yet." }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| session.navigate(Screen::CreateCharacter),
                        "Create one"
                    }
                }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Race" }
                            th { "Classes" }
                            th { "Level" }
                            th {}
                        }
                    }
                    tbody {
                        for character in rows {
                            CharacterRow {
                                key: "{character.id}",
                                character: character.clone(),
                                on_open: move |id| session.navigate(Screen::Sheet(id)),
                                on_delete: handle_delete.clone(),
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct CharacterRowProps {
    character: Character,
    on_open: EventHandler<CharacterId>,
    on_delete: EventHandler<CharacterId>,
}

#[component]
fn CharacterRow(props: CharacterRowProps) -> Element {
    let mut confirming = use_signal(|| false);
    let id = props.character.id;
    let name = props.character.name().to_string();
    let race = props.character.details.race.clone();
    let classes = props.character.class_summary();
    let level = props.character.total_level();

    rsx! {
        tr {
            td { "{name}" }
            td { "{race}" }
            td { "{classes}" }
            td { "{level}" }
            td {
                class: "row-actions",
                button {
                    class: "btn btn-small",
                    onclick: move |_| props.on_open.call(id),
                    "Open"
                }
                if *confirming.read() {
                    button {
                        class: "btn btn-small btn-danger",
                        onclick: move |_| {
                            confirming.set(false);
                            props.on_delete.call(id);
                        },
                        "Confirm delete"
                    }
                    button {
                        class: "btn btn-small",
                        onclick: move |_| confirming.set(false),
                        "Cancel"
                    }
                } else {
                    button {
                        class: "btn btn-small btn-danger",
                        onclick: move |_| confirming.set(true),
                        "Delete"
                    }
                }
            }
        }
    }
}

//! Admin panel - account management and other users' characters.

use dioxus::prelude::*;
use tavernkeep_domain::{Character, CharacterId, User, UserId};

use crate::state::{use_app, use_session, Screen};
use crate::ui::components::ErrorBanner;

#[component]
pub fn AdminPanel(user: User) -> Element {
    let app = use_app();
    let mut session = use_session();

    let mut users = use_signal(Vec::<User>::new);
    let mut is_loading = use_signal(|| true);
    let mut error_message = use_signal(|| Option::<String>::None);

    let app_for_load = app.clone();
    let actor_for_load = user.clone();
    use_effect(move || {
        let app = app_for_load.clone();
        let actor = actor_for_load.clone();
        spawn(async move {
            match app.use_cases.admin.list_users(&actor).await {
                Ok(list) => users.set(list),
                Err(e) => error_message.set(Some(e.user_message())),
            }
            is_loading.set(false);
        });
    });

    let app_for_flag = app.clone();
    let actor_for_flag = user.clone();
    let toggle_admin = use_callback(move |(id, is_admin): (UserId, bool)| {
        let app = app_for_flag.clone();
        let actor = actor_for_flag.clone();
        error_message.set(None);
        spawn(async move {
            match app.use_cases.admin.set_admin(&actor, id, is_admin).await {
                Ok(()) => {
                    if let Some(u) = users.write().iter_mut().find(|u| u.id == id) {
                        u.is_admin = is_admin;
                    }
                }
                Err(e) => error_message.set(Some(e.user_message())),
            }
        });
    });

    let app_for_remove = app.clone();
    let actor_for_remove = user.clone();
    let remove_user = use_callback(move |id: UserId| {
        let app = app_for_remove.clone();
        let actor = actor_for_remove.clone();
        error_message.set(None);
        spawn(async move {
            match app.use_cases.admin.remove_user(&actor, id).await {
                Ok(()) => users.write().retain(|u| u.id != id),
                Err(e) => error_message.set(Some(e.user_message())),
            }
        });
    });

    let rows = users.read().clone();
    let actor_id = user.id;

    rsx! {
        div {
            class: "admin-panel",
            ErrorBanner { message: error_message.read().clone() }

            if *is_loading.read() {
                p { class: "muted", "Loading users..." }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Username" }
                            th { "Email" }
                            th { "Admin" }
                            th {}
                        }
                    }
                    tbody {
                        for account in rows {
                            tr {
                                key: "{account.id}",
                                td { "{account.username}" }
                                td { "{account.email}" }
                                td {
                                    input {
                                        r#type: "checkbox",
                                        checked: account.is_admin,
                                        disabled: account.id == actor_id,
                                        onchange: move |_| toggle_admin.call((account.id, !account.is_admin)),
                                    }
                                }
                                td {
                                    class: "row-actions",
                                    button {
                                        class: "btn btn-small",
                                        onclick: move |_| session.navigate(Screen::AdminUser(account.id)),
                                        "Characters"
                                    }
                                    if account.id != actor_id {
                                        button {
                                            class: "btn btn-small btn-danger",
                                            onclick: move |_| remove_user.call(account.id),
                                            "Delete user"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct AdminUserViewProps {
    pub user: User,
    pub target: UserId,
}

/// Characters owned by one account, as seen by an admin.
#[component]
pub fn AdminUserView(props: AdminUserViewProps) -> Element {
    let app = use_app();
    let mut session = use_session();
    let target = props.target;

    let mut characters = use_signal(Vec::<Character>::new);
    let mut is_loading = use_signal(|| true);
    let mut error_message = use_signal(|| Option::<String>::None);

    let app_for_load = app.clone();
    let actor_for_load = props.user.clone();
    use_effect(move || {
        let app = app_for_load.clone();
        let actor = actor_for_load.clone();
        spawn(async move {
            match app.use_cases.admin.user_characters(&actor, target).await {
                Ok(list) => characters.set(list),
                Err(e) => error_message.set(Some(e.user_message())),
            }
            is_loading.set(false);
        });
    });

    let app_for_delete = app.clone();
    let actor_for_delete = props.user.clone();
    let delete_character = use_callback(move |id: CharacterId| {
        let app = app_for_delete.clone();
        let actor = actor_for_delete.clone();
        error_message.set(None);
        spawn(async move {
            match app.use_cases.characters.delete(&actor, id).await {
                Ok(()) => characters.write().retain(|c| c.id != id),
                Err(e) => error_message.set(Some(e.user_message())),
            }
        });
    });

    let rows = characters.read().clone();

    rsx! {
        div {
            class: "admin-user",
            ErrorBanner { message: error_message.read().clone() }

            if *is_loading.read() {
                p { class: "muted", "Loading characters..." }
            } else if rows.is_empty() {
                p { class: "muted", "This user has no characters." }
            } else {
                table {
                    class: "table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Race" }
                            th { "Classes" }
                            th {}
                        }
                    }
                    tbody {
                        for character in rows {
                            tr {
                                key: "{character.id}",
                                td { "{character.name()}" }
                                td { "{character.details.race}" }
                                td { "{character.class_summary()}" }
                                td {
                                    class: "row-actions",
                                    button {
                                        class: "btn btn-small",
                                        onclick: move |_| session.navigate(Screen::Sheet(character.id)),
                                        "Open"
                                    }
                                    button {
                                        class: "btn btn-small btn-danger",
                                        onclick: move |_| delete_character.call(character.id),
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

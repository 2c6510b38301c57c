//! Character sheet - derived statistics with hit point, armor and roll controls.

use dioxus::prelude::*;
use tavernkeep_domain::catalog::{ArmorCategory, MAX_SHIELD_BONUS};
use tavernkeep_domain::{Ability, ArmorSelection, CharacterId, CharacterSheet, User};

use crate::state::{use_app, DiceLog};
use crate::ui::components::{DiceLogPanel, ErrorBanner, FormField};

/// What a click on the sheet rolls.
#[derive(Debug, Clone, PartialEq)]
enum SheetRoll {
    Skill(String),
    Ability(Ability),
    Save(Ability),
}

#[derive(Props, Clone, PartialEq)]
pub struct CharacterSheetViewProps {
    pub user: User,
    pub character_id: CharacterId,
}

#[component]
pub fn CharacterSheetView(props: CharacterSheetViewProps) -> Element {
    let app = use_app();
    let character_id = props.character_id;

    // State hooks at component root
    let mut sheet = use_signal(|| Option::<CharacterSheet>::None);
    let mut error_message = use_signal(|| Option::<String>::None);
    let mut is_loading = use_signal(|| true);
    let mut log = use_signal(DiceLog::new);
    let mut armor_category = use_signal(ArmorCategory::default);
    let mut armor_name = use_signal(String::new);
    let mut shield_bonus = use_signal(|| 0i32);

    let app_for_load = app.clone();
    let user_for_load = props.user.clone();
    use_effect(move || {
        let app = app_for_load.clone();
        let user = user_for_load.clone();
        spawn(async move {
            match app.use_cases.characters.get(&user, character_id).await {
                Ok(character) => {
                    let armor = &character.details.armor;
                    armor_category.set(armor.category);
                    armor_name.set(armor.armor_name.clone().unwrap_or_default());
                    shield_bonus.set(armor.shield_bonus);
                    sheet.set(Some(CharacterSheet::derive(&character.details)));
                }
                Err(e) => error_message.set(Some(e.user_message())),
            }
            is_loading.set(false);
        });
    });

    let app_for_hp = app.clone();
    let user_for_hp = props.user.clone();
    let adjust_hp = use_callback(move |delta: i32| {
        let app = app_for_hp.clone();
        let user = user_for_hp.clone();
        spawn(async move {
            match app
                .use_cases
                .characters
                .update_hit_points(&user, character_id, delta)
                .await
            {
                Ok(updated) => sheet.set(Some(updated)),
                Err(e) => error_message.set(Some(e.user_message())),
            }
        });
    });

    let app_for_armor = app.clone();
    let user_for_armor = props.user.clone();
    let apply_armor = move |_| {
        let app = app_for_armor.clone();
        let user = user_for_armor.clone();
        let category = *armor_category.read();
        let name = armor_name.read().trim().to_string();
        let selection = ArmorSelection::new(
            category,
            (category != ArmorCategory::NoArmor && !name.is_empty()).then_some(name),
            *shield_bonus.read(),
        );
        error_message.set(None);
        spawn(async move {
            match app
                .use_cases
                .characters
                .update_armor(&user, character_id, &selection)
                .await
            {
                Ok(updated) => sheet.set(Some(updated)),
                Err(e) => error_message.set(Some(e.user_message())),
            }
        });
    };

    let app_for_roll = app.clone();
    let roll = use_callback(move |what: SheetRoll| {
        let Some(current) = sheet.read().clone() else {
            return;
        };
        let dice = &app_for_roll.use_cases.dice;
        let (label, result) = match what {
            SheetRoll::Skill(name) => match dice.skill_check(&current, &name) {
                Ok(result) => (format!("{} check", name), result),
                Err(e) => {
                    error_message.set(Some(e.to_string()));
                    return;
                }
            },
            SheetRoll::Ability(ability) => (
                format!("{} check", ability.name()),
                dice.ability_check(&current, ability),
            ),
            SheetRoll::Save(ability) => (
                format!("{} save", ability.name()),
                dice.saving_throw(&current, ability),
            ),
        };
        log.write().push(label, result);
    });

    if *is_loading.read() {
        return rsx! {
            p { class: "muted", "Loading character..." }
        };
    }

    let Some(current) = sheet.read().clone() else {
        return rsx! {
            ErrorBanner { message: error_message.read().clone() }
        };
    };

    let armor_options = app.use_cases.catalog.armor_options(*armor_category.read());
    let hp_class = if current.current_hp == 0 {
        "hp-value hp-down"
    } else if current.current_hp < current.max_hp {
        "hp-value hp-hurt"
    } else {
        "hp-value"
    };

    rsx! {
        div {
            class: "sheet",
            ErrorBanner { message: error_message.read().clone() }

            header {
                class: "sheet-header card",
                h2 { "{current.name}" }
                p { "{current.race} · {current.background}" }
                p { class: "muted", "{current.class_summary} (level {current.total_level})" }
            }

            div {
                class: "stat-row",
                StatBox { label: "Proficiency", value: current.proficiency_label() }
                StatBox { label: "Armor Class", value: current.armor_class.to_string() }
                StatBox { label: "Initiative", value: current.initiative_label() }
                StatBox { label: "Speed", value: format!("{} ft", current.speed) }
                StatBox { label: "Passive Perception", value: current.passive_perception.to_string() }
                div {
                    class: "stat-box hp-box",
                    span { class: "stat-label", "Hit Points" }
                    div {
                        class: "hp-controls",
                        button {
                            class: "btn btn-small",
                            title: "Take 1 damage",
                            disabled: current.current_hp == 0,
                            onclick: move |_| adjust_hp.call(-1),
                            "▼"
                        }
                        span { class: "{hp_class}", "{current.current_hp} / {current.max_hp}" }
                        button {
                            class: "btn btn-small",
                            title: "Heal 1",
                            disabled: current.current_hp >= current.max_hp,
                            onclick: move |_| adjust_hp.call(1),
                            "▲"
                        }
                    }
                }
            }

            div {
                class: "sheet-columns",

                section {
                    class: "card abilities",
                    h3 { "Abilities" }
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Ability" }
                                th { "Score" }
                                th { "Mod" }
                                th { "Save" }
                            }
                        }
                        tbody {
                            for line in current.abilities.iter().cloned() {
                                tr {
                                    key: "{line.ability.abbreviation()}",
                                    td { "{line.ability.name()}" }
                                    td { "{line.score}" }
                                    td {
                                        button {
                                            class: "btn btn-link",
                                            onclick: move |_| roll.call(SheetRoll::Ability(line.ability)),
                                            "{line.modifier_label()}"
                                        }
                                    }
                                    td {
                                        button {
                                            class: if line.save_proficient { "btn btn-link proficient" } else { "btn btn-link" },
                                            onclick: move |_| roll.call(SheetRoll::Save(line.ability)),
                                            "{line.save_label()}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                section {
                    class: "card skills",
                    h3 { "Skills" }
                    if current.jack_of_all_trades {
                        p { class: "muted", "Jack of All Trades: half proficiency on other skills" }
                    }
                    ul {
                        class: "skill-list",
                        for skill in current.skills.iter().cloned() {
                            li {
                                key: "{skill.name}",
                                button {
                                    class: "btn btn-link skill-roll",
                                    title: "Roll {skill.name}",
                                    onclick: {
                                        let name = skill.name.clone();
                                        move |_| roll.call(SheetRoll::Skill(name.clone()))
                                    },
                                    span { class: "skill-marker", "{skill.proficiency.marker()}" }
                                    span { class: "skill-name", "{skill.name}" }
                                    span { class: "skill-ability muted", "({skill.ability.abbreviation()})" }
                                    span { class: "skill-mod", "{skill.modifier_label()}" }
                                }
                            }
                        }
                    }
                }

                section {
                    class: "card",
                    h3 { "Armor" }
                    FormField {
                        label: "Armor type",
                        select {
                            value: "{armor_category.read().label()}",
                            onchange: move |e| {
                                if let Ok(category) = e.value().parse::<ArmorCategory>() {
                                    armor_category.set(category);
                                    armor_name.set(String::new());
                                }
                            },
                            for category in ArmorCategory::ALL {
                                option {
                                    key: "{category.label()}",
                                    value: "{category.label()}",
                                    selected: category == *armor_category.read(),
                                    "{category.label()}"
                                }
                            }
                        }
                    }
                    if *armor_category.read() != ArmorCategory::NoArmor {
                        FormField {
                            label: "Armor",
                            select {
                                value: "{armor_name}",
                                onchange: move |e| armor_name.set(e.value()),
                                option { value: "", "Choose armor" }
                                for name in armor_options {
                                    option {
                                        key: "{name}",
                                        value: "{name}",
                                        selected: armor_name.read().as_str() == name,
                                        "{name}"
                                    }
                                }
                            }
                        }
                    }
                    FormField {
                        label: "Shield / bonus",
                        input {
                            r#type: "number",
                            min: "0",
                            max: "{MAX_SHIELD_BONUS}",
                            value: "{shield_bonus}",
                            oninput: move |e| {
                                if let Ok(n) = e.value().parse::<i32>() {
                                    shield_bonus.set(n.clamp(0, MAX_SHIELD_BONUS));
                                }
                            },
                        }
                    }
                    button { class: "btn", onclick: apply_armor, "Update armor" }
                }

                section {
                    class: "card",
                    h3 { "Feats" }
                    if current.feats.is_empty() {
                        p { class: "muted", "None" }
                    }
                    ul {
                        for (i, feat) in current.feats.iter().enumerate() {
                            li { key: "{i}", "{feat}" }
                        }
                    }
                    h3 { "Features" }
                    ul {
                        class: "feature-list",
                        for (i, feature) in current.features.iter().enumerate() {
                            li { key: "{i}", "{feature}" }
                        }
                    }
                }
            }

            DiceLogPanel { log }
        }
    }
}

#[component]
fn StatBox(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "stat-box",
            span { class: "stat-label", "{label}" }
            span { class: "stat-value", "{value}" }
        }
    }
}

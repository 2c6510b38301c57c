//! Character creation
//!
//! Name, race, background, class rows, ability scores, skills and feats,
//! with the catalog description of whatever was touched last.

use dioxus::prelude::*;
use tavernkeep_domain::catalog::{class_by_name, skill_by_name, SkillChoices};
use tavernkeep_domain::{format_modifier, Ability, CalculationEngine, Dnd5eRules, User};

use crate::state::{use_app, use_session, CreationForm, Screen};
use crate::ui::components::{DescriptionPanel, ErrorBanner, FormField};

/// Which catalog entry the description panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Race,
    Background,
    Class(String),
    Subclass(String),
    Skill(String),
    Feat(String),
}

#[component]
pub fn CharacterCreation(user: User) -> Element {
    let app = use_app();
    let mut session = use_session();

    let mut form = use_signal(CreationForm::new);
    let mut focus = use_signal(Focus::default);
    let mut error_message = use_signal(|| Option::<String>::None);
    let mut is_saving = use_signal(|| false);

    let catalog = &app.use_cases.catalog;
    let race_options = catalog.race_options();
    let class_options = catalog.class_options();
    let background_options = catalog.background_options();
    let skill_options = catalog.skill_options();
    let feat_options = catalog.feat_options();

    let (focus_title, focus_text) = {
        let draft = form.read().draft().clone();
        match focus.read().clone() {
            Focus::Race => (draft.race.clone(), catalog.race_description(&draft.race)),
            Focus::Background => (
                draft.background.clone(),
                catalog.background_description(&draft.background),
            ),
            Focus::Class(name) => (name.clone(), catalog.class_description(&name)),
            Focus::Subclass(name) => (name.clone(), catalog.subclass_description(&name)),
            Focus::Skill(name) => (name.clone(), catalog.skill_description(&name)),
            Focus::Feat(name) => (name.clone(), catalog.feat_description(&name).to_string()),
        }
    };

    let app_for_roll = app.clone();
    let roll_scores = move |_| {
        let primary = form.read().primary_class().map(str::to_string);
        let scores = app_for_roll.use_cases.dice.roll_stats(primary.as_deref());
        form.write().set_scores(scores);
    };

    let app_for_generate = app.clone();
    let auto_generate = move |_| {
        let name = form.read().draft().name.clone();
        let draft = app_for_generate.use_cases.catalog.auto_generate(&name);
        let first_class = draft.classes.first().map(|c| c.class_name.clone());
        form.set(CreationForm::from_draft(draft));
        focus.set(first_class.map(Focus::Class).unwrap_or_default());
        error_message.set(None);
    };

    let app_for_save = app.clone();
    let handle_create = move |e: FormEvent| {
        e.prevent_default();
        let app = app_for_save.clone();
        let user = user.clone();
        let draft = form.read().to_draft();

        is_saving.set(true);
        error_message.set(None);

        spawn(async move {
            match app.use_cases.characters.create(&user, &draft).await {
                Ok(character) => session.navigate(Screen::Sheet(character.id)),
                Err(e) => error_message.set(Some(e.user_message())),
            }
            is_saving.set(false);
        });
    };

    let current = form.read().clone();
    let draft = current.draft().clone();
    let unused_classes: Vec<&'static str> = class_options
        .iter()
        .copied()
        .filter(|name| !current.classes().iter().any(|c| c.class_name == *name))
        .collect();
    let skill_hint = current
        .primary_class()
        .and_then(class_by_name)
        .map(|class| match class.skill_choices {
            SkillChoices::Any => format!("{}: choose any {} skills", class.name, class.skill_picks),
            SkillChoices::From(list) => format!(
                "{}: choose {} from {}",
                class.name,
                class.skill_picks,
                list.join(", ")
            ),
        });

    rsx! {
        form {
            class: "creation",
            onsubmit: handle_create,

            div {
                class: "creation-toolbar",
                button { class: "btn", r#type: "button", onclick: auto_generate, "Auto-generate" }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: *is_saving.read(),
                    if *is_saving.read() { "Saving..." } else { "Create character" }
                }
            }

            ErrorBanner { message: error_message.read().clone() }

            div {
                class: "creation-columns",

                div {
                    class: "creation-main",

                    section {
                        class: "card",
                        h3 { "Identity" }
                        FormField {
                            label: "Name",
                            input {
                                r#type: "text",
                                value: "{draft.name}",
                                oninput: move |e| form.write().set_name(e.value()),
                            }
                        }
                        FormField {
                            label: "Race",
                            select {
                                onchange: move |e| {
                                    form.write().set_race(e.value());
                                    focus.set(Focus::Race);
                                },
                                option { value: "", selected: draft.race.is_empty(), "Choose a race" }
                                for race in race_options {
                                    option { key: "{race}", value: "{race}", selected: draft.race == race, "{race}" }
                                }
                            }
                        }
                        FormField {
                            label: "Background",
                            select {
                                onchange: move |e| {
                                    form.write().set_background(e.value());
                                    focus.set(Focus::Background);
                                },
                                option { value: "", selected: draft.background.is_empty(), "Choose a background" }
                                for background in background_options {
                                    option {
                                        key: "{background}",
                                        value: "{background}",
                                        selected: draft.background == background,
                                        "{background}"
                                    }
                                }
                            }
                        }
                    }

                    section {
                        class: "card",
                        h3 { "Classes (total level {current.total_level()})" }
                        for (index, row) in current.classes().iter().cloned().enumerate() {
                            ClassRowEditor {
                                key: "{row.class_name}",
                                form,
                                focus,
                                index,
                            }
                        }
                        if !unused_classes.is_empty() && current.remaining_levels() > 0 {
                            FormField {
                                label: "Add class",
                                select {
                                    value: "",
                                    onchange: move |e| {
                                        let name = e.value();
                                        if form.write().add_class(&name) {
                                            focus.set(Focus::Class(name));
                                        }
                                    },
                                    option { value: "", "Choose a class" }
                                    for name in unused_classes {
                                        option { key: "{name}", value: "{name}", "{name}" }
                                    }
                                }
                            }
                        }
                    }

                    section {
                        class: "card",
                        div {
                            class: "section-header",
                            h3 { "Ability scores" }
                            button { class: "btn btn-small", r#type: "button", onclick: roll_scores, "Roll 4d6" }
                        }
                        div {
                            class: "ability-grid",
                            for ability in Ability::ALL {
                                div {
                                    key: "{ability.abbreviation()}",
                                    class: "ability-cell",
                                    span { class: "ability-name", "{ability.abbreviation()}" }
                                    span { class: "ability-score", "{current.score(ability)}" }
                                    span {
                                        class: "ability-mod muted",
                                        "{format_modifier(Dnd5eRules.ability_modifier(current.score(ability)))}"
                                    }
                                    div {
                                        button {
                                            class: "btn btn-small",
                                            r#type: "button",
                                            onclick: move |_| form.write().decrease_score(ability),
                                            "−"
                                        }
                                        button {
                                            class: "btn btn-small",
                                            r#type: "button",
                                            onclick: move |_| form.write().increase_score(ability),
                                            "+"
                                        }
                                    }
                                }
                            }
                        }
                    }

                    section {
                        class: "card",
                        h3 { "Skills" }
                        if let Some(hint) = skill_hint {
                            p { class: "muted", "{hint}" }
                        }
                        table {
                            class: "table skill-table",
                            thead {
                                tr {
                                    th { "Skill" }
                                    th { "Proficient" }
                                    th { "Expertise" }
                                }
                            }
                            tbody {
                                for skill in skill_options {
                                    SkillRowEditor { key: "{skill}", form, focus, skill: skill.to_string() }
                                }
                            }
                        }
                    }

                    section {
                        class: "card",
                        h3 { "Feats ({current.feats().len()} of {current.feat_slots()})" }
                        for (index, feat) in current.feats().iter().cloned().enumerate() {
                            div {
                                key: "{index}",
                                class: "feat-row",
                                select {
                                    onchange: move |e| {
                                        let name = e.value();
                                        form.write().set_feat(index, &name);
                                        focus.set(Focus::Feat(name));
                                    },
                                    option { value: "", selected: feat.is_empty(), "Choose a feat" }
                                    for name in feat_options.iter().copied() {
                                        option { key: "{name}", value: "{name}", selected: feat == name, "{name}" }
                                    }
                                }
                                button {
                                    class: "btn btn-small",
                                    r#type: "button",
                                    onclick: move |_| form.write().remove_feat(index),
                                    "Remove"
                                }
                            }
                        }
                        if current.can_add_feat() {
                            button {
                                class: "btn btn-small",
                                r#type: "button",
                                onclick: move |_| {
                                    form.write().add_feat("");
                                },
                                "Add feat"
                            }
                        } else if current.feat_slots() == 0 {
                            p { class: "muted", "Feats unlock at level 4." }
                        }
                    }
                }

                aside {
                    class: "creation-side",
                    DescriptionPanel { title: focus_title, text: focus_text }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ClassRowEditorProps {
    form: Signal<CreationForm>,
    focus: Signal<Focus>,
    index: usize,
}

#[component]
fn ClassRowEditor(props: ClassRowEditorProps) -> Element {
    let app = use_app();
    let mut form = props.form;
    let mut focus = props.focus;
    let index = props.index;

    let Some(row) = form.read().classes().get(index).cloned() else {
        return rsx! {};
    };
    let unlocked = form.read().subclass_unlocked(index);
    let max_level = row.level + form.read().remaining_levels();
    let subclasses = app.use_cases.catalog.subclass_options(&row.class_name);
    let selected_subclass = row.subclass.clone().unwrap_or_default();
    let class_name = row.class_name.clone();

    rsx! {
        div {
            class: "class-row",
            button {
                class: "btn btn-link class-name",
                r#type: "button",
                onclick: move |_| focus.set(Focus::Class(class_name.clone())),
                "{row.class_name}"
            }
            label {
                "Level "
                input {
                    r#type: "number",
                    min: "1",
                    max: "{max_level}",
                    value: "{row.level}",
                    oninput: move |e| {
                        if let Ok(level) = e.value().parse::<u8>() {
                            form.write().set_level(index, level);
                        }
                    },
                }
            }
            select {
                disabled: !unlocked,
                title: if unlocked { "Subclass" } else { "Subclasses unlock at level 3" },
                onchange: move |e| {
                    let name = e.value();
                    form.write().set_subclass(index, &name);
                    if !name.is_empty() {
                        focus.set(Focus::Subclass(name));
                    }
                },
                option { value: "", selected: selected_subclass.is_empty(), "No subclass" }
                for name in subclasses {
                    option { key: "{name}", value: "{name}", selected: selected_subclass == name, "{name}" }
                }
            }
            button {
                class: "btn btn-small btn-danger",
                r#type: "button",
                onclick: move |_| form.write().remove_class(index),
                "Remove"
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct SkillRowEditorProps {
    form: Signal<CreationForm>,
    focus: Signal<Focus>,
    skill: String,
}

#[component]
fn SkillRowEditor(props: SkillRowEditorProps) -> Element {
    let mut form = props.form;
    let mut focus = props.focus;
    let skill = props.skill.clone();

    let ability = skill_by_name(&skill)
        .map(|s| s.ability.abbreviation())
        .unwrap_or_default();
    let granted = form.read().is_granted(&skill);
    let proficient = form.read().is_proficient(&skill);
    let expertise = form.read().has_expertise(&skill);

    let skill_for_focus = skill.clone();
    let skill_for_toggle = skill.clone();
    let skill_for_expertise = skill.clone();

    rsx! {
        tr {
            td {
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| focus.set(Focus::Skill(skill_for_focus.clone())),
                    "{skill} "
                    span { class: "muted", "({ability})" }
                }
            }
            td {
                input {
                    r#type: "checkbox",
                    checked: proficient,
                    disabled: granted,
                    title: if granted { "Granted by race or background" } else { "" },
                    onchange: move |_| form.write().toggle_skill(&skill_for_toggle),
                }
            }
            td {
                input {
                    r#type: "checkbox",
                    checked: expertise,
                    disabled: !proficient,
                    onchange: move |_| form.write().toggle_expertise(&skill_for_expertise),
                }
            }
        }
    }
}

//! Free-standing dice roller.

use dioxus::prelude::*;
use tavernkeep_domain::value_objects::MAX_DICE_COUNT;
use tavernkeep_engine::use_cases::dice::STANDARD_DICE;

use crate::state::{use_app, DiceLog};
use crate::ui::components::{DiceLogPanel, ErrorBanner, FormField};

#[component]
pub fn DiceRoller() -> Element {
    let app = use_app();

    let mut log = use_signal(DiceLog::new);
    let mut count = use_signal(|| 1u8);
    let mut formula = use_signal(String::new);
    let mut error_message = use_signal(|| Option::<String>::None);

    let app_for_dice = app.clone();
    let roll_die = use_callback(move |sides: u8| {
        let dice_count = *count.read();
        match app_for_dice.use_cases.dice.roll_dice(sides, dice_count) {
            Ok(result) => {
                error_message.set(None);
                log.write().push(format!("{}d{}", dice_count, sides), result);
            }
            Err(e) => error_message.set(Some(e.to_string())),
        }
    });

    let handle_formula = move |e: FormEvent| {
        e.prevent_default();
        let input = formula.read().trim().to_string();
        if input.is_empty() {
            return;
        }
        match app.use_cases.dice.roll(&input) {
            Ok(result) => {
                error_message.set(None);
                log.write().push(input, result);
            }
            Err(e) => error_message.set(Some(e.to_string())),
        }
    };

    let latest = log.read().latest().map(|e| e.line());

    rsx! {
        div {
            class: "dice-roller",
            ErrorBanner { message: error_message.read().clone() }

            div {
                class: "card",
                FormField {
                    label: "Number of dice",
                    input {
                        r#type: "number",
                        min: "1",
                        max: "{MAX_DICE_COUNT}",
                        value: "{count}",
                        oninput: move |e| {
                            if let Ok(n) = e.value().parse::<u8>() {
                                count.set(n.clamp(1, MAX_DICE_COUNT));
                            }
                        },
                    }
                }
                div {
                    class: "dice-buttons",
                    for sides in STANDARD_DICE {
                        button {
                            key: "{sides}",
                            class: "btn die-button",
                            onclick: move |_| roll_die.call(sides),
                            "d{sides}"
                        }
                    }
                }
                form {
                    class: "formula-row",
                    onsubmit: handle_formula,
                    input {
                        r#type: "text",
                        placeholder: "e.g. 2d6+3",
                        value: "{formula}",
                        oninput: move |e| formula.set(e.value()),
                    }
                    button { class: "btn", r#type: "submit", "Roll" }
                }
                if let Some(line) = latest {
                    p { class: "dice-result", "{line}" }
                }
            }

            DiceLogPanel { log, show_total: true }
        }
    }
}

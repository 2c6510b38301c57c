use dioxus::prelude::*;

use crate::state::DiceLog;

#[derive(Props, Clone, PartialEq)]
pub struct DiceLogPanelProps {
    pub log: Signal<DiceLog>,
    /// Show the running total of every logged roll
    #[props(default = false)]
    pub show_total: bool,
}

/// Newest-first list of rolls with a clear button.
#[component]
pub fn DiceLogPanel(props: DiceLogPanelProps) -> Element {
    let mut log = props.log;
    let lines: Vec<String> = log.read().entries().map(|e| e.line()).collect();
    let total = log.read().total();

    rsx! {
        section {
            class: "dice-log",
            div {
                class: "dice-log-header",
                h3 { "Roll log" }
                button {
                    class: "btn btn-small",
                    disabled: lines.is_empty(),
                    onclick: move |_| log.write().clear(),
                    "Clear"
                }
            }
            if props.show_total {
                p { class: "dice-log-total", "Total: {total}" }
            }
            if lines.is_empty() {
                p { class: "muted", "No rolls yet." }
            }
            ul {
                for (i, line) in lines.iter().enumerate() {
                    li { key: "{i}", "{line}" }
                }
            }
        }
    }
}

use dioxus::prelude::*;

/// Inline error message; renders nothing when there is no message.
#[component]
pub fn ErrorBanner(message: Option<String>) -> Element {
    rsx! {
        if let Some(msg) = message {
            div {
                class: "error-banner",
                role: "alert",
                "{msg}"
            }
        }
    }
}

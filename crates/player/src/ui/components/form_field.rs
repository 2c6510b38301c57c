use dioxus::prelude::*;

/// Labelled form row.
#[component]
pub fn FormField(label: String, children: Element) -> Element {
    rsx! {
        label {
            class: "form-field",
            span { class: "form-label", "{label}" }
            {children}
        }
    }
}

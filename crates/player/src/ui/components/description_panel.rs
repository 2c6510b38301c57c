//! Catalog description shown next to the current creation choice.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct DescriptionPanelProps {
    /// Heading, e.g. the selected race name
    pub title: String,
    /// Multi-line description text
    pub text: String,
}

#[component]
pub fn DescriptionPanel(props: DescriptionPanelProps) -> Element {
    rsx! {
        section {
            class: "description-panel",
            h3 { "{props.title}" }
            for (i, line) in props.text.lines().enumerate() {
                p { key: "{i}", "{line}" }
            }
        }
    }
}

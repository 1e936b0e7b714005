//! Full-page notice shown when the dashboard cannot start.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    /// Why the backend could not be used
    pub message: String,
    #[props(default = "The indicator backend is unavailable".to_string())]
    pub title: String,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        section {
            style: "max-width: 560px; margin: 48px auto; padding: 16px 20px; font-family: sans-serif; background: #fff8e1; color: #5d4037; border-left: 4px solid #d66a03; border-radius: 4px;",
            h2 {
                style: "margin: 0 0 8px; font-size: 18px;",
                "{props.title}"
            }
            p {
                style: "margin: 0 0 8px; font-family: monospace; font-size: 13px;",
                "{props.message}"
            }
            p {
                style: "margin: 0; font-size: 13px; color: #795548;",
                "Check that the API server is running and reload the page."
            }
        }
    }
}

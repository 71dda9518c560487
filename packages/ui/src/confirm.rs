use dioxus::prelude::*;

use crate::modal::ModalOverlay;

/// Confirmation step in front of a destructive action (delete, logout).
#[component]
pub fn ConfirmDialog(
    title: String,
    text: String,
    confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_cancel.call(()),
            div {
                class: "confirm-dialog",
                h2 { class: "confirm-dialog__title", "{title}" }
                p { class: "confirm-dialog__text", "{text}" }
                div {
                    class: "confirm-dialog__actions",
                    button {
                        class: "btn btn--danger",
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                    button {
                        class: "btn btn--outline",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}

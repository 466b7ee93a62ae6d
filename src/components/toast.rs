use dioxus::prelude::*;

use crate::state::{ToastKind, ToastSlot};

/// Renders the single active toast, if any. Loading toasts stay until the
/// workflow dismisses them; success and error toasts carry a close button.
#[component]
pub fn ToastOverlay() -> Element {
    let mut slot = use_context::<ToastSlot>();
    let current = slot.read().clone();

    rsx! {
        if let Some(toast) = current {
            div { class: "toast-overlay",
                div { class: toast_class(toast.kind),
                    if toast.kind == ToastKind::Loading {
                        span { class: "spinner" }
                    }
                    span { class: "toast-message", "{toast.message}" }
                    if toast.kind != ToastKind::Loading {
                        button {
                            class: "toast-close",
                            onclick: move |_| slot.set(None),
                            "✕"
                        }
                    }
                }
            }
        }
    }
}

fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Loading => "toast toast-loading",
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
    }
}

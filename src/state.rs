//! Shared reactive state for the bank UI.

use dioxus::prelude::*;

use crate::workflow::Notifier;

/// One transient notification. The app shows at most one at a time; a new
/// toast replaces the current one.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Loading,
    Success,
    Error,
}

/// Shared toast slot, provided as Dioxus context from the app root.
pub type ToastSlot = Signal<Option<Toast>>;

/// [`Notifier`] that writes into the shared toast slot.
#[derive(Clone, Copy)]
pub struct ToastNotifier(pub ToastSlot);

impl ToastNotifier {
    fn show(&self, kind: ToastKind, message: &str) {
        let mut slot = self.0;
        slot.set(Some(Toast {
            kind,
            message: message.to_string(),
        }));
    }
}

impl Notifier for ToastNotifier {
    fn loading(&self, message: &str) {
        self.show(ToastKind::Loading, message);
    }

    fn dismiss(&self) {
        let mut slot = self.0;
        slot.set(None);
    }

    fn success(&self, message: &str) {
        self.show(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.show(ToastKind::Error, message);
    }
}

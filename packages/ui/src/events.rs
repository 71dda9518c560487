//! The session sink wired into the request pipeline.

use api::SessionEvents;
use dioxus::prelude::*;

use crate::notices::{push_notice, NoticeLevel, NoticeLog};

/// Surfaces pipeline-detected session conditions as notices, and sends the
/// user back to the login entry point when the session ends.
#[derive(Clone, Copy)]
pub struct Notifier {
    notices: Signal<NoticeLog>,
}

impl Notifier {
    pub fn new(notices: Signal<NoticeLog>) -> Self {
        Self { notices }
    }
}

impl SessionEvents for Notifier {
    fn session_expired(&self) {
        let mut notices = self.notices;
        push_notice(
            &mut notices,
            NoticeLevel::Warning,
            "Your session has expired. Please sign in again.",
        );
        redirect_to_login();
    }

    fn server_unreachable(&self) {
        let mut notices = self.notices;
        push_notice(
            &mut notices,
            NoticeLevel::Error,
            "Server unreachable. Check your connection and try again.",
        );
    }

    fn role_unresolved(&self) {
        let mut notices = self.notices;
        push_notice(
            &mut notices,
            NoticeLevel::Error,
            "Your account role could not be determined. Contact an administrator.",
        );
    }
}

/// Hard-navigate to the login page.
pub fn redirect_to_login() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::warn!("session ended, returning to login");
    }
}

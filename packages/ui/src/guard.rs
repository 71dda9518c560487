use dioxus::prelude::*;
use session::CredentialStore;

use crate::events::redirect_to_login;

/// Route-level gate around protected views.
///
/// Admission is a presence check only — liveness is deliberately left to
/// the request pipeline, which validates on the next actual call. Failing
/// admission is a normal redirect to login, not an error.
#[component]
pub fn SessionGuard(children: Element) -> Element {
    let credentials = use_context::<CredentialStore>();
    if !credentials.is_admitted() {
        redirect_to_login();
        return rsx! {};
    }
    rsx! {
        {children}
    }
}

use std::sync::Arc;

use api::{AuthClient, ClientConfig, LeaveClient, Pipeline};
use dioxus::prelude::*;
use ui::{make_credential_store, NoticeBanner, NoticeLog, Notifier, RefreshBus};

use views::{Leaves, Login, SignUp};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/signup")]
    SignUp {},
    #[route("/leaves")]
    Leaves {},
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // One session, one pipeline, one bus. Everything is constructed here,
    // once, and handed down through context; nothing below reaches into
    // ambient globals.
    let notices = use_signal(NoticeLog::default);
    use_context_provider(|| notices);

    let (credentials, auth, leaves) = use_hook(|| {
        let config = ClientConfig::new(
            option_env!("LEAVEDESK_API_BASE").unwrap_or("http://localhost:8080"),
        );
        let credentials = make_credential_store(config.role_policy);
        let pipeline = Pipeline::new(
            config.base_url.clone(),
            credentials.clone(),
            Arc::new(Notifier::new(notices)),
        );
        (
            credentials,
            AuthClient::new(pipeline.clone(), &config),
            LeaveClient::new(pipeline),
        )
    });
    use_context_provider(|| credentials);
    use_context_provider(|| auth);
    use_context_provider(|| leaves);
    use_context_provider(RefreshBus::new);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        NoticeBanner {}
        Router::<Route> {}
    }
}

/// Redirect `/` to the leave list; the guard bounces unauthenticated
/// visitors on to login.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Leaves {});
    rsx! {}
}

/// Unknown paths land on the login entry point.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    tracing::debug!("unknown route: /{}", segments.join("/"));
    let nav = use_navigator();
    nav.replace(Route::Login {});
    rsx! {}
}

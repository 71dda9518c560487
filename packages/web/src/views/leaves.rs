//! The protected leave list: role-aware table, dialog-hosted form,
//! bus-driven re-fetch.

use api::{ApiError, AuthClient, LeaveClient, LeaveRequest};
use dioxus::prelude::*;
use session::{CredentialStore, Role};
use ui::{
    push_notice, use_notices, use_refresh, ConfirmDialog, LeaveForm, ModalOverlay, NoticeLevel,
    SessionGuard,
};

use crate::Route;

/// Protected route: the guard admits by token presence only.
#[component]
pub fn Leaves() -> Element {
    rsx! {
        SessionGuard {
            LeaveBoard {}
        }
    }
}

#[component]
fn LeaveBoard() -> Element {
    let credentials = use_context::<CredentialStore>();
    let client = use_context::<LeaveClient>();
    let auth = use_context::<AuthClient>();
    let notices = use_notices();
    let nav = use_navigator();

    let is_admin = credentials.role() == Some(Role::Admin);

    let mut leaves = use_signal(Vec::<LeaveRequest>::new);
    let mut show_form = use_signal(|| false);
    let mut editing = use_signal(|| Option::<LeaveRequest>::None);
    let mut pending_delete = use_signal(|| Option::<i64>::None);
    let mut confirm_logout = use_signal(|| false);

    let fetch = {
        let client = client.clone();
        let credentials = credentials.clone();
        move || {
            let client = client.clone();
            let credentials = credentials.clone();
            spawn(async move {
                match client.list(credentials.role()).await {
                    Ok(list) => leaves.set(list),
                    // the pipeline already cleared the session and redirected
                    Err(ApiError::SessionExpired) => {}
                    Err(err) => {
                        tracing::error!("Failed to fetch leaves: {err}");
                        leaves.set(Vec::new());
                    }
                }
            });
        }
    };

    // initial fetch on mount
    use_effect({
        let mut fetch = fetch.clone();
        move || fetch()
    });

    // the form publishes after create/update; re-fetch and close the dialog
    use_refresh({
        let mut fetch = fetch.clone();
        move || {
            fetch();
            show_form.set(false);
            editing.set(None);
        }
    });

    let handle_edit = move |leave: LeaveRequest| {
        editing.set(Some(leave));
        show_form.set(true);
    };
    let handle_delete_request = move |id: i64| pending_delete.set(Some(id));

    let handle_delete_confirmed = {
        let client = client.clone();
        let fetch = fetch.clone();
        move |_| {
            let Some(id) = pending_delete() else { return };
            pending_delete.set(None);
            let client = client.clone();
            let mut fetch = fetch.clone();
            spawn(async move {
                match client.delete(id).await {
                    Ok(()) => {
                        let mut notices = notices;
                        push_notice(
                            &mut notices,
                            NoticeLevel::Success,
                            "The leave request has been deleted.",
                        );
                        fetch();
                    }
                    Err(ApiError::SessionExpired) => {}
                    Err(err) => {
                        tracing::error!("Failed to delete leave request: {err}");
                        let mut notices = notices;
                        push_notice(
                            &mut notices,
                            NoticeLevel::Error,
                            "There was a problem deleting the leave request.",
                        );
                    }
                }
            });
        }
    };

    let handle_logout_confirmed = {
        let auth = auth.clone();
        move |_| {
            confirm_logout.set(false);
            auth.logout();
            let mut notices = notices;
            push_notice(
                &mut notices,
                NoticeLevel::Success,
                "You have been successfully logged out.",
            );
            nav.replace(Route::Login {});
        }
    };

    rsx! {
        div {
            class: "leave-page",
            div {
                class: "leave-panel",
                div {
                    class: "leave-panel__header",
                    h1 { "Leave Requests" }
                    div {
                        class: "leave-panel__actions",
                        button {
                            class: "btn btn--success",
                            onclick: move |_| {
                                editing.set(None);
                                show_form.set(true);
                            },
                            "+ New Leave"
                        }
                        button {
                            class: "btn btn--danger",
                            onclick: move |_| confirm_logout.set(true),
                            "Logout"
                        }
                    }
                }

                if leaves().is_empty() {
                    p { class: "leave-empty", "No leave requests found." }
                } else {
                    table {
                        class: "leave-table",
                        thead {
                            tr {
                                if is_admin {
                                    th { "User" }
                                }
                                th { "Type" }
                                th { "Start Date" }
                                th { "End Date" }
                                th { "Reason" }
                                th { "Action" }
                            }
                        }
                        tbody {
                            for leave in leaves() {
                                LeaveRow {
                                    key: "{leave.id}",
                                    leave: leave.clone(),
                                    is_admin,
                                    on_edit: handle_edit,
                                    on_delete: handle_delete_request,
                                }
                            }
                        }
                    }
                }
            }
        }

        if show_form() {
            ModalOverlay {
                on_close: move |_| show_form.set(false),
                LeaveForm { editing: editing() }
            }
        }

        if pending_delete().is_some() {
            ConfirmDialog {
                title: "Delete Leave Request?",
                text: "This action cannot be undone. Do you really want to delete this leave request?",
                confirm_label: "Yes, delete it",
                on_confirm: handle_delete_confirmed,
                on_cancel: move |_| pending_delete.set(None),
            }
        }

        if confirm_logout() {
            ConfirmDialog {
                title: "Confirm Logout",
                text: "You are about to log out of your account. Do you want to proceed?",
                confirm_label: "Yes, log me out",
                on_confirm: handle_logout_confirmed,
                on_cancel: move |_| confirm_logout.set(false),
            }
        }
    }
}

#[component]
fn LeaveRow(
    leave: LeaveRequest,
    is_admin: bool,
    on_edit: EventHandler<LeaveRequest>,
    on_delete: EventHandler<i64>,
) -> Element {
    let owner = leave
        .owner
        .as_ref()
        .map(|o| o.username.clone())
        .unwrap_or_else(|| "N/A".to_string());
    let leave_type = leave.r#type.clone();
    let edit_target = leave.clone();

    rsx! {
        tr {
            if is_admin {
                td { "{owner}" }
            }
            td { "{leave_type}" }
            td { "{leave.start_date}" }
            td { "{leave.end_date}" }
            td { "{leave.reason}" }
            td {
                class: "leave-table__actions",
                button {
                    class: "btn btn--small btn--warning",
                    onclick: move |_| on_edit.call(edit_target.clone()),
                    "Update"
                }
                if is_admin {
                    button {
                        class: "btn btn--small btn--danger",
                        onclick: move |_| on_delete.call(leave.id),
                        "Delete"
                    }
                }
            }
        }
    }
}

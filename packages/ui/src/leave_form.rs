//! The leave submission form, hosted in the list view's dialog.
//!
//! On a successful create or update the form publishes on the refresh bus;
//! it does not talk to the list view directly. Validation failures stay
//! local to the form and never reach the request pipeline.

use api::{ApiError, LeaveClient, LeaveDraft, LeaveRequest};
use dioxus::prelude::*;

use crate::refresh_bus::RefreshBus;

/// The leave types the form offers.
pub const LEAVE_TYPES: [&str; 8] = [
    "Sick Leave",
    "Casual Leave",
    "Earned Leave",
    "Maternity Leave",
    "Paternity Leave",
    "Compensatory Leave",
    "Bereavement Leave",
    "Unpaid Leave",
];

/// Create/update form. Pass `editing` to prefill for an update; the parent
/// remounts the dialog per open, so the prefill is read once.
#[component]
pub fn LeaveForm(editing: Option<LeaveRequest>) -> Element {
    let client = use_context::<LeaveClient>();
    let bus = use_context::<RefreshBus>();

    let editing_id = editing.as_ref().map(|leave| leave.id);
    let (init_type, init_start, init_end, init_reason) = match editing {
        Some(leave) => (leave.r#type, leave.start_date, leave.end_date, leave.reason),
        None => Default::default(),
    };

    let mut leave_type = use_signal(move || init_type);
    let mut start_date = use_signal(move || init_start);
    let mut end_date = use_signal(move || init_end);
    let mut reason = use_signal(move || init_reason);

    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let mut type_error = use_signal(|| false);
    let mut start_error = use_signal(|| false);
    let mut end_error = use_signal(|| false);
    let mut reason_error = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let bus = bus.clone();
        spawn(async move {
            error.set(None);
            type_error.set(leave_type().is_empty());
            start_error.set(start_date().is_empty());
            end_error.set(end_date().is_empty());
            reason_error.set(reason().trim().is_empty());
            if type_error() || start_error() || end_error() || reason_error() {
                error.set(Some("Please fill in all required fields.".to_string()));
                return;
            }

            let draft = LeaveDraft {
                r#type: leave_type(),
                start_date: start_date(),
                end_date: end_date(),
                reason: reason().trim().to_string(),
            };

            submitting.set(true);
            let result = match editing_id {
                Some(id) => client.update(id, &draft).await.map(|_| ()),
                None => client.create(&draft).await.map(|_| ()),
            };
            submitting.set(false);

            match result {
                Ok(()) => bus.publish(),
                // handled centrally by the pipeline
                Err(ApiError::SessionExpired) => {}
                Err(err) => {
                    tracing::error!("Failed to submit leave request: {err}");
                    error.set(Some("Failed to submit leave request.".to_string()));
                }
            }
        });
    };

    let title = if editing_id.is_some() {
        "Update Leave"
    } else {
        "Request Leave"
    };
    let submit_label = if submitting() {
        "Submitting..."
    } else if editing_id.is_some() {
        "Update"
    } else {
        "Submit"
    };

    rsx! {
        div {
            class: "leave-form",
            h2 { class: "leave-form__title", "{title}" }

            if let Some(message) = error() {
                div { class: "form-alert", "{message}" }
            }

            form {
                novalidate: true,
                onsubmit: handle_submit,

                div {
                    class: "form-field",
                    label { r#for: "leave-type", "Leave Type" }
                    select {
                        id: "leave-type",
                        value: "{leave_type}",
                        onchange: move |evt| leave_type.set(evt.value()),
                        option { value: "", disabled: true, "Select a leave type" }
                        for lt in LEAVE_TYPES {
                            option { key: "{lt}", value: "{lt}", "{lt}" }
                        }
                    }
                    if type_error() {
                        p { class: "field-error", "Leave type is required" }
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "leave-start", "Start Date" }
                    input {
                        id: "leave-start",
                        r#type: "date",
                        value: "{start_date}",
                        oninput: move |evt: FormEvent| {
                            let selected = evt.value();
                            // an end date before the new start date is no
                            // longer meaningful
                            if !end_date().is_empty() && selected > end_date() {
                                end_date.set(String::new());
                            }
                            start_date.set(selected);
                        },
                    }
                    if start_error() {
                        p { class: "field-error", "Start date is required" }
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "leave-end", "End Date" }
                    input {
                        id: "leave-end",
                        r#type: "date",
                        min: "{start_date}",
                        value: "{end_date}",
                        oninput: move |evt: FormEvent| end_date.set(evt.value()),
                    }
                    if end_error() {
                        p { class: "field-error", "End date is required" }
                    }
                }

                div {
                    class: "form-field",
                    label { r#for: "leave-reason", "Reason" }
                    textarea {
                        id: "leave-reason",
                        rows: "4",
                        value: "{reason}",
                        oninput: move |evt: FormEvent| reason.set(evt.value()),
                    }
                    if reason_error() {
                        p { class: "field-error", "Reason is required" }
                    }
                }

                button {
                    class: "btn btn--primary btn--full",
                    r#type: "submit",
                    disabled: submitting(),
                    "{submit_label}"
                }
            }
        }
    }
}

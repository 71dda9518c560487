use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    fn class(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice--info",
            NoticeLevel::Success => "notice--success",
            NoticeLevel::Warning => "notice--warning",
            NoticeLevel::Error => "notice--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub timestamp: String,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct NoticeLog {
    pub entries: Vec<Notice>,
}

pub fn use_notices() -> Signal<NoticeLog> {
    use_context::<Signal<NoticeLog>>()
}

pub fn push_notice(log: &mut Signal<NoticeLog>, level: NoticeLevel, message: &str) {
    let ts = current_time();
    log.write().entries.push(Notice {
        timestamp: ts,
        level,
        message: message.to_string(),
    });
}

/// Banner showing the most recent notices, with a dismiss control that
/// clears the log.
#[component]
pub fn NoticeBanner() -> Element {
    let mut log = use_notices();
    let entries = log().entries;
    if entries.is_empty() {
        return rsx! {};
    }

    let recent: Vec<(String, Notice)> = entries
        .iter()
        .rev()
        .take(3)
        .map(|notice| (format!("notice {}", notice.level.class()), notice.clone()))
        .collect();
    rsx! {
        div {
            class: "notice-banner",
            for (notice_class, notice) in recent {
                div {
                    class: "{notice_class}",
                    span { class: "notice__time", "{notice.timestamp}" }
                    span { class: "notice__message", "{notice.message}" }
                }
            }
            button {
                class: "notice-banner__dismiss",
                onclick: move |_| log.write().entries.clear(),
                "Dismiss"
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    "00:00:00".to_string()
}

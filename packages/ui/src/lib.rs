//! This crate contains all shared UI for the workspace.

mod refresh_bus;
pub use refresh_bus::{use_refresh, RefreshBus, Subscription};

pub mod notices;
pub use notices::{push_notice, use_notices, Notice, NoticeBanner, NoticeLevel, NoticeLog};

mod events;
pub use events::{redirect_to_login, Notifier};

mod guard;
pub use guard::SessionGuard;

mod session_store;
pub use session_store::make_credential_store;

mod modal;
pub use modal::ModalOverlay;

mod confirm;
pub use confirm::ConfirmDialog;

mod leave_form;
pub use leave_form::{LeaveForm, LEAVE_TYPES};

//! # API crate — the session pipeline and the resource clients
//!
//! Everything the frontends say to the server goes through this crate, and
//! everything goes through one [`Pipeline`]: credential attachment, expiry
//! handling, and failure classification live in exactly one place.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`pipeline`] | The request pipeline: bearer attachment before send, 401/unreachable/role classification after receive, [`SessionEvents`] sink |
//! | [`auth`] | Login, signup (admission per config), logout |
//! | [`leaves`] | Leave-request CRUD and the role-aware listing |
//! | [`config`] | [`ClientConfig`] with the explicit `signup_auto_login` and `role_policy` options |
//! | [`error`] | [`ApiError`] taxonomy |

mod auth;
mod config;
mod error;
mod leaves;
mod pipeline;

pub use auth::{AuthClient, SignupOutcome};
pub use config::ClientConfig;
pub use error::ApiError;
pub use leaves::{LeaveClient, LeaveDraft, LeaveRequest, OwnerInfo};
pub use pipeline::{Pipeline, SessionEvents};

pub use session::{Role, RolePolicy};

//! Leave-request resource client: role-aware listing plus the CRUD calls.

use serde::{Deserialize, Serialize};
use session::Role;

use crate::error::ApiError;
use crate::pipeline::Pipeline;

/// A leave request as the server returns it. Consumed read-only by the
/// client; field contents are not validated here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: i64,
    pub r#type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    /// Present only in the admin listing. The server spells this `user`.
    #[serde(default, rename = "user")]
    pub owner: Option<OwnerInfo>,
}

/// Owner info attached to entries of the admin listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OwnerInfo {
    pub username: String,
}

/// Payload for creating or updating a leave request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveDraft {
    pub r#type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

/// Client for the leave-request endpoints. Stateless; every call goes
/// through the request pipeline.
#[derive(Clone)]
pub struct LeaveClient {
    pipeline: Pipeline,
}

impl LeaveClient {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// List leave requests. Admins see every request with owner info;
    /// everyone else (including an admitted user whose role is unknown)
    /// sees their own.
    pub async fn list(&self, role: Option<Role>) -> Result<Vec<LeaveRequest>, ApiError> {
        let path = match role {
            Some(Role::Admin) => "/api/leave-requests/all",
            _ => "/api/leave-requests",
        };
        self.pipeline.get_json(path).await
    }

    pub async fn create(&self, draft: &LeaveDraft) -> Result<LeaveRequest, ApiError> {
        self.pipeline.post_json("/api/leave-requests", draft).await
    }

    pub async fn update(&self, id: i64, draft: &LeaveDraft) -> Result<LeaveRequest, ApiError> {
        self.pipeline
            .put_json(&format!("/api/leave-requests/{id}"), draft)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.pipeline
            .delete(&format!("/api/leave-requests/{id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_listing_payload_deserializes() {
        let payload = r#"[
            {
                "id": 7,
                "type": "Sick Leave",
                "startDate": "2026-08-10",
                "endDate": "2026-08-12",
                "reason": "flu",
                "user": { "username": "amara" }
            },
            {
                "id": 8,
                "type": "Unpaid Leave",
                "startDate": "2026-09-01",
                "endDate": "2026-09-05",
                "reason": "moving house"
            }
        ]"#;

        let leaves: Vec<LeaveRequest> = serde_json::from_str(payload).unwrap();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].r#type, "Sick Leave");
        assert_eq!(leaves[0].start_date, "2026-08-10");
        assert_eq!(
            leaves[0].owner.as_ref().map(|o| o.username.as_str()),
            Some("amara")
        );
        assert_eq!(leaves[1].owner, None);
    }

    #[test]
    fn draft_serializes_with_wire_casing() {
        let draft = LeaveDraft {
            r#type: "Casual Leave".to_string(),
            start_date: "2026-08-10".to_string(),
            end_date: "2026-08-11".to_string(),
            reason: "errand".to_string(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "Casual Leave");
        assert_eq!(value["startDate"], "2026-08-10");
        assert!(value.get("start_date").is_none());
    }
}

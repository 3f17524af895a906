//! Request values, one per IAM operation
//!
//! Optional inputs are `Option`s: a field left `None` is omitted from the
//! remote call entirely, so the service applies its own default.

use crate::model::{StatusType, Tag};
use serde::Serialize;

// Users

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GetUserRequest {
    /// `None` asks for the caller's own identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListUsersRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUserRequest {
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions_boundary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateUserRequest {
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteUserRequest {
    pub user_name: String,
}

// Groups

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetGroupRequest {
    pub group_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListGroupsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListGroupsForUserRequest {
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateGroupRequest {
    pub group_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteGroupRequest {
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddUserToGroupRequest {
    pub group_name: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoveUserFromGroupRequest {
    pub group_name: String,
    pub user_name: String,
}

// Roles

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetRoleRequest {
    pub role_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListRolesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRoleRequest {
    pub role_name: String,
    pub assume_role_policy_document: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_session_duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions_boundary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteRoleRequest {
    pub role_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachRolePolicyRequest {
    pub role_name: String,
    pub policy_arn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetachRolePolicyRequest {
    pub role_name: String,
    pub policy_arn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListAttachedRolePoliciesRequest {
    pub role_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PutRolePolicyRequest {
    pub role_name: String,
    pub policy_name: String,
    pub policy_document: String,
}

// Access keys

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListAccessKeysRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateAccessKeyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateAccessKeyRequest {
    pub access_key_id: String,
    pub status: StatusType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteAccessKeyRequest {
    pub access_key_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

// Login profiles

#[derive(Clone, PartialEq, Serialize)]
pub struct CreateLoginProfileRequest {
    pub user_name: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_reset_required: Option<bool>,
}

impl std::fmt::Debug for CreateLoginProfileRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateLoginProfileRequest")
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .field("password_reset_required", &self.password_reset_required)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetLoginProfileRequest {
    pub user_name: String,
}

// Account

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListAccountAliasesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GetAccountSummaryRequest {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_are_omitted() {
        let json = serde_json::to_value(ListUsersRequest {
            path_prefix: None,
            marker: None,
            max_items: Some(0),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "max_items": 0 }));

        let json = serde_json::to_value(GetUserRequest::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn password_never_serialized_or_logged() {
        let request = CreateLoginProfileRequest {
            user_name: "alice".to_string(),
            password: "hunter2".to_string(),
            password_reset_required: Some(true),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!format!("{request:?}").contains("hunter2"));
    }
}

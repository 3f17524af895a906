//! Response values, one per IAM operation

use crate::model::{AccessKey, AccessKeyMetadata, AttachedPolicy, Group, LoginProfile, Role, User};
use serde::Serialize;
use std::collections::BTreeMap;

/// Responses of list operations that the service may truncate
pub trait Paginated {
    /// Marker to pass back for the next page, if the listing was cut short
    fn next_marker(&self) -> Option<&str>;
}

macro_rules! paginated {
    ($($resp:ident),+ $(,)?) => {
        $(
            impl Paginated for $resp {
                fn next_marker(&self) -> Option<&str> {
                    if self.is_truncated {
                        self.marker.as_deref()
                    } else {
                        None
                    }
                }
            }
        )+
    };
}

// Users

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub is_truncated: bool,
    pub marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateUserResponse {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteUserResponse {}

// Groups

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetGroupResponse {
    pub group: Group,
    pub users: Vec<User>,
    pub is_truncated: bool,
    pub marker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListGroupsResponse {
    pub groups: Vec<Group>,
    pub is_truncated: bool,
    pub marker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListGroupsForUserResponse {
    pub groups: Vec<Group>,
    pub is_truncated: bool,
    pub marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateGroupResponse {
    pub group: Group,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteGroupResponse {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddUserToGroupResponse {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RemoveUserFromGroupResponse {}

// Roles

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetRoleResponse {
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListRolesResponse {
    pub roles: Vec<Role>,
    pub is_truncated: bool,
    pub marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRoleResponse {
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteRoleResponse {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttachRolePolicyResponse {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetachRolePolicyResponse {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListAttachedRolePoliciesResponse {
    pub attached_policies: Vec<AttachedPolicy>,
    pub is_truncated: bool,
    pub marker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PutRolePolicyResponse {}

// Access keys

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListAccessKeysResponse {
    pub access_key_metadata: Vec<AccessKeyMetadata>,
    pub is_truncated: bool,
    pub marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateAccessKeyResponse {
    pub access_key: AccessKey,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateAccessKeyResponse {}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteAccessKeyResponse {}

// Login profiles

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateLoginProfileResponse {
    pub login_profile: LoginProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetLoginProfileResponse {
    pub login_profile: LoginProfile,
}

// Account

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListAccountAliasesResponse {
    pub account_aliases: Vec<String>,
    pub is_truncated: bool,
    pub marker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GetAccountSummaryResponse {
    pub summary_map: BTreeMap<String, i32>,
}

paginated!(
    ListUsersResponse,
    GetGroupResponse,
    ListGroupsResponse,
    ListGroupsForUserResponse,
    ListRolesResponse,
    ListAttachedRolePoliciesResponse,
    ListAccessKeysResponse,
    ListAccountAliasesResponse,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_only_reported_when_truncated() {
        let complete = ListUsersResponse {
            users: vec![],
            is_truncated: false,
            marker: Some("stale".to_string()),
        };
        assert_eq!(complete.next_marker(), None);

        let truncated = ListUsersResponse {
            users: vec![],
            is_truncated: true,
            marker: Some("page-2".to_string()),
        };
        assert_eq!(truncated.next_marker(), Some("page-2"));
    }
}

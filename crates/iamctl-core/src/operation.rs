//! The closed set of supported IAM operations
//!
//! `iam_operations!` generates the [`Operation`] enum together with the
//! [`IamRequest`] and [`IamResponse`] unions, so adding an operation is a
//! single line here plus its request/response structs.

use crate::request::*;
use crate::response::*;
use serde::Serialize;
use std::fmt;

macro_rules! iam_operations {
    ($($op:ident(mutating: $mutating:literal) => $req:ident, $resp:ident;)+) => {
        /// An IAM API operation exposed as a command
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum Operation {
            $($op,)+
        }

        impl Operation {
            /// Every supported operation, in declaration order
            pub const ALL: &'static [Operation] = &[$(Operation::$op,)+];

            /// IAM API action name
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Operation::$op => stringify!($op),)+
                }
            }

            /// Whether the operation changes account state and therefore
            /// requires confirmation before it is issued
            pub fn is_mutating(self) -> bool {
                match self {
                    $(Operation::$op => $mutating,)+
                }
            }
        }

        /// Request value for any supported operation
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "operation", content = "input")]
        pub enum IamRequest {
            $($op($req),)+
        }

        impl IamRequest {
            pub fn operation(&self) -> Operation {
                match self {
                    $(IamRequest::$op(_) => Operation::$op,)+
                }
            }
        }

        $(
            impl From<$req> for IamRequest {
                fn from(request: $req) -> Self {
                    IamRequest::$op(request)
                }
            }
        )+

        /// Response value for any supported operation
        #[derive(Debug, Clone, PartialEq, Serialize)]
        #[serde(tag = "operation", content = "output")]
        pub enum IamResponse {
            $($op($resp),)+
        }

        impl IamResponse {
            pub fn operation(&self) -> Operation {
                match self {
                    $(IamResponse::$op(_) => Operation::$op,)+
                }
            }
        }

        $(
            impl From<$resp> for IamResponse {
                fn from(response: $resp) -> Self {
                    IamResponse::$op(response)
                }
            }

            impl TryFrom<IamResponse> for $resp {
                type Error = IamResponse;

                fn try_from(response: IamResponse) -> Result<Self, Self::Error> {
                    match response {
                        IamResponse::$op(inner) => Ok(inner),
                        #[allow(unreachable_patterns)]
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

iam_operations! {
    GetUser(mutating: false) => GetUserRequest, GetUserResponse;
    ListUsers(mutating: false) => ListUsersRequest, ListUsersResponse;
    CreateUser(mutating: true) => CreateUserRequest, CreateUserResponse;
    UpdateUser(mutating: true) => UpdateUserRequest, UpdateUserResponse;
    DeleteUser(mutating: true) => DeleteUserRequest, DeleteUserResponse;
    GetGroup(mutating: false) => GetGroupRequest, GetGroupResponse;
    ListGroups(mutating: false) => ListGroupsRequest, ListGroupsResponse;
    ListGroupsForUser(mutating: false) => ListGroupsForUserRequest, ListGroupsForUserResponse;
    CreateGroup(mutating: true) => CreateGroupRequest, CreateGroupResponse;
    DeleteGroup(mutating: true) => DeleteGroupRequest, DeleteGroupResponse;
    AddUserToGroup(mutating: true) => AddUserToGroupRequest, AddUserToGroupResponse;
    RemoveUserFromGroup(mutating: true) => RemoveUserFromGroupRequest, RemoveUserFromGroupResponse;
    GetRole(mutating: false) => GetRoleRequest, GetRoleResponse;
    ListRoles(mutating: false) => ListRolesRequest, ListRolesResponse;
    CreateRole(mutating: true) => CreateRoleRequest, CreateRoleResponse;
    DeleteRole(mutating: true) => DeleteRoleRequest, DeleteRoleResponse;
    AttachRolePolicy(mutating: true) => AttachRolePolicyRequest, AttachRolePolicyResponse;
    DetachRolePolicy(mutating: true) => DetachRolePolicyRequest, DetachRolePolicyResponse;
    ListAttachedRolePolicies(mutating: false) => ListAttachedRolePoliciesRequest, ListAttachedRolePoliciesResponse;
    PutRolePolicy(mutating: true) => PutRolePolicyRequest, PutRolePolicyResponse;
    ListAccessKeys(mutating: false) => ListAccessKeysRequest, ListAccessKeysResponse;
    CreateAccessKey(mutating: true) => CreateAccessKeyRequest, CreateAccessKeyResponse;
    UpdateAccessKey(mutating: true) => UpdateAccessKeyRequest, UpdateAccessKeyResponse;
    DeleteAccessKey(mutating: true) => DeleteAccessKeyRequest, DeleteAccessKeyResponse;
    CreateLoginProfile(mutating: true) => CreateLoginProfileRequest, CreateLoginProfileResponse;
    GetLoginProfile(mutating: false) => GetLoginProfileRequest, GetLoginProfileResponse;
    ListAccountAliases(mutating: false) => ListAccountAliasesRequest, ListAccountAliasesResponse;
    GetAccountSummary(mutating: false) => GetAccountSummaryRequest, GetAccountSummaryResponse;
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_operations_are_not_mutating() {
        for op in Operation::ALL {
            let name = op.as_str();
            if name.starts_with("Get") || name.starts_with("List") {
                assert!(!op.is_mutating(), "{name} should not require confirmation");
            } else {
                assert!(op.is_mutating(), "{name} should require confirmation");
            }
        }
    }

    #[test]
    fn request_knows_its_operation() {
        let request: IamRequest = GetUserRequest::default().into();
        assert_eq!(request.operation(), Operation::GetUser);

        let request: IamRequest = DeleteUserRequest {
            user_name: "alice".to_string(),
        }
        .into();
        assert_eq!(request.operation(), Operation::DeleteUser);
    }

    #[test]
    fn response_unwraps_only_matching_variant() {
        let response: IamResponse = DeleteUserResponse {}.into();
        assert!(DeleteUserResponse::try_from(response.clone()).is_ok());

        let mismatch = DeleteGroupResponse::try_from(response).unwrap_err();
        assert_eq!(mismatch.operation(), Operation::DeleteUser);
    }

    #[test]
    fn operation_serializes_as_action_name() {
        assert_eq!(
            serde_json::to_value(Operation::ListAttachedRolePolicies).unwrap(),
            serde_json::json!("ListAttachedRolePolicies")
        );
        assert_eq!(Operation::GetAccountSummary.to_string(), "GetAccountSummary");
    }
}

//! IAM service client backed by the AWS SDK

use crate::aws::context::AwsContext;
use crate::aws::convert::{self, Malformed, required};
use crate::aws::error::classify_sdk_error;
use aws_sdk_iam::Client;
use aws_sdk_iam::error::{ProvideErrorMetadata, SdkError};
use iamctl_core::request::*;
use iamctl_core::response::*;
use iamctl_core::{ClientFactory, ConnectionSettings, IamRequest, IamResponse, IamService, Operation, ServiceError};
use std::fmt::Debug;
use tracing::{debug, info};

/// IAM client executing [`IamRequest`]s through the AWS SDK
pub struct IamClient {
    client: Client,
}

fn sdk_error<E, R>(operation: Operation) -> impl FnOnce(SdkError<E, R>) -> ServiceError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    move |err| classify_sdk_error(operation, err)
}

fn malformed(operation: Operation) -> impl FnOnce(Malformed) -> ServiceError {
    move |err| ServiceError::MalformedResponse {
        operation,
        detail: err.0,
    }
}

fn invalid(operation: Operation) -> impl FnOnce(String) -> ServiceError {
    move |message| ServiceError::InvalidRequest { operation, message }
}

impl IamClient {
    /// Create an IAM client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.iam_client(),
        }
    }

    // Users

    async fn get_user(&self, r: GetUserRequest) -> Result<GetUserResponse, ServiceError> {
        const OP: Operation = Operation::GetUser;
        let out = self
            .client
            .get_user()
            .set_user_name(r.user_name)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        let user = required(out.user(), "User")
            .and_then(convert::user)
            .map_err(malformed(OP))?;
        Ok(GetUserResponse { user })
    }

    async fn list_users(&self, r: ListUsersRequest) -> Result<ListUsersResponse, ServiceError> {
        const OP: Operation = Operation::ListUsers;
        let out = self
            .client
            .list_users()
            .set_path_prefix(r.path_prefix)
            .set_marker(r.marker)
            .set_max_items(r.max_items)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        Ok(ListUsersResponse {
            users: convert::users(out.users()).map_err(malformed(OP))?,
            is_truncated: out.is_truncated(),
            marker: out.marker().map(str::to_string),
        })
    }

    async fn create_user(&self, r: CreateUserRequest) -> Result<CreateUserResponse, ServiceError> {
        const OP: Operation = Operation::CreateUser;
        info!(user_name = %r.user_name, "Creating IAM user");
        let tags = convert::sdk_tags(r.tags).map_err(invalid(OP))?;
        let out = self
            .client
            .create_user()
            .user_name(r.user_name)
            .set_path(r.path)
            .set_permissions_boundary(r.permissions_boundary)
            .set_tags(tags)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        let user = required(out.user(), "User")
            .and_then(convert::user)
            .map_err(malformed(OP))?;
        Ok(CreateUserResponse { user })
    }

    async fn update_user(&self, r: UpdateUserRequest) -> Result<UpdateUserResponse, ServiceError> {
        info!(user_name = %r.user_name, "Updating IAM user");
        self.client
            .update_user()
            .user_name(r.user_name)
            .set_new_path(r.new_path)
            .set_new_user_name(r.new_user_name)
            .send()
            .await
            .map_err(sdk_error(Operation::UpdateUser))?;
        Ok(UpdateUserResponse {})
    }

    async fn delete_user(&self, r: DeleteUserRequest) -> Result<DeleteUserResponse, ServiceError> {
        info!(user_name = %r.user_name, "Deleting IAM user");
        self.client
            .delete_user()
            .user_name(r.user_name)
            .send()
            .await
            .map_err(sdk_error(Operation::DeleteUser))?;
        Ok(DeleteUserResponse {})
    }

    // Groups

    async fn get_group(&self, r: GetGroupRequest) -> Result<GetGroupResponse, ServiceError> {
        const OP: Operation = Operation::GetGroup;
        let out = self
            .client
            .get_group()
            .group_name(r.group_name)
            .set_marker(r.marker)
            .set_max_items(r.max_items)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        let group = required(out.group(), "Group")
            .and_then(convert::group)
            .map_err(malformed(OP))?;
        Ok(GetGroupResponse {
            group,
            users: convert::users(out.users()).map_err(malformed(OP))?,
            is_truncated: out.is_truncated(),
            marker: out.marker().map(str::to_string),
        })
    }

    async fn list_groups(&self, r: ListGroupsRequest) -> Result<ListGroupsResponse, ServiceError> {
        const OP: Operation = Operation::ListGroups;
        let out = self
            .client
            .list_groups()
            .set_path_prefix(r.path_prefix)
            .set_marker(r.marker)
            .set_max_items(r.max_items)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        Ok(ListGroupsResponse {
            groups: convert::groups(out.groups()).map_err(malformed(OP))?,
            is_truncated: out.is_truncated(),
            marker: out.marker().map(str::to_string),
        })
    }

    async fn list_groups_for_user(
        &self,
        r: ListGroupsForUserRequest,
    ) -> Result<ListGroupsForUserResponse, ServiceError> {
        const OP: Operation = Operation::ListGroupsForUser;
        let out = self
            .client
            .list_groups_for_user()
            .user_name(r.user_name)
            .set_marker(r.marker)
            .set_max_items(r.max_items)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        Ok(ListGroupsForUserResponse {
            groups: convert::groups(out.groups()).map_err(malformed(OP))?,
            is_truncated: out.is_truncated(),
            marker: out.marker().map(str::to_string),
        })
    }

    async fn create_group(&self, r: CreateGroupRequest) -> Result<CreateGroupResponse, ServiceError> {
        const OP: Operation = Operation::CreateGroup;
        info!(group_name = %r.group_name, "Creating IAM group");
        let out = self
            .client
            .create_group()
            .group_name(r.group_name)
            .set_path(r.path)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        let group = required(out.group(), "Group")
            .and_then(convert::group)
            .map_err(malformed(OP))?;
        Ok(CreateGroupResponse { group })
    }

    async fn delete_group(&self, r: DeleteGroupRequest) -> Result<DeleteGroupResponse, ServiceError> {
        info!(group_name = %r.group_name, "Deleting IAM group");
        self.client
            .delete_group()
            .group_name(r.group_name)
            .send()
            .await
            .map_err(sdk_error(Operation::DeleteGroup))?;
        Ok(DeleteGroupResponse {})
    }

    async fn add_user_to_group(
        &self,
        r: AddUserToGroupRequest,
    ) -> Result<AddUserToGroupResponse, ServiceError> {
        info!(group_name = %r.group_name, user_name = %r.user_name, "Adding user to group");
        self.client
            .add_user_to_group()
            .group_name(r.group_name)
            .user_name(r.user_name)
            .send()
            .await
            .map_err(sdk_error(Operation::AddUserToGroup))?;
        Ok(AddUserToGroupResponse {})
    }

    async fn remove_user_from_group(
        &self,
        r: RemoveUserFromGroupRequest,
    ) -> Result<RemoveUserFromGroupResponse, ServiceError> {
        info!(group_name = %r.group_name, user_name = %r.user_name, "Removing user from group");
        self.client
            .remove_user_from_group()
            .group_name(r.group_name)
            .user_name(r.user_name)
            .send()
            .await
            .map_err(sdk_error(Operation::RemoveUserFromGroup))?;
        Ok(RemoveUserFromGroupResponse {})
    }

    // Roles

    async fn get_role(&self, r: GetRoleRequest) -> Result<GetRoleResponse, ServiceError> {
        const OP: Operation = Operation::GetRole;
        let out = self
            .client
            .get_role()
            .role_name(r.role_name)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        let role = required(out.role(), "Role")
            .and_then(convert::role)
            .map_err(malformed(OP))?;
        Ok(GetRoleResponse { role })
    }

    async fn list_roles(&self, r: ListRolesRequest) -> Result<ListRolesResponse, ServiceError> {
        const OP: Operation = Operation::ListRoles;
        let out = self
            .client
            .list_roles()
            .set_path_prefix(r.path_prefix)
            .set_marker(r.marker)
            .set_max_items(r.max_items)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        Ok(ListRolesResponse {
            roles: convert::roles(out.roles()).map_err(malformed(OP))?,
            is_truncated: out.is_truncated(),
            marker: out.marker().map(str::to_string),
        })
    }

    async fn create_role(&self, r: CreateRoleRequest) -> Result<CreateRoleResponse, ServiceError> {
        const OP: Operation = Operation::CreateRole;
        info!(role_name = %r.role_name, "Creating IAM role");
        let tags = convert::sdk_tags(r.tags).map_err(invalid(OP))?;
        let out = self
            .client
            .create_role()
            .role_name(r.role_name)
            .assume_role_policy_document(r.assume_role_policy_document)
            .set_path(r.path)
            .set_description(r.description)
            .set_max_session_duration(r.max_session_duration)
            .set_permissions_boundary(r.permissions_boundary)
            .set_tags(tags)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        let role = required(out.role(), "Role")
            .and_then(convert::role)
            .map_err(malformed(OP))?;
        Ok(CreateRoleResponse { role })
    }

    async fn delete_role(&self, r: DeleteRoleRequest) -> Result<DeleteRoleResponse, ServiceError> {
        info!(role_name = %r.role_name, "Deleting IAM role");
        self.client
            .delete_role()
            .role_name(r.role_name)
            .send()
            .await
            .map_err(sdk_error(Operation::DeleteRole))?;
        Ok(DeleteRoleResponse {})
    }

    async fn attach_role_policy(
        &self,
        r: AttachRolePolicyRequest,
    ) -> Result<AttachRolePolicyResponse, ServiceError> {
        info!(role_name = %r.role_name, policy_arn = %r.policy_arn, "Attaching managed policy");
        self.client
            .attach_role_policy()
            .role_name(r.role_name)
            .policy_arn(r.policy_arn)
            .send()
            .await
            .map_err(sdk_error(Operation::AttachRolePolicy))?;
        Ok(AttachRolePolicyResponse {})
    }

    async fn detach_role_policy(
        &self,
        r: DetachRolePolicyRequest,
    ) -> Result<DetachRolePolicyResponse, ServiceError> {
        info!(role_name = %r.role_name, policy_arn = %r.policy_arn, "Detaching managed policy");
        self.client
            .detach_role_policy()
            .role_name(r.role_name)
            .policy_arn(r.policy_arn)
            .send()
            .await
            .map_err(sdk_error(Operation::DetachRolePolicy))?;
        Ok(DetachRolePolicyResponse {})
    }

    async fn list_attached_role_policies(
        &self,
        r: ListAttachedRolePoliciesRequest,
    ) -> Result<ListAttachedRolePoliciesResponse, ServiceError> {
        let out = self
            .client
            .list_attached_role_policies()
            .role_name(r.role_name)
            .set_path_prefix(r.path_prefix)
            .set_marker(r.marker)
            .set_max_items(r.max_items)
            .send()
            .await
            .map_err(sdk_error(Operation::ListAttachedRolePolicies))?;
        Ok(ListAttachedRolePoliciesResponse {
            attached_policies: out
                .attached_policies()
                .iter()
                .map(convert::attached_policy)
                .collect(),
            is_truncated: out.is_truncated(),
            marker: out.marker().map(str::to_string),
        })
    }

    async fn put_role_policy(
        &self,
        r: PutRolePolicyRequest,
    ) -> Result<PutRolePolicyResponse, ServiceError> {
        info!(role_name = %r.role_name, policy_name = %r.policy_name, "Writing inline role policy");
        self.client
            .put_role_policy()
            .role_name(r.role_name)
            .policy_name(r.policy_name)
            .policy_document(r.policy_document)
            .send()
            .await
            .map_err(sdk_error(Operation::PutRolePolicy))?;
        Ok(PutRolePolicyResponse {})
    }

    // Access keys

    async fn list_access_keys(
        &self,
        r: ListAccessKeysRequest,
    ) -> Result<ListAccessKeysResponse, ServiceError> {
        const OP: Operation = Operation::ListAccessKeys;
        let out = self
            .client
            .list_access_keys()
            .set_user_name(r.user_name)
            .set_marker(r.marker)
            .set_max_items(r.max_items)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        Ok(ListAccessKeysResponse {
            access_key_metadata: out
                .access_key_metadata()
                .iter()
                .map(convert::access_key_metadata)
                .collect::<Result<_, _>>()
                .map_err(malformed(OP))?,
            is_truncated: out.is_truncated(),
            marker: out.marker().map(str::to_string),
        })
    }

    async fn create_access_key(
        &self,
        r: CreateAccessKeyRequest,
    ) -> Result<CreateAccessKeyResponse, ServiceError> {
        const OP: Operation = Operation::CreateAccessKey;
        info!(user_name = ?r.user_name, "Creating access key");
        let out = self
            .client
            .create_access_key()
            .set_user_name(r.user_name)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        let access_key = required(out.access_key(), "AccessKey")
            .and_then(convert::access_key)
            .map_err(malformed(OP))?;
        Ok(CreateAccessKeyResponse { access_key })
    }

    async fn update_access_key(
        &self,
        r: UpdateAccessKeyRequest,
    ) -> Result<UpdateAccessKeyResponse, ServiceError> {
        info!(access_key_id = %r.access_key_id, status = %r.status, "Updating access key");
        self.client
            .update_access_key()
            .access_key_id(r.access_key_id)
            .status(convert::sdk_status(r.status))
            .set_user_name(r.user_name)
            .send()
            .await
            .map_err(sdk_error(Operation::UpdateAccessKey))?;
        Ok(UpdateAccessKeyResponse {})
    }

    async fn delete_access_key(
        &self,
        r: DeleteAccessKeyRequest,
    ) -> Result<DeleteAccessKeyResponse, ServiceError> {
        info!(access_key_id = %r.access_key_id, "Deleting access key");
        self.client
            .delete_access_key()
            .access_key_id(r.access_key_id)
            .set_user_name(r.user_name)
            .send()
            .await
            .map_err(sdk_error(Operation::DeleteAccessKey))?;
        Ok(DeleteAccessKeyResponse {})
    }

    // Login profiles

    async fn create_login_profile(
        &self,
        r: CreateLoginProfileRequest,
    ) -> Result<CreateLoginProfileResponse, ServiceError> {
        const OP: Operation = Operation::CreateLoginProfile;
        info!(user_name = %r.user_name, "Creating login profile");
        let out = self
            .client
            .create_login_profile()
            .user_name(r.user_name)
            .password(r.password)
            .set_password_reset_required(r.password_reset_required)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        let login_profile = required(out.login_profile(), "LoginProfile")
            .and_then(convert::login_profile)
            .map_err(malformed(OP))?;
        Ok(CreateLoginProfileResponse { login_profile })
    }

    async fn get_login_profile(
        &self,
        r: GetLoginProfileRequest,
    ) -> Result<GetLoginProfileResponse, ServiceError> {
        const OP: Operation = Operation::GetLoginProfile;
        let out = self
            .client
            .get_login_profile()
            .user_name(r.user_name)
            .send()
            .await
            .map_err(sdk_error(OP))?;
        let login_profile = required(out.login_profile(), "LoginProfile")
            .and_then(convert::login_profile)
            .map_err(malformed(OP))?;
        Ok(GetLoginProfileResponse { login_profile })
    }

    // Account

    async fn list_account_aliases(
        &self,
        r: ListAccountAliasesRequest,
    ) -> Result<ListAccountAliasesResponse, ServiceError> {
        let out = self
            .client
            .list_account_aliases()
            .set_marker(r.marker)
            .set_max_items(r.max_items)
            .send()
            .await
            .map_err(sdk_error(Operation::ListAccountAliases))?;
        Ok(ListAccountAliasesResponse {
            account_aliases: out.account_aliases().to_vec(),
            is_truncated: out.is_truncated(),
            marker: out.marker().map(str::to_string),
        })
    }

    async fn get_account_summary(
        &self,
        _r: GetAccountSummaryRequest,
    ) -> Result<GetAccountSummaryResponse, ServiceError> {
        let out = self
            .client
            .get_account_summary()
            .send()
            .await
            .map_err(sdk_error(Operation::GetAccountSummary))?;
        let summary_map = out
            .summary_map()
            .map(|map| {
                map.iter()
                    .map(|(key, value)| (key.as_str().to_string(), *value))
                    .collect()
            })
            .unwrap_or_default();
        Ok(GetAccountSummaryResponse { summary_map })
    }
}

impl IamService for IamClient {
    async fn invoke(&self, request: IamRequest) -> Result<IamResponse, ServiceError> {
        debug!(operation = %request.operation(), "Sending IAM request");
        match request {
            IamRequest::GetUser(r) => self.get_user(r).await.map(Into::into),
            IamRequest::ListUsers(r) => self.list_users(r).await.map(Into::into),
            IamRequest::CreateUser(r) => self.create_user(r).await.map(Into::into),
            IamRequest::UpdateUser(r) => self.update_user(r).await.map(Into::into),
            IamRequest::DeleteUser(r) => self.delete_user(r).await.map(Into::into),
            IamRequest::GetGroup(r) => self.get_group(r).await.map(Into::into),
            IamRequest::ListGroups(r) => self.list_groups(r).await.map(Into::into),
            IamRequest::ListGroupsForUser(r) => self.list_groups_for_user(r).await.map(Into::into),
            IamRequest::CreateGroup(r) => self.create_group(r).await.map(Into::into),
            IamRequest::DeleteGroup(r) => self.delete_group(r).await.map(Into::into),
            IamRequest::AddUserToGroup(r) => self.add_user_to_group(r).await.map(Into::into),
            IamRequest::RemoveUserFromGroup(r) => {
                self.remove_user_from_group(r).await.map(Into::into)
            }
            IamRequest::GetRole(r) => self.get_role(r).await.map(Into::into),
            IamRequest::ListRoles(r) => self.list_roles(r).await.map(Into::into),
            IamRequest::CreateRole(r) => self.create_role(r).await.map(Into::into),
            IamRequest::DeleteRole(r) => self.delete_role(r).await.map(Into::into),
            IamRequest::AttachRolePolicy(r) => self.attach_role_policy(r).await.map(Into::into),
            IamRequest::DetachRolePolicy(r) => self.detach_role_policy(r).await.map(Into::into),
            IamRequest::ListAttachedRolePolicies(r) => {
                self.list_attached_role_policies(r).await.map(Into::into)
            }
            IamRequest::PutRolePolicy(r) => self.put_role_policy(r).await.map(Into::into),
            IamRequest::ListAccessKeys(r) => self.list_access_keys(r).await.map(Into::into),
            IamRequest::CreateAccessKey(r) => self.create_access_key(r).await.map(Into::into),
            IamRequest::UpdateAccessKey(r) => self.update_access_key(r).await.map(Into::into),
            IamRequest::DeleteAccessKey(r) => self.delete_access_key(r).await.map(Into::into),
            IamRequest::CreateLoginProfile(r) => self.create_login_profile(r).await.map(Into::into),
            IamRequest::GetLoginProfile(r) => self.get_login_profile(r).await.map(Into::into),
            IamRequest::ListAccountAliases(r) => {
                self.list_account_aliases(r).await.map(Into::into)
            }
            IamRequest::GetAccountSummary(r) => self.get_account_summary(r).await.map(Into::into),
        }
    }
}

/// Creates SDK-backed IAM clients, one configuration load per settings
#[derive(Debug, Default, Clone, Copy)]
pub struct AwsClientFactory;

impl ClientFactory for AwsClientFactory {
    type Client = IamClient;

    async fn create_client(&self, settings: &ConnectionSettings) -> Result<IamClient, ServiceError> {
        let ctx = AwsContext::load(settings).await;
        debug!(region = %ctx.region(), "IAM client ready");
        Ok(IamClient::from_context(&ctx))
    }
}

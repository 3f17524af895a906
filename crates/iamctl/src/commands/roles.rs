//! Role commands

use super::Paging;
use clap::Args;
use iamctl_core::model::{AttachedPolicy, Role, Tag};
use iamctl_core::request::{
    AttachRolePolicyRequest, CreateRoleRequest, DeleteRoleRequest, DetachRolePolicyRequest,
    GetRoleRequest, ListAttachedRolePoliciesRequest, ListRolesRequest, PutRolePolicyRequest,
};
use iamctl_core::response::{
    AttachRolePolicyResponse, CreateRoleResponse, DeleteRoleResponse, DetachRolePolicyResponse,
    GetRoleResponse, ListAttachedRolePoliciesResponse, ListRolesResponse, Paginated,
    PutRolePolicyResponse,
};
use iamctl_core::{IamCommand, Operation, pass_thru};

/// Prefix marking a policy argument as a path to read
const FILE_PREFIX: &str = "file://";

/// Parse a policy document argument: inline JSON, or `file://PATH`
pub fn policy_document(value: &str) -> Result<String, String> {
    match value.strip_prefix(FILE_PREFIX) {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read policy document {path}: {e}")),
        None => Ok(value.to_string()),
    }
}

/// Show a role
#[derive(Args, Debug, Clone)]
pub struct GetRole {
    /// Role name, or `-` to read names from stdin
    pub role_name: String,
}

impl IamCommand for GetRole {
    type Request = GetRoleRequest;
    type Response = GetRoleResponse;
    type Output = Role;
    const OPERATION: Operation = Operation::GetRole;

    fn build_request(&self) -> GetRoleRequest {
        GetRoleRequest {
            role_name: self.role_name.clone(),
        }
    }

    fn project(&self, response: &GetRoleResponse) -> Vec<Role> {
        vec![response.role.clone()]
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.role_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.role_name = value;
    }
}

/// List roles
#[derive(Args, Debug, Clone)]
pub struct GetRoleList {
    /// Only roles whose path starts with this prefix
    #[arg(long)]
    pub path_prefix: Option<String>,

    #[command(flatten)]
    pub paging: Paging,
}

impl IamCommand for GetRoleList {
    type Request = ListRolesRequest;
    type Response = ListRolesResponse;
    type Output = Role;
    const OPERATION: Operation = Operation::ListRoles;

    fn build_request(&self) -> ListRolesRequest {
        ListRolesRequest {
            path_prefix: self.path_prefix.clone(),
            marker: self.paging.marker.clone(),
            max_items: self.paging.max_items,
        }
    }

    fn project(&self, response: &ListRolesResponse) -> Vec<Role> {
        response.roles.clone()
    }

    fn next_marker(response: &ListRolesResponse) -> Option<String> {
        response.next_marker().map(str::to_string)
    }
}

/// Create a role
#[derive(Args, Debug, Clone)]
pub struct NewRole {
    /// Name of the new role, or `-` to read names from stdin
    pub role_name: String,

    /// Trust policy, as JSON or `file://PATH`
    #[arg(long, value_parser = policy_document)]
    pub assume_role_policy_document: String,

    /// Path for the role
    #[arg(long)]
    pub path: Option<String>,

    /// Description of the role
    #[arg(long)]
    pub description: Option<String>,

    /// Maximum session duration in seconds (3600 to 43200)
    #[arg(long)]
    pub max_session_duration: Option<i32>,

    /// ARN of the managed policy used as permissions boundary
    #[arg(long)]
    pub permissions_boundary: Option<String>,

    /// Tag to attach, as KEY=VALUE (repeatable)
    #[arg(long = "tag", value_name = "KEY=VALUE")]
    pub tags: Vec<Tag>,
}

impl IamCommand for NewRole {
    type Request = CreateRoleRequest;
    type Response = CreateRoleResponse;
    type Output = Role;
    const OPERATION: Operation = Operation::CreateRole;

    fn build_request(&self) -> CreateRoleRequest {
        CreateRoleRequest {
            role_name: self.role_name.clone(),
            assume_role_policy_document: self.assume_role_policy_document.clone(),
            path: self.path.clone(),
            description: self.description.clone(),
            max_session_duration: self.max_session_duration,
            permissions_boundary: self.permissions_boundary.clone(),
            tags: (!self.tags.is_empty()).then(|| self.tags.clone()),
        }
    }

    fn project(&self, response: &CreateRoleResponse) -> Vec<Role> {
        vec![response.role.clone()]
    }

    fn target(&self) -> String {
        self.role_name.clone()
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.role_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.role_name = value;
    }
}

/// Delete a role
#[derive(Args, Debug, Clone)]
pub struct RemoveRole {
    /// Role name, or `-` to read names from stdin
    pub role_name: String,

    /// Print the role name after a successful delete
    #[arg(long)]
    pub pass_thru: bool,
}

impl IamCommand for RemoveRole {
    type Request = DeleteRoleRequest;
    type Response = DeleteRoleResponse;
    type Output = String;
    const OPERATION: Operation = Operation::DeleteRole;

    fn build_request(&self) -> DeleteRoleRequest {
        DeleteRoleRequest {
            role_name: self.role_name.clone(),
        }
    }

    fn project(&self, _response: &DeleteRoleResponse) -> Vec<String> {
        pass_thru(self.pass_thru, &self.role_name)
    }

    fn target(&self) -> String {
        self.role_name.clone()
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.role_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.role_name = value;
    }
}

/// Attach a managed policy to a role
#[derive(Args, Debug, Clone)]
pub struct RegisterRolePolicy {
    /// Role name, or `-` to read names from stdin
    pub role_name: String,

    /// ARN of the managed policy
    #[arg(long)]
    pub policy_arn: String,

    /// Print the role name after a successful attach
    #[arg(long)]
    pub pass_thru: bool,
}

impl IamCommand for RegisterRolePolicy {
    type Request = AttachRolePolicyRequest;
    type Response = AttachRolePolicyResponse;
    type Output = String;
    const OPERATION: Operation = Operation::AttachRolePolicy;

    fn build_request(&self) -> AttachRolePolicyRequest {
        AttachRolePolicyRequest {
            role_name: self.role_name.clone(),
            policy_arn: self.policy_arn.clone(),
        }
    }

    fn project(&self, _response: &AttachRolePolicyResponse) -> Vec<String> {
        pass_thru(self.pass_thru, &self.role_name)
    }

    fn target(&self) -> String {
        format!("{} (policy {})", self.role_name, self.policy_arn)
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.role_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.role_name = value;
    }
}

/// Detach a managed policy from a role
#[derive(Args, Debug, Clone)]
pub struct UnregisterRolePolicy {
    /// Role name, or `-` to read names from stdin
    pub role_name: String,

    /// ARN of the managed policy
    #[arg(long)]
    pub policy_arn: String,

    /// Print the role name after a successful detach
    #[arg(long)]
    pub pass_thru: bool,
}

impl IamCommand for UnregisterRolePolicy {
    type Request = DetachRolePolicyRequest;
    type Response = DetachRolePolicyResponse;
    type Output = String;
    const OPERATION: Operation = Operation::DetachRolePolicy;

    fn build_request(&self) -> DetachRolePolicyRequest {
        DetachRolePolicyRequest {
            role_name: self.role_name.clone(),
            policy_arn: self.policy_arn.clone(),
        }
    }

    fn project(&self, _response: &DetachRolePolicyResponse) -> Vec<String> {
        pass_thru(self.pass_thru, &self.role_name)
    }

    fn target(&self) -> String {
        format!("{} (policy {})", self.role_name, self.policy_arn)
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.role_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.role_name = value;
    }
}

/// List the managed policies attached to a role
#[derive(Args, Debug, Clone)]
pub struct GetAttachedRolePolicyList {
    /// Role name, or `-` to read names from stdin
    pub role_name: String,

    /// Only policies whose path starts with this prefix
    #[arg(long)]
    pub path_prefix: Option<String>,

    #[command(flatten)]
    pub paging: Paging,
}

impl IamCommand for GetAttachedRolePolicyList {
    type Request = ListAttachedRolePoliciesRequest;
    type Response = ListAttachedRolePoliciesResponse;
    type Output = AttachedPolicy;
    const OPERATION: Operation = Operation::ListAttachedRolePolicies;

    fn build_request(&self) -> ListAttachedRolePoliciesRequest {
        ListAttachedRolePoliciesRequest {
            role_name: self.role_name.clone(),
            path_prefix: self.path_prefix.clone(),
            marker: self.paging.marker.clone(),
            max_items: self.paging.max_items,
        }
    }

    fn project(&self, response: &ListAttachedRolePoliciesResponse) -> Vec<AttachedPolicy> {
        response.attached_policies.clone()
    }

    fn next_marker(response: &ListAttachedRolePoliciesResponse) -> Option<String> {
        response.next_marker().map(str::to_string)
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.role_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.role_name = value;
    }
}

/// Add or replace an inline policy on a role
#[derive(Args, Debug, Clone)]
pub struct WriteRolePolicy {
    /// Role name, or `-` to read names from stdin
    pub role_name: String,

    /// Name of the inline policy
    #[arg(long)]
    pub policy_name: String,

    /// Policy document, as JSON or `file://PATH`
    #[arg(long, value_parser = policy_document)]
    pub policy_document: String,

    /// Print the role name after a successful write
    #[arg(long)]
    pub pass_thru: bool,
}

impl IamCommand for WriteRolePolicy {
    type Request = PutRolePolicyRequest;
    type Response = PutRolePolicyResponse;
    type Output = String;
    const OPERATION: Operation = Operation::PutRolePolicy;

    fn build_request(&self) -> PutRolePolicyRequest {
        PutRolePolicyRequest {
            role_name: self.role_name.clone(),
            policy_name: self.policy_name.clone(),
            policy_document: self.policy_document.clone(),
        }
    }

    fn project(&self, _response: &PutRolePolicyResponse) -> Vec<String> {
        pass_thru(self.pass_thru, &self.role_name)
    }

    fn target(&self) -> String {
        format!("{} (policy {})", self.role_name, self.policy_name)
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.role_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.role_name = value;
    }
}

//! Group commands

use super::Paging;
use clap::Args;
use iamctl_core::model::Group;
use iamctl_core::request::{
    AddUserToGroupRequest, CreateGroupRequest, DeleteGroupRequest, GetGroupRequest,
    ListGroupsForUserRequest, ListGroupsRequest, RemoveUserFromGroupRequest,
};
use iamctl_core::response::{
    AddUserToGroupResponse, CreateGroupResponse, DeleteGroupResponse, GetGroupResponse,
    ListGroupsForUserResponse, ListGroupsResponse, Paginated, RemoveUserFromGroupResponse,
};
use iamctl_core::{IamCommand, Operation, pass_thru};

/// Show a group together with its members
#[derive(Args, Debug, Clone)]
pub struct GetGroup {
    /// Group name, or `-` to read names from stdin
    pub group_name: String,

    #[command(flatten)]
    pub paging: Paging,
}

impl IamCommand for GetGroup {
    type Request = GetGroupRequest;
    type Response = GetGroupResponse;
    type Output = GetGroupResponse;
    const OPERATION: Operation = Operation::GetGroup;

    fn build_request(&self) -> GetGroupRequest {
        GetGroupRequest {
            group_name: self.group_name.clone(),
            marker: self.paging.marker.clone(),
            max_items: self.paging.max_items,
        }
    }

    fn project(&self, response: &GetGroupResponse) -> Vec<GetGroupResponse> {
        vec![response.clone()]
    }

    fn next_marker(response: &GetGroupResponse) -> Option<String> {
        response.next_marker().map(str::to_string)
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.group_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.group_name = value;
    }
}

/// List groups
#[derive(Args, Debug, Clone)]
pub struct GetGroupList {
    /// Only groups whose path starts with this prefix
    #[arg(long)]
    pub path_prefix: Option<String>,

    #[command(flatten)]
    pub paging: Paging,
}

impl IamCommand for GetGroupList {
    type Request = ListGroupsRequest;
    type Response = ListGroupsResponse;
    type Output = Group;
    const OPERATION: Operation = Operation::ListGroups;

    fn build_request(&self) -> ListGroupsRequest {
        ListGroupsRequest {
            path_prefix: self.path_prefix.clone(),
            marker: self.paging.marker.clone(),
            max_items: self.paging.max_items,
        }
    }

    fn project(&self, response: &ListGroupsResponse) -> Vec<Group> {
        response.groups.clone()
    }

    fn next_marker(response: &ListGroupsResponse) -> Option<String> {
        response.next_marker().map(str::to_string)
    }
}

/// List the groups a user belongs to
#[derive(Args, Debug, Clone)]
pub struct GetGroupForUser {
    /// User name, or `-` to read names from stdin
    pub user_name: String,

    #[command(flatten)]
    pub paging: Paging,
}

impl IamCommand for GetGroupForUser {
    type Request = ListGroupsForUserRequest;
    type Response = ListGroupsForUserResponse;
    type Output = Group;
    const OPERATION: Operation = Operation::ListGroupsForUser;

    fn build_request(&self) -> ListGroupsForUserRequest {
        ListGroupsForUserRequest {
            user_name: self.user_name.clone(),
            marker: self.paging.marker.clone(),
            max_items: self.paging.max_items,
        }
    }

    fn project(&self, response: &ListGroupsForUserResponse) -> Vec<Group> {
        response.groups.clone()
    }

    fn next_marker(response: &ListGroupsForUserResponse) -> Option<String> {
        response.next_marker().map(str::to_string)
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.user_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.user_name = value;
    }
}

/// Create a group
#[derive(Args, Debug, Clone)]
pub struct NewGroup {
    /// Name of the new group, or `-` to read names from stdin
    pub group_name: String,

    /// Path for the group
    #[arg(long)]
    pub path: Option<String>,
}

impl IamCommand for NewGroup {
    type Request = CreateGroupRequest;
    type Response = CreateGroupResponse;
    type Output = Group;
    const OPERATION: Operation = Operation::CreateGroup;

    fn build_request(&self) -> CreateGroupRequest {
        CreateGroupRequest {
            group_name: self.group_name.clone(),
            path: self.path.clone(),
        }
    }

    fn project(&self, response: &CreateGroupResponse) -> Vec<Group> {
        vec![response.group.clone()]
    }

    fn target(&self) -> String {
        self.group_name.clone()
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.group_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.group_name = value;
    }
}

/// Delete a group
#[derive(Args, Debug, Clone)]
pub struct RemoveGroup {
    /// Group name, or `-` to read names from stdin
    pub group_name: String,

    /// Print the group name after a successful delete
    #[arg(long)]
    pub pass_thru: bool,
}

impl IamCommand for RemoveGroup {
    type Request = DeleteGroupRequest;
    type Response = DeleteGroupResponse;
    type Output = String;
    const OPERATION: Operation = Operation::DeleteGroup;

    fn build_request(&self) -> DeleteGroupRequest {
        DeleteGroupRequest {
            group_name: self.group_name.clone(),
        }
    }

    fn project(&self, _response: &DeleteGroupResponse) -> Vec<String> {
        pass_thru(self.pass_thru, &self.group_name)
    }

    fn target(&self) -> String {
        self.group_name.clone()
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.group_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.group_name = value;
    }
}

/// Add a user to a group
#[derive(Args, Debug, Clone)]
pub struct AddUserToGroup {
    /// User name, or `-` to read names from stdin
    pub user_name: String,

    /// Group to add the user to
    #[arg(long)]
    pub group_name: String,

    /// Print the user name after a successful add
    #[arg(long)]
    pub pass_thru: bool,
}

impl IamCommand for AddUserToGroup {
    type Request = AddUserToGroupRequest;
    type Response = AddUserToGroupResponse;
    type Output = String;
    const OPERATION: Operation = Operation::AddUserToGroup;

    fn build_request(&self) -> AddUserToGroupRequest {
        AddUserToGroupRequest {
            group_name: self.group_name.clone(),
            user_name: self.user_name.clone(),
        }
    }

    fn project(&self, _response: &AddUserToGroupResponse) -> Vec<String> {
        pass_thru(self.pass_thru, &self.user_name)
    }

    fn target(&self) -> String {
        format!("{} (group {})", self.user_name, self.group_name)
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.user_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.user_name = value;
    }
}

/// Remove a user from a group
#[derive(Args, Debug, Clone)]
pub struct RemoveUserFromGroup {
    /// User name, or `-` to read names from stdin
    pub user_name: String,

    /// Group to remove the user from
    #[arg(long)]
    pub group_name: String,

    /// Print the user name after a successful removal
    #[arg(long)]
    pub pass_thru: bool,
}

impl IamCommand for RemoveUserFromGroup {
    type Request = RemoveUserFromGroupRequest;
    type Response = RemoveUserFromGroupResponse;
    type Output = String;
    const OPERATION: Operation = Operation::RemoveUserFromGroup;

    fn build_request(&self) -> RemoveUserFromGroupRequest {
        RemoveUserFromGroupRequest {
            group_name: self.group_name.clone(),
            user_name: self.user_name.clone(),
        }
    }

    fn project(&self, _response: &RemoveUserFromGroupResponse) -> Vec<String> {
        pass_thru(self.pass_thru, &self.user_name)
    }

    fn target(&self) -> String {
        format!("{} (group {})", self.user_name, self.group_name)
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.user_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.user_name = value;
    }
}

//! User commands

use super::Paging;
use clap::Args;
use iamctl_core::model::{Tag, User};
use iamctl_core::request::{
    CreateUserRequest, DeleteUserRequest, GetUserRequest, ListUsersRequest, UpdateUserRequest,
};
use iamctl_core::response::{
    CreateUserResponse, DeleteUserResponse, GetUserResponse, ListUsersResponse, Paginated,
    UpdateUserResponse,
};
use iamctl_core::{IamCommand, Operation, pass_thru};

/// Show a user; the calling identity when no name is given
#[derive(Args, Debug, Clone)]
pub struct GetUser {
    /// User name, or `-` to read names from stdin
    pub user_name: Option<String>,
}

impl IamCommand for GetUser {
    type Request = GetUserRequest;
    type Response = GetUserResponse;
    type Output = User;
    const OPERATION: Operation = Operation::GetUser;

    fn build_request(&self) -> GetUserRequest {
        GetUserRequest {
            user_name: self.user_name.clone(),
        }
    }

    fn project(&self, response: &GetUserResponse) -> Vec<User> {
        vec![response.user.clone()]
    }

    fn pipeline_value(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.user_name = Some(value);
    }
}

/// List users
#[derive(Args, Debug, Clone)]
pub struct GetUserList {
    /// Only users whose path starts with this prefix
    #[arg(long)]
    pub path_prefix: Option<String>,

    #[command(flatten)]
    pub paging: Paging,
}

impl IamCommand for GetUserList {
    type Request = ListUsersRequest;
    type Response = ListUsersResponse;
    type Output = User;
    const OPERATION: Operation = Operation::ListUsers;

    fn build_request(&self) -> ListUsersRequest {
        ListUsersRequest {
            path_prefix: self.path_prefix.clone(),
            marker: self.paging.marker.clone(),
            max_items: self.paging.max_items,
        }
    }

    fn project(&self, response: &ListUsersResponse) -> Vec<User> {
        response.users.clone()
    }

    fn next_marker(response: &ListUsersResponse) -> Option<String> {
        response.next_marker().map(str::to_string)
    }
}

/// Create a user
#[derive(Args, Debug, Clone)]
pub struct NewUser {
    /// Name of the new user, or `-` to read names from stdin
    pub user_name: String,

    /// Path for the user, e.g. `/engineering/`
    #[arg(long)]
    pub path: Option<String>,

    /// ARN of the managed policy used as permissions boundary
    #[arg(long)]
    pub permissions_boundary: Option<String>,

    /// Tag to attach, as KEY=VALUE (repeatable)
    #[arg(long = "tag", value_name = "KEY=VALUE")]
    pub tags: Vec<Tag>,
}

impl IamCommand for NewUser {
    type Request = CreateUserRequest;
    type Response = CreateUserResponse;
    type Output = User;
    const OPERATION: Operation = Operation::CreateUser;

    fn build_request(&self) -> CreateUserRequest {
        CreateUserRequest {
            user_name: self.user_name.clone(),
            path: self.path.clone(),
            permissions_boundary: self.permissions_boundary.clone(),
            tags: (!self.tags.is_empty()).then(|| self.tags.clone()),
        }
    }

    fn project(&self, response: &CreateUserResponse) -> Vec<User> {
        vec![response.user.clone()]
    }

    fn target(&self) -> String {
        self.user_name.clone()
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.user_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.user_name = value;
    }
}

/// Rename a user or change its path
#[derive(Args, Debug, Clone)]
pub struct UpdateUser {
    /// Current user name, or `-` to read names from stdin
    pub user_name: String,

    /// New path for the user
    #[arg(long)]
    pub new_path: Option<String>,

    /// New name for the user
    #[arg(long)]
    pub new_user_name: Option<String>,

    /// Print the user name after a successful update
    #[arg(long)]
    pub pass_thru: bool,
}

impl IamCommand for UpdateUser {
    type Request = UpdateUserRequest;
    type Response = UpdateUserResponse;
    type Output = String;
    const OPERATION: Operation = Operation::UpdateUser;

    fn build_request(&self) -> UpdateUserRequest {
        UpdateUserRequest {
            user_name: self.user_name.clone(),
            new_path: self.new_path.clone(),
            new_user_name: self.new_user_name.clone(),
        }
    }

    fn project(&self, _response: &UpdateUserResponse) -> Vec<String> {
        pass_thru(self.pass_thru, &self.user_name)
    }

    fn target(&self) -> String {
        self.user_name.clone()
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.user_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.user_name = value;
    }
}

/// Delete a user
#[derive(Args, Debug, Clone)]
pub struct RemoveUser {
    /// User name, or `-` to read names from stdin
    pub user_name: String,

    /// Print the user name after a successful delete
    #[arg(long)]
    pub pass_thru: bool,
}

impl IamCommand for RemoveUser {
    type Request = DeleteUserRequest;
    type Response = DeleteUserResponse;
    type Output = String;
    const OPERATION: Operation = Operation::DeleteUser;

    fn build_request(&self) -> DeleteUserRequest {
        DeleteUserRequest {
            user_name: self.user_name.clone(),
        }
    }

    fn project(&self, _response: &DeleteUserResponse) -> Vec<String> {
        pass_thru(self.pass_thru, &self.user_name)
    }

    fn target(&self) -> String {
        self.user_name.clone()
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.user_name)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.user_name = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::commands::Command;
    use clap::Parser;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("iamctl").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn get_user_without_name_leaves_field_absent() {
        let Command::GetUser(cmd) = parse(&["get-user"]) else {
            panic!("expected get-user");
        };
        assert_eq!(cmd.build_request(), GetUserRequest { user_name: None });
    }

    #[test]
    fn max_items_zero_is_sent() {
        let Command::GetUserList(cmd) = parse(&["get-user-list", "--max-items", "0"]) else {
            panic!("expected get-user-list");
        };
        assert_eq!(
            cmd.build_request(),
            ListUsersRequest {
                path_prefix: None,
                marker: None,
                max_items: Some(0),
            }
        );
    }

    #[test]
    fn list_aliases_are_accepted() {
        assert!(matches!(
            parse(&["get-users", "--next-token", "abc", "--max-item", "5"]),
            Command::GetUserList(GetUserList {
                paging: Paging {
                    marker: Some(_),
                    max_items: Some(5)
                },
                ..
            })
        ));
    }

    #[test]
    fn new_user_tags_are_parsed() {
        let Command::NewUser(cmd) = parse(&["new-user", "alice", "--tag", "team=infra", "--tag", "env=prod"])
        else {
            panic!("expected new-user");
        };
        let request = cmd.build_request();
        assert_eq!(
            request.tags,
            Some(vec![Tag::new("team", "infra"), Tag::new("env", "prod")])
        );
        assert_eq!(request.path, None);
    }

    #[test]
    fn new_user_without_tags_sends_none() {
        let Command::NewUser(cmd) = parse(&["new-user", "alice"]) else {
            panic!("expected new-user");
        };
        assert_eq!(cmd.build_request().tags, None);
    }

    #[test]
    fn malformed_tag_is_rejected() {
        assert!(
            Cli::try_parse_from(["iamctl", "new-user", "alice", "--tag", "novalue"]).is_err()
        );
    }

    #[test]
    fn remove_user_pass_thru() {
        let cmd = RemoveUser {
            user_name: "alice".to_string(),
            pass_thru: true,
        };
        assert_eq!(cmd.project(&DeleteUserResponse {}), vec!["alice".to_string()]);
        assert_eq!(cmd.target(), "alice");
    }
}

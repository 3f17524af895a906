//! Command catalogue
//!
//! Each command is a `clap::Args` struct implementing [`IamCommand`]. The
//! identifying parameter is positional and accepts `-` to read one value
//! per line from stdin.

pub mod access_keys;
pub mod account;
pub mod groups;
pub mod login_profiles;
pub mod roles;
pub mod users;

use crate::config::ConfirmMode;
use crate::session::{Session, Streams, Summary};
use anyhow::Result;
use clap::{Args, Subcommand};
use iamctl_core::{ClientFactory, IamCommand, Operation};

/// Continuation options shared by list commands
#[derive(Args, Debug, Clone, Default)]
pub struct Paging {
    /// Continue a truncated listing from this marker
    #[arg(long, visible_alias = "next-token")]
    pub marker: Option<String>,

    /// Maximum number of items to return in one response
    #[arg(long, visible_alias = "max-item")]
    pub max_items: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a user; the calling identity when no name is given
    GetUser(users::GetUser),
    /// List users
    #[command(visible_alias = "get-users")]
    GetUserList(users::GetUserList),
    /// Create a user
    NewUser(users::NewUser),
    /// Rename a user or change its path
    UpdateUser(users::UpdateUser),
    /// Delete a user
    RemoveUser(users::RemoveUser),

    /// Show a group together with its members
    GetGroup(groups::GetGroup),
    /// List groups
    #[command(visible_alias = "get-groups")]
    GetGroupList(groups::GetGroupList),
    /// List the groups a user belongs to
    #[command(visible_alias = "get-groups-for-user")]
    GetGroupForUser(groups::GetGroupForUser),
    /// Create a group
    NewGroup(groups::NewGroup),
    /// Delete a group
    RemoveGroup(groups::RemoveGroup),
    /// Add a user to a group
    AddUserToGroup(groups::AddUserToGroup),
    /// Remove a user from a group
    RemoveUserFromGroup(groups::RemoveUserFromGroup),

    /// Show a role
    GetRole(roles::GetRole),
    /// List roles
    #[command(visible_alias = "get-roles")]
    GetRoleList(roles::GetRoleList),
    /// Create a role
    NewRole(roles::NewRole),
    /// Delete a role
    RemoveRole(roles::RemoveRole),
    /// Attach a managed policy to a role
    RegisterRolePolicy(roles::RegisterRolePolicy),
    /// Detach a managed policy from a role
    UnregisterRolePolicy(roles::UnregisterRolePolicy),
    /// List the managed policies attached to a role
    #[command(visible_alias = "get-attached-role-policies")]
    GetAttachedRolePolicyList(roles::GetAttachedRolePolicyList),
    /// Add or replace an inline policy on a role
    WriteRolePolicy(roles::WriteRolePolicy),

    /// List access keys of a user
    #[command(visible_alias = "get-access-keys")]
    GetAccessKey(access_keys::GetAccessKey),
    /// Create an access key; the secret is only shown once
    NewAccessKey(access_keys::NewAccessKey),
    /// Activate or deactivate an access key
    UpdateAccessKey(access_keys::UpdateAccessKey),
    /// Delete an access key
    RemoveAccessKey(access_keys::RemoveAccessKey),

    /// Give a user a console password
    NewLoginProfile(login_profiles::NewLoginProfile),
    /// Show a user's login profile
    GetLoginProfile(login_profiles::GetLoginProfile),

    /// List the account alias
    #[command(visible_alias = "get-account-aliases")]
    GetAccountAlias(account::GetAccountAlias),
    /// Show entity usage and quotas for the account
    GetAccountSummary(account::GetAccountSummary),
}

/// Expand `$body` once per command variant with `$cmd` bound to the inner
/// parameter struct
macro_rules! for_each_command {
    ($command:expr, $cmd:ident => $body:expr) => {
        match $command {
            Command::GetUser($cmd) => $body,
            Command::GetUserList($cmd) => $body,
            Command::NewUser($cmd) => $body,
            Command::UpdateUser($cmd) => $body,
            Command::RemoveUser($cmd) => $body,
            Command::GetGroup($cmd) => $body,
            Command::GetGroupList($cmd) => $body,
            Command::GetGroupForUser($cmd) => $body,
            Command::NewGroup($cmd) => $body,
            Command::RemoveGroup($cmd) => $body,
            Command::AddUserToGroup($cmd) => $body,
            Command::RemoveUserFromGroup($cmd) => $body,
            Command::GetRole($cmd) => $body,
            Command::GetRoleList($cmd) => $body,
            Command::NewRole($cmd) => $body,
            Command::RemoveRole($cmd) => $body,
            Command::RegisterRolePolicy($cmd) => $body,
            Command::UnregisterRolePolicy($cmd) => $body,
            Command::GetAttachedRolePolicyList($cmd) => $body,
            Command::WriteRolePolicy($cmd) => $body,
            Command::GetAccessKey($cmd) => $body,
            Command::NewAccessKey($cmd) => $body,
            Command::UpdateAccessKey($cmd) => $body,
            Command::RemoveAccessKey($cmd) => $body,
            Command::NewLoginProfile($cmd) => $body,
            Command::GetLoginProfile($cmd) => $body,
            Command::GetAccountAlias($cmd) => $body,
            Command::GetAccountSummary($cmd) => $body,
        }
    };
}

fn operation_of<C: IamCommand>(_command: &C) -> Operation {
    C::OPERATION
}

impl Command {
    /// The IAM operation this command drives
    pub fn operation(&self) -> Operation {
        for_each_command!(self, cmd => operation_of(cmd))
    }

    /// Gather interactive input the command needs before it is bound.
    ///
    /// A run that cannot be confirmed fails before anything is asked, and
    /// `--what-if` never asks for a password.
    fn prepare<F: ClientFactory>(&mut self, session: &Session<F>) -> Result<()> {
        if let Command::NewLoginProfile(cmd) = self {
            session.ensure_confirmable(cmd)?;
            if session.confirm_mode() != ConfirmMode::WhatIf {
                cmd.resolve_password()?;
            }
        }
        Ok(())
    }

    /// Bind, confirm and dispatch the command
    pub async fn run<F: ClientFactory>(
        mut self,
        session: &Session<F>,
        streams: &mut Streams<'_>,
    ) -> Result<Summary> {
        self.prepare(session)?;
        for_each_command!(self, cmd => session.execute(cmd, streams).await)
    }
}

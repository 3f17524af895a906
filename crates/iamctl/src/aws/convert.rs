//! Conversions between SDK shapes and iamctl model types

use aws_sdk_iam::primitives::DateTime as SdkDateTime;
use aws_sdk_iam::types as sdk;
use chrono::{DateTime, Utc};
use iamctl_core::model::{
    AccessKey, AccessKeyMetadata, AttachedPolicy, Group, LoginProfile, PermissionsBoundary, Role,
    StatusType, Tag, User,
};
use thiserror::Error;

/// A response field could not be represented
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Malformed(pub String);

pub fn timestamp(value: &SdkDateTime) -> Result<DateTime<Utc>, Malformed> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
        .ok_or_else(|| Malformed(format!("timestamp out of range: {value:?}")))
}

fn optional_timestamp(value: Option<&SdkDateTime>) -> Result<Option<DateTime<Utc>>, Malformed> {
    value.map(timestamp).transpose()
}

/// Unwrap a field the service always sends
pub fn required<'a, T>(value: Option<&'a T>, field: &str) -> Result<&'a T, Malformed> {
    value.ok_or_else(|| Malformed(format!("missing field '{field}'")))
}

pub fn tag(value: &sdk::Tag) -> Tag {
    Tag::new(value.key(), value.value())
}

pub fn sdk_tags(tags: Option<Vec<Tag>>) -> Result<Option<Vec<sdk::Tag>>, String> {
    tags.map(|tags| {
        tags.into_iter()
            .map(|t| {
                sdk::Tag::builder()
                    .key(t.key)
                    .value(t.value)
                    .build()
                    .map_err(|e| format!("Failed to build IAM tag: {e}"))
            })
            .collect()
    })
    .transpose()
}

fn permissions_boundary(value: &sdk::AttachedPermissionsBoundary) -> PermissionsBoundary {
    PermissionsBoundary {
        permissions_boundary_type: value
            .permissions_boundary_type()
            .map(|t| t.as_str().to_string()),
        permissions_boundary_arn: value.permissions_boundary_arn().map(str::to_string),
    }
}

pub fn user(value: &sdk::User) -> Result<User, Malformed> {
    Ok(User {
        path: value.path().to_string(),
        user_name: value.user_name().to_string(),
        user_id: value.user_id().to_string(),
        arn: value.arn().to_string(),
        create_date: timestamp(value.create_date())?,
        password_last_used: optional_timestamp(value.password_last_used())?,
        permissions_boundary: value.permissions_boundary().map(permissions_boundary),
        tags: value.tags().iter().map(tag).collect(),
    })
}

pub fn users(values: &[sdk::User]) -> Result<Vec<User>, Malformed> {
    values.iter().map(user).collect()
}

pub fn group(value: &sdk::Group) -> Result<Group, Malformed> {
    Ok(Group {
        path: value.path().to_string(),
        group_name: value.group_name().to_string(),
        group_id: value.group_id().to_string(),
        arn: value.arn().to_string(),
        create_date: timestamp(value.create_date())?,
    })
}

pub fn groups(values: &[sdk::Group]) -> Result<Vec<Group>, Malformed> {
    values.iter().map(group).collect()
}

pub fn role(value: &sdk::Role) -> Result<Role, Malformed> {
    Ok(Role {
        path: value.path().to_string(),
        role_name: value.role_name().to_string(),
        role_id: value.role_id().to_string(),
        arn: value.arn().to_string(),
        create_date: timestamp(value.create_date())?,
        description: value.description().map(str::to_string),
        assume_role_policy_document: value.assume_role_policy_document().map(str::to_string),
        max_session_duration: value.max_session_duration(),
        permissions_boundary: value.permissions_boundary().map(permissions_boundary),
        tags: value.tags().iter().map(tag).collect(),
    })
}

pub fn roles(values: &[sdk::Role]) -> Result<Vec<Role>, Malformed> {
    values.iter().map(role).collect()
}

pub fn attached_policy(value: &sdk::AttachedPolicy) -> AttachedPolicy {
    AttachedPolicy {
        policy_name: value.policy_name().map(str::to_string),
        policy_arn: value.policy_arn().map(str::to_string),
    }
}

pub fn status(value: &sdk::StatusType) -> Result<StatusType, Malformed> {
    match value {
        sdk::StatusType::Active => Ok(StatusType::Active),
        sdk::StatusType::Inactive => Ok(StatusType::Inactive),
        other => Err(Malformed(format!("unknown access key status '{}'", other.as_str()))),
    }
}

pub fn sdk_status(value: StatusType) -> sdk::StatusType {
    match value {
        StatusType::Active => sdk::StatusType::Active,
        StatusType::Inactive => sdk::StatusType::Inactive,
    }
}

pub fn access_key_metadata(value: &sdk::AccessKeyMetadata) -> Result<AccessKeyMetadata, Malformed> {
    Ok(AccessKeyMetadata {
        user_name: value.user_name().map(str::to_string),
        access_key_id: value.access_key_id().map(str::to_string),
        status: value.status().map(status).transpose()?,
        create_date: optional_timestamp(value.create_date())?,
    })
}

pub fn access_key(value: &sdk::AccessKey) -> Result<AccessKey, Malformed> {
    Ok(AccessKey {
        user_name: value.user_name().to_string(),
        access_key_id: value.access_key_id().to_string(),
        status: status(value.status())?,
        secret_access_key: value.secret_access_key().to_string(),
        create_date: optional_timestamp(value.create_date())?,
    })
}

pub fn login_profile(value: &sdk::LoginProfile) -> Result<LoginProfile, Malformed> {
    Ok(LoginProfile {
        user_name: value.user_name().to_string(),
        create_date: timestamp(value.create_date())?,
        password_reset_required: value.password_reset_required(),
    })
}

//! Access key commands

use super::Paging;
use clap::Args;
use iamctl_core::model::{AccessKey, AccessKeyMetadata, StatusType};
use iamctl_core::request::{
    CreateAccessKeyRequest, DeleteAccessKeyRequest, ListAccessKeysRequest, UpdateAccessKeyRequest,
};
use iamctl_core::response::{
    CreateAccessKeyResponse, DeleteAccessKeyResponse, ListAccessKeysResponse, Paginated,
    UpdateAccessKeyResponse,
};
use iamctl_core::{IamCommand, Operation, pass_thru};

/// List access keys of a user; the calling identity when no name is given
#[derive(Args, Debug, Clone)]
pub struct GetAccessKey {
    /// User name, or `-` to read names from stdin
    pub user_name: Option<String>,

    #[command(flatten)]
    pub paging: Paging,
}

impl IamCommand for GetAccessKey {
    type Request = ListAccessKeysRequest;
    type Response = ListAccessKeysResponse;
    type Output = AccessKeyMetadata;
    const OPERATION: Operation = Operation::ListAccessKeys;

    fn build_request(&self) -> ListAccessKeysRequest {
        ListAccessKeysRequest {
            user_name: self.user_name.clone(),
            marker: self.paging.marker.clone(),
            max_items: self.paging.max_items,
        }
    }

    fn project(&self, response: &ListAccessKeysResponse) -> Vec<AccessKeyMetadata> {
        response.access_key_metadata.clone()
    }

    fn next_marker(response: &ListAccessKeysResponse) -> Option<String> {
        response.next_marker().map(str::to_string)
    }

    fn pipeline_value(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.user_name = Some(value);
    }
}

/// Create an access key. The secret is only shown once.
#[derive(Args, Debug, Clone)]
pub struct NewAccessKey {
    /// User name, or `-` to read names from stdin
    pub user_name: Option<String>,
}

impl IamCommand for NewAccessKey {
    type Request = CreateAccessKeyRequest;
    type Response = CreateAccessKeyResponse;
    type Output = AccessKey;
    const OPERATION: Operation = Operation::CreateAccessKey;

    fn build_request(&self) -> CreateAccessKeyRequest {
        CreateAccessKeyRequest {
            user_name: self.user_name.clone(),
        }
    }

    fn project(&self, response: &CreateAccessKeyResponse) -> Vec<AccessKey> {
        vec![response.access_key.clone()]
    }

    fn target(&self) -> String {
        self.user_name
            .clone()
            .unwrap_or_else(|| "current user".to_string())
    }

    fn pipeline_value(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.user_name = Some(value);
    }
}

/// Activate or deactivate an access key
#[derive(Args, Debug, Clone)]
pub struct UpdateAccessKey {
    /// Access key ID, or `-` to read IDs from stdin
    pub access_key_id: String,

    /// New status: Active or Inactive
    #[arg(long)]
    pub status: StatusType,

    /// Owner of the key; the calling identity when omitted
    #[arg(long)]
    pub user_name: Option<String>,

    /// Print the access key ID after a successful update
    #[arg(long)]
    pub pass_thru: bool,
}

impl IamCommand for UpdateAccessKey {
    type Request = UpdateAccessKeyRequest;
    type Response = UpdateAccessKeyResponse;
    type Output = String;
    const OPERATION: Operation = Operation::UpdateAccessKey;

    fn build_request(&self) -> UpdateAccessKeyRequest {
        UpdateAccessKeyRequest {
            access_key_id: self.access_key_id.clone(),
            status: self.status,
            user_name: self.user_name.clone(),
        }
    }

    fn project(&self, _response: &UpdateAccessKeyResponse) -> Vec<String> {
        pass_thru(self.pass_thru, &self.access_key_id)
    }

    fn target(&self) -> String {
        format!("{} (set {})", self.access_key_id, self.status)
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.access_key_id)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.access_key_id = value;
    }
}

/// Delete an access key
#[derive(Args, Debug, Clone)]
pub struct RemoveAccessKey {
    /// Access key ID, or `-` to read IDs from stdin
    pub access_key_id: String,

    /// Owner of the key; the calling identity when omitted
    #[arg(long)]
    pub user_name: Option<String>,

    /// Print the access key ID after a successful delete
    #[arg(long)]
    pub pass_thru: bool,
}

impl IamCommand for RemoveAccessKey {
    type Request = DeleteAccessKeyRequest;
    type Response = DeleteAccessKeyResponse;
    type Output = String;
    const OPERATION: Operation = Operation::DeleteAccessKey;

    fn build_request(&self) -> DeleteAccessKeyRequest {
        DeleteAccessKeyRequest {
            access_key_id: self.access_key_id.clone(),
            user_name: self.user_name.clone(),
        }
    }

    fn project(&self, _response: &DeleteAccessKeyResponse) -> Vec<String> {
        pass_thru(self.pass_thru, &self.access_key_id)
    }

    fn target(&self) -> String {
        self.access_key_id.clone()
    }

    fn pipeline_value(&self) -> Option<&str> {
        Some(&self.access_key_id)
    }

    fn bind_pipeline_value(&mut self, value: String) {
        self.access_key_id = value;
    }
}

//! AWS SDK adapter
//!
//! This module provides the SDK-backed implementation of the IAM service
//! seam:
//! - context: configuration loading per set of connection settings
//! - iam: request execution for every supported operation
//! - convert: SDK shapes to iamctl model types
//! - error: `SdkError` classification

pub mod context;
pub mod convert;
pub mod error;
pub mod iam;

pub use context::AwsContext;
pub use error::classify_sdk_error;
pub use iam::{AwsClientFactory, IamClient};

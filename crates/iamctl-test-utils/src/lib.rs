//! Shared test utilities for iamctl
//!
//! ## Modules
//!
//! - [`aws`]: AWS region detection and unique names for live tests
//! - [`fake`]: in-memory IAM service that records every request
//! - [`fixtures`]: sample IAM resources

pub mod aws;
pub mod fake;
pub mod fixtures;

pub use aws::{get_test_region, test_run_id};
pub use fake::{RecordingFactory, RecordingIamService};

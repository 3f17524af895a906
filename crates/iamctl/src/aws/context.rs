//! Shared AWS configuration context
//!
//! Provides `AwsContext` for loading AWS SDK configuration for one set of
//! connection settings and creating IAM clients from it.

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_iam::config::Credentials;
use iamctl_core::{ConnectionSettings, DEFAULT_REGION};
use std::sync::Arc;
use tracing::debug;

/// Provider name reported for credentials passed on the command line
const STATIC_CREDENTIALS_PROVIDER: &str = "iamctl-command-line";

/// Loaded AWS configuration for one set of connection settings.
#[derive(Clone)]
pub struct AwsContext {
    config: Arc<SdkConfig>,
    region: String,
}

impl AwsContext {
    /// Load AWS configuration.
    ///
    /// The region comes from the settings, then the environment and shared
    /// config files, then [`DEFAULT_REGION`]. Explicit credentials replace
    /// the default provider chain.
    pub async fn load(settings: &ConnectionSettings) -> Self {
        let region = RegionProviderChain::first_try(settings.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::from_static(DEFAULT_REGION));

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint_url) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        if let Some(credentials) = &settings.credentials {
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                credentials.session_token.clone(),
                None,
                STATIC_CREDENTIALS_PROVIDER,
            ));
        }

        let config = loader.load().await;
        let region = config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        debug!(region = %region, "Loaded AWS configuration");

        Self {
            config: Arc::new(config),
            region,
        }
    }

    /// Get the underlying SDK config for direct client construction.
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.config
    }

    /// Region the configuration resolved to
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Create an IAM client from this context.
    pub fn iam_client(&self) -> aws_sdk_iam::Client {
        aws_sdk_iam::Client::new(self.sdk_config())
    }
}

impl std::fmt::Debug for AwsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsContext")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iamctl_core::StaticCredentials;

    #[tokio::test]
    async fn explicit_region_wins() {
        let ctx = AwsContext::load(&ConnectionSettings {
            region: Some("eu-central-1".to_string()),
            credentials: Some(StaticCredentials {
                access_key_id: "AKIAEXAMPLE".to_string(),
                secret_access_key: "secret".to_string(),
                session_token: None,
            }),
            ..Default::default()
        })
        .await;
        assert_eq!(ctx.region(), "eu-central-1");
        assert!(!format!("{ctx:?}").contains("secret"));
    }

    #[tokio::test]
    async fn endpoint_override_is_applied() {
        let ctx = AwsContext::load(&ConnectionSettings {
            region: Some("us-east-1".to_string()),
            endpoint_url: Some("http://localhost:4566".to_string()),
            ..Default::default()
        })
        .await;
        assert_eq!(ctx.sdk_config().endpoint_url(), Some("http://localhost:4566"));
    }
}

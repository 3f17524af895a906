//! Connection settings and the per-invocation execution context

use std::fmt;
use uuid::Uuid;

/// Region used when neither the caller nor the environment names one.
///
/// IAM is a global service; its endpoint is reached through this region.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Explicit credentials supplied on the command line
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .finish_non_exhaustive()
    }
}

/// Where and as whom to connect. Also the key of the client cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConnectionSettings {
    /// Region override; `None` defers to the environment / profile
    pub region: Option<String>,
    /// Named profile from the shared AWS config files
    pub profile: Option<String>,
    /// Custom endpoint, e.g. a local IAM emulator
    pub endpoint_url: Option<String>,
    /// Explicit credentials, taking precedence over the default chain
    pub credentials: Option<StaticCredentials>,
}

impl ConnectionSettings {
    /// Region for messages: the explicit one, or what the default chain falls back to
    pub fn region_label(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }
}

/// Everything one invocation needs: connection settings and bound parameters.
///
/// Created by the binder and consumed by the dispatcher, so a context can
/// only ever serve a single invocation.
#[derive(Debug)]
pub struct ExecutionContext<C> {
    invocation_id: Uuid,
    settings: ConnectionSettings,
    command: C,
}

impl<C> ExecutionContext<C> {
    pub fn new(settings: ConnectionSettings, command: C) -> Self {
        Self {
            invocation_id: Uuid::now_v7(),
            settings,
            command,
        }
    }

    /// Unique id used to correlate log lines of this invocation
    pub fn invocation_id(&self) -> Uuid {
        self.invocation_id
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// The bound parameters
    pub fn command(&self) -> &C {
        &self.command
    }
}

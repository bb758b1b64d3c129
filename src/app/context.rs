use crate::domain::OnboardConfig;
use crate::ports::PostmanApi;

/// Application context holding dependencies for command execution.
pub struct AppContext<C: PostmanApi> {
    client: C,
    config: OnboardConfig,
}

impl<C: PostmanApi> AppContext<C> {
    /// Create a new application context.
    pub fn new(client: C, config: OnboardConfig) -> Self {
        Self { client, config }
    }

    /// Get a reference to the Postman client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Get a reference to the resolved configuration.
    pub fn config(&self) -> &OnboardConfig {
        &self.config
    }

    /// Target workspace.
    pub fn workspace_id(&self) -> &str {
        &self.config.workspace_id
    }
}

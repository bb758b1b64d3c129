pub mod fake_postman_client;

pub use fake_postman_client::FakePostmanClient;

use crate::app::AppContext;
use crate::domain::{ConfigFile, OnboardConfig};

pub const TEST_WORKSPACE: &str = "ws-test";

/// Context over `client` with no polling or cleanup delays.
pub fn test_context(client: FakePostmanClient) -> AppContext<FakePostmanClient> {
    let mut file = ConfigFile::default();
    file.generation.poll_attempts = 5;
    file.generation.poll_delay_ms = 0;
    file.generation.cleanup_delay_ms = 0;
    AppContext::new(client, OnboardConfig::new("test-key".into(), TEST_WORKSPACE.into(), file))
}

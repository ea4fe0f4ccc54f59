use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use bookshelf_config::{Config, ConfigLoader, EnvConfig};
use bookshelf_core::{
    covers::{
        CoverOrchestrator, CoverSource, FetchTarget, RemoteCallError, TargetPlan,
    },
    database::InMemoryBooksRepository,
};
use bookshelf_model::BookCover;
use bookshelf_server::{AppState, create_app};

/// Answers immediately with a tiny cover, except for faulted targets which
/// fail after `fault_delay`.
#[derive(Debug, Clone)]
pub struct StubCoverSource {
    pub fault_delay: Duration,
}

impl Default for StubCoverSource {
    fn default() -> Self {
        Self {
            fault_delay: Duration::from_millis(50),
        }
    }
}

#[async_trait]
impl CoverSource for StubCoverSource {
    async fn download(
        &self,
        target: &FetchTarget,
    ) -> Result<BookCover, RemoteCallError> {
        if target.return_fault || target.cover_id.contains("broken") {
            tokio::time::sleep(self.fault_delay).await;
            return Err(RemoteCallError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        Ok(BookCover::new(target.cover_id.clone(), vec![0xca, 0xfe]))
    }
}

// Not every test binary uses every helper
#[allow(unused)]
pub fn dev_config() -> Config {
    let env = EnvConfig {
        dev_mode: Some(true),
        ..EnvConfig::default()
    };
    ConfigLoader::new()
        .without_env_file()
        .with_env(env)
        .load()
        .unwrap()
        .config
}

#[allow(unused)]
pub fn state_with_source(
    source: Arc<dyn CoverSource>,
    plan: TargetPlan,
) -> AppState {
    AppState::new(
        Arc::new(InMemoryBooksRepository::seeded()),
        Arc::new(CoverOrchestrator::new(source, plan)),
        Arc::new(dev_config()),
    )
}

#[allow(unused)]
pub fn test_server(plan: TargetPlan) -> TestServer {
    let state = state_with_source(Arc::new(StubCoverSource::default()), plan);
    TestServer::new(create_app(state)).unwrap()
}

use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::DynCategoryRepository,
    config::ConnectionPool,
    repository::{CategoryRepository, InMemoryCategoryRepository},
    utils::{DependenciesInject, Metrics},
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub di_container: DependenciesInject,
    pub metrics: Arc<Mutex<Metrics>>,
}

impl AppState {
    /// State backed by the PostgreSQL `categories` table.
    pub async fn new(pool: ConnectionPool) -> Self {
        Self::with_repository(Arc::new(CategoryRepository::new(pool))).await
    }

    /// State backed by a process-local store; nothing survives a restart.
    pub async fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryCategoryRepository::new())).await
    }

    pub async fn with_repository(category_repository: DynCategoryRepository) -> Self {
        let mut registry = Registry::default();

        let metrics = Arc::new(Mutex::new(Metrics::new()));

        let di_container =
            DependenciesInject::new(category_repository, metrics.clone(), &mut registry).await;

        Self {
            registry: Arc::new(registry),
            di_container,
            metrics,
        }
    }
}

use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{DynCategoryRepository, DynCategoryService},
    service::CategoryService,
    utils::Metrics,
};

#[derive(Clone)]
pub struct DependenciesInject {
    pub category_service: DynCategoryService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("category_service", &"DynCategoryService")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(
        category_repository: DynCategoryRepository,
        metrics: Arc<Mutex<Metrics>>,
        registry: &mut Registry,
    ) -> Self {
        let category_service = Arc::new(
            CategoryService::new(category_repository, metrics.clone(), registry).await,
        ) as DynCategoryService;

        Self { category_service }
    }
}

use crate::{
    abstract_trait::{CategoryServiceTrait, DynCategoryRepository},
    domain::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
    model::category::CategoryDraft,
    utils::{AppError, Method, Metrics, Status as StatusUtils, TracingContext},
};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

#[derive(Clone)]
pub struct CategoryService {
    repository: DynCategoryRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl std::fmt::Debug for CategoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryService")
            .field("repository", &"DynCategoryRepository")
            .finish()
    }
}

impl CategoryService {
    pub async fn new(
        repository: DynCategoryRepository,
        metrics: Arc<Mutex<Metrics>>,
        registry: &mut Registry,
    ) -> Self {
        registry.register(
            "category_service_requests",
            "Total number of requests to the CategoryService",
            metrics.lock().await.request_counter.clone(),
        );
        registry.register(
            "category_service_request_duration_seconds",
            "Histogram of request durations for the CategoryService",
            metrics.lock().await.request_duration.clone(),
        );

        Self {
            repository,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("category-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    async fn complete_tracing_success(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, true, message)
            .await;
    }

    async fn complete_tracing_error(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        error_message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, false, error_message)
            .await;
    }

    async fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("Operation completed successfully: {message}");
        } else {
            error!("Operation failed: {message}");
        }

        self.metrics.lock().await.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}

#[async_trait]
impl CategoryServiceTrait for CategoryService {
    async fn get_categories(&self) -> Result<Vec<CategoryResponse>, AppError> {
        let method = Method::Get;

        let tracing_ctx =
            self.start_tracing("GetCategories", vec![KeyValue::new("component", "category")]);

        match self.repository.find_all().await {
            Ok(categories) => {
                let responses = categories
                    .into_iter()
                    .map(CategoryResponse::from)
                    .collect::<Vec<_>>();

                self.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    &format!("Retrieved {} categories", responses.len()),
                )
                .await;

                Ok(responses)
            }
            Err(err) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Failed to retrieve categories: {err}"),
                )
                .await;

                Err(err)
            }
        }
    }

    async fn get_category(&self, id: i64) -> Result<Option<CategoryResponse>, AppError> {
        let method = Method::Get;

        let tracing_ctx = self.start_tracing(
            "GetCategory",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("id", id.to_string()),
            ],
        );

        match self.repository.find_by_id(id).await {
            Ok(Some(category)) => {
                self.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Category retrieved successfully",
                )
                .await;

                Ok(Some(CategoryResponse::from(category)))
            }
            Ok(None) => {
                self.complete_tracing_error(&tracing_ctx, method, "Category not found")
                    .await;

                Ok(None)
            }
            Err(err) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Error retrieving category: {err}"),
                )
                .await;

                Err(err)
            }
        }
    }

    async fn create_category(
        &self,
        input: &CreateCategoryRequest,
    ) -> Result<CategoryResponse, AppError> {
        let method = Method::Post;

        let tracing_ctx = self.start_tracing(
            "CreateCategory",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("category.name", input.name.clone()),
            ],
        );

        match self.repository.save(&CategoryDraft::from(input)).await {
            Ok(category) => {
                self.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Category created successfully",
                )
                .await;

                Ok(CategoryResponse::from(category))
            }
            Err(err) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Category creation failed: {err}"),
                )
                .await;

                Err(err)
            }
        }
    }

    async fn update_category(
        &self,
        input: &UpdateCategoryRequest,
    ) -> Result<CategoryResponse, AppError> {
        let method = Method::Put;

        let tracing_ctx = self.start_tracing(
            "UpdateCategory",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("id", input.id.to_string()),
                KeyValue::new("category.name", input.name.clone()),
            ],
        );

        let result = match self.repository.find_by_id(input.id).await {
            Ok(Some(_)) => self.repository.save(&CategoryDraft::from(input)).await,
            Ok(None) => Err(AppError::NotFound(format!(
                "Category with ID {} not found",
                input.id
            ))),
            Err(err) => Err(err),
        };

        match result {
            Ok(category) => {
                self.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Category updated successfully",
                )
                .await;

                Ok(CategoryResponse::from(category))
            }
            Err(err) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Category update failed: {err}"),
                )
                .await;

                Err(err)
            }
        }
    }

    async fn delete_category(&self, id: i64) -> Result<(), AppError> {
        let method = Method::Delete;
        let tracing_ctx = self.start_tracing(
            "DeleteCategory",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("id", id.to_string()),
            ],
        );

        match self.repository.delete_by_id(id).await {
            Ok(()) => {
                self.complete_tracing_success(
                    &tracing_ctx,
                    method,
                    "Category deleted successfully",
                )
                .await;

                Ok(())
            }
            Err(err) => {
                self.complete_tracing_error(
                    &tracing_ctx,
                    method,
                    &format!("Failed to delete category: {err}"),
                )
                .await;

                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::CategoryRepositoryTrait,
        model::category::Category,
        repository::InMemoryCategoryRepository,
        utils::{MethodLabels, Status},
    };

    async fn service_with(repository: DynCategoryRepository) -> (CategoryService, Arc<Mutex<Metrics>>) {
        let metrics = Arc::new(Mutex::new(Metrics::new()));
        let mut registry = Registry::default();
        let service = CategoryService::new(repository, metrics.clone(), &mut registry).await;
        (service, metrics)
    }

    fn create(name: &str) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.to_string(),
            description: None,
        }
    }

    fn update(id: i64, name: &str) -> UpdateCategoryRequest {
        UpdateCategoryRequest {
            id,
            name: name.to_string(),
            description: None,
        }
    }

    /// Finds rows fine but fails every write, like a constraint violation.
    struct FailingWrites(InMemoryCategoryRepository);

    #[async_trait]
    impl CategoryRepositoryTrait for FailingWrites {
        async fn find_all(&self) -> Result<Vec<Category>, AppError> {
            self.0.find_all().await
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
            self.0.find_by_id(id).await
        }

        async fn save(&self, _input: &CategoryDraft) -> Result<Category, AppError> {
            Err(AppError::InternalError("unique constraint violated".into()))
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
            self.0.delete_by_id(id).await
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (service, _) = service_with(Arc::new(InMemoryCategoryRepository::new())).await;

        let created = service.create_category(&create("Books")).await.unwrap();
        let fetched = service.get_category(created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found_and_stores_nothing() {
        let (service, _) = service_with(Arc::new(InMemoryCategoryRepository::new())).await;

        let err = service.update_category(&update(5, "Ghost")).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(service.get_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_preserves_identity() {
        let (service, _) = service_with(Arc::new(InMemoryCategoryRepository::new())).await;
        let created = service.create_category(&create("Books")).await.unwrap();

        let updated = service
            .update_category(&update(created.id, "Literature"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Literature");
    }

    #[tokio::test]
    async fn update_write_failures_are_not_reported_as_not_found() {
        let inner = InMemoryCategoryRepository::new();
        inner
            .save(&CategoryDraft {
                id: None,
                name: "Books".into(),
                description: None,
            })
            .await
            .unwrap();
        let (service, _) = service_with(Arc::new(FailingWrites(inner))).await;

        let err = service.update_category(&update(1, "Literature")).await.unwrap_err();

        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[tokio::test]
    async fn delete_of_missing_id_succeeds() {
        let (service, _) = service_with(Arc::new(InMemoryCategoryRepository::new())).await;

        service.delete_category(404).await.unwrap();
        assert_eq!(service.get_category(404).await.unwrap(), None);
    }

    #[tokio::test]
    async fn operations_are_counted_by_method_and_status() {
        let (service, metrics) = service_with(Arc::new(InMemoryCategoryRepository::new())).await;

        service.create_category(&create("Books")).await.unwrap();
        service.get_category(1).await.unwrap();
        service.get_category(2).await.unwrap();

        let metrics = metrics.lock().await;
        let count = |method, status| {
            metrics
                .request_counter
                .get_or_create(&MethodLabels { method, status })
                .get()
        };
        assert_eq!(count(Method::Post, Status::Success), 1);
        assert_eq!(count(Method::Get, Status::Success), 1);
        assert_eq!(count(Method::Get, Status::Error), 1);
    }
}

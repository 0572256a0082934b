use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use shared::{
    domain::{CategoryResponse, CreateCategoryRequest, ErrorResponse, UpdateCategoryRequest},
    state::AppState,
    utils::AppError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List all categories", body = Vec<CategoryResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "category"
)]
pub async fn get_categories(State(data): State<Arc<AppState>>) -> Result<Response, AppError> {
    let categories = data.di_container.category_service.get_categories().await?;

    Ok((StatusCode::OK, Json(categories)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "category"
)]
pub async fn get_category(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    match data.di_container.category_service.get_category(id).await? {
        Some(category) => Ok((StatusCode::OK, Json(category)).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "category"
)]
pub async fn create_category(
    State(data): State<Arc<AppState>>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<Response, AppError> {
    let category = data
        .di_container
        .category_service
        .create_category(&body)
        .await?;

    Ok((StatusCode::CREATED, Json(category)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "category"
)]
pub async fn update_category(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(mut body): Json<UpdateCategoryRequest>,
) -> Result<Response, AppError> {
    body.id = id;

    let category = data
        .di_container
        .category_service
        .update_category(&body)
        .await?;

    Ok((StatusCode::OK, Json(category)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted, or was never stored"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "category"
)]
pub async fn delete_category(
    State(data): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    data.di_container
        .category_service
        .delete_category(id)
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

pub fn category_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/categories",
            get(get_categories).post(create_category),
        )
        .route(
            "/api/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .with_state(app_state)
}

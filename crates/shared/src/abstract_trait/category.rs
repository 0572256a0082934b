use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
    model::category::{Category, CategoryDraft},
    utils::AppError,
};

pub type DynCategoryRepository = Arc<dyn CategoryRepositoryTrait + Send + Sync>;
pub type DynCategoryService = Arc<dyn CategoryServiceTrait + Send + Sync>;

/// Storage for categories keyed by id.
#[async_trait]
pub trait CategoryRepositoryTrait {
    /// Every stored category, ordered by id.
    async fn find_all(&self) -> Result<Vec<Category>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError>;

    /// Inserts when `input.id` is `None`, otherwise inserts or overwrites the
    /// row with that id. Returns the stored row.
    async fn save(&self, input: &CategoryDraft) -> Result<Category, AppError>;

    /// Removing an id that is not stored is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait CategoryServiceTrait {
    async fn get_categories(&self) -> Result<Vec<CategoryResponse>, AppError>;
    async fn get_category(&self, id: i64) -> Result<Option<CategoryResponse>, AppError>;
    async fn create_category(
        &self,
        input: &CreateCategoryRequest,
    ) -> Result<CategoryResponse, AppError>;
    async fn update_category(
        &self,
        input: &UpdateCategoryRequest,
    ) -> Result<CategoryResponse, AppError>;
    async fn delete_category(&self, id: i64) -> Result<(), AppError>;
}
